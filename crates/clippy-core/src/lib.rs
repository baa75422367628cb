//! Declarative command-line programs.
//!
//! A [`Program`] is declared up front (global flags, subcommands, actions) and
//! then run against the process arguments:
//!
//! ```rust,no_run
//! use clippy_core::{Command, Flag, Program};
//!
//! Program::new("greeter", "0.1.0")
//!     .command(
//!         Command::new("hello")
//!             .alias("hi")
//!             .flag(Flag::new("name").alias('n').default_value("world"))
//!             .action(|inv| {
//!                 println!("Hello, {}", inv.flag("name").unwrap_or_default());
//!                 Ok(())
//!             }),
//!     )
//!     .run_env();
//! ```
//!
//! Parsing is deliberately small: every flag takes exactly one value in the
//! next token, and any token that is not a declared flag is a positional
//! argument. `-h`/`--help` and `-v`/`--version` are reserved everywhere.

pub mod action;
pub mod author;
pub mod command;
pub mod error;
pub mod flag;
pub mod help;
pub mod program;
pub mod report;

pub use action::{Action, Invocation};
pub use author::Author;
pub use command::{Command, CommandOutcome, CommandSet};
pub use error::{ActionError, Error, InputError, SchemaError};
pub use flag::{DefaultValue, Flag, FlagSet};
pub use program::{Outcome, Program};
pub use report::{
    BufferOutput, ExitReporter, Output, RecordingReporter, Report, Reporter, Severity, StdOutput,
};
