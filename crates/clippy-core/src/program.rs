//! The top-level program: schema validation, dispatch and help/version text.

use std::fmt;

use clippy_metadata::ProgramMeta;

use crate::action::{self, Action, Invocation};
use crate::author::Author;
use crate::command::{Command, CommandOutcome, CommandSet};
use crate::error::{Error, InputError, SchemaError};
use crate::flag::{Flag, FlagSet};
use crate::help;
use crate::report::{ExitReporter, Output, Reporter, StdOutput};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Help text to show, from the program or from a command.
    Help(String),
    /// Version text to show.
    Version(String),
    /// An action ran to completion.
    Completed,
}

/// A command-line program: global flags, commands and a default action.
pub struct Program {
    name: String,
    version: String,
    tagline: String,
    description: String,
    authors: Vec<Author>,
    usage: Option<String>,
    flags: FlagSet,
    commands: CommandSet,
    action: Option<Action>,
    command_fallback: Action,
    missing_action: Action,
}

impl Program {
    /// A program with no flags, no commands and no action.
    ///
    /// Commands without an action do nothing; a run that matches no command
    /// and has no top-level action fails with a pointer to `--help`.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            tagline: String::new(),
            description: String::new(),
            authors: Vec::new(),
            usage: None,
            flags: FlagSet::new(),
            commands: CommandSet::new(),
            action: None,
            command_fallback: action::noop(),
            missing_action: action::use_help(),
        }
    }

    pub fn tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = tagline.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    /// Replace the default usage line shown after the program name.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Add a global flag. Global flags are only parsed when no command matches.
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// The action run when the first token is not a command.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Invocation) -> anyhow::Result<()> + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// The action run by commands that declare none.
    pub fn command_fallback<F>(mut self, action: F) -> Self
    where
        F: Fn(&Invocation) -> anyhow::Result<()> + 'static,
    {
        self.command_fallback = Box::new(action);
        self
    }

    /// The action run when no command matched and no top-level action is set.
    /// Its failures are reported as input errors.
    pub fn missing_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Invocation) -> anyhow::Result<()> + 'static,
    {
        self.missing_action = Box::new(action);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Validate global flags, then commands.
    pub fn check(&self) -> Result<(), SchemaError> {
        self.flags.check()?;
        self.commands.check()
    }

    /// Validate, then dispatch `tokens` (program name excluded).
    ///
    /// Nothing is printed; help and version text are returned in the outcome.
    pub fn execute<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Outcome, Error> {
        self.check()?;

        for token in tokens {
            let token = token.as_ref();
            if help::is_help(token) {
                let command = tokens.first().and_then(|t| self.commands.get(t.as_ref()));
                tracing::debug!(program = %self.name, command = command.map(Command::name), "help requested");
                return Ok(Outcome::Help(match command {
                    Some(command) => command.help(&self.name),
                    None => self.help(),
                }));
            }
            if help::is_version(token) {
                tracing::debug!(program = %self.name, "version requested");
                return Ok(Outcome::Version(self.version()));
            }
        }

        if let Some(first) = tokens.first() {
            if let Some(command) = self.commands.get(first.as_ref()) {
                tracing::debug!(program = %self.name, command = command.name(), "dispatching to command");
                return match command.run(&self.name, &tokens[1..], &self.command_fallback)? {
                    CommandOutcome::Help(text) => Ok(Outcome::Help(text)),
                    CommandOutcome::Completed => Ok(Outcome::Completed),
                };
            }
        }

        let invocation = self.flags.parse(tokens)?;
        match &self.action {
            Some(action) => {
                tracing::debug!(program = %self.name, "running default action");
                action(&invocation).map_err(|e| Error::Action(e.into()))?;
            }
            None => {
                tracing::debug!(program = %self.name, "no command and no default action");
                (self.missing_action)(&invocation)
                    .map_err(|e| Error::Input(InputError::NoAction(format!("{e:#}"))))?;
            }
        }
        Ok(Outcome::Completed)
    }

    /// Execute, emit any help/version text to `output`, and hand failures to
    /// `reporter`.
    ///
    /// The error is also returned for reporters that do not exit.
    pub fn run<S: AsRef<str>>(
        &self,
        tokens: &[S],
        output: &mut dyn Output,
        reporter: &mut dyn Reporter,
    ) -> Result<(), Error> {
        match self.execute(tokens) {
            Ok(Outcome::Help(text)) | Ok(Outcome::Version(text)) => {
                output.emit(&text);
                Ok(())
            }
            Ok(Outcome::Completed) => Ok(()),
            Err(err) => {
                reporter.report(&self.name, err.severity(), &err);
                Err(err)
            }
        }
    }

    /// Run with the process arguments, printing to stdout and exiting on
    /// failure with the severity's exit code.
    pub fn run_env(&self) {
        let tokens: Vec<String> = std::env::args().skip(1).collect();
        let _ = self.run(&tokens, &mut StdOutput, &mut ExitReporter);
    }

    /// `<name> <version>`.
    pub fn version(&self) -> String {
        format!("{} {}", self.name, self.version)
    }

    pub fn help(&self) -> String {
        let mut out = String::new();

        out.push_str("NAME:\n");
        out.push_str(&format!("\t{}", self.name));
        if !self.tagline.is_empty() {
            out.push_str(&format!(" - {}", self.tagline));
        }
        out.push_str("\n\n");

        out.push_str("VERSION:\n");
        out.push_str(&format!("\t{}\n\n", self.version));

        if !self.description.is_empty() {
            out.push_str("DESCRIPTION:\n");
            out.push_str(&format!("\t{}\n\n", self.description));
        }

        if !self.authors.is_empty() {
            help::header(&mut out, "AUTHOR", self.authors.len());
            for author in &self.authors {
                out.push_str(&format!("\t{author}\n"));
            }
            out.push('\n');
        }

        out.push_str("USAGE:\n");
        let usage = self.usage.as_deref().unwrap_or(help::PROGRAM_USAGE);
        out.push_str(&format!("\t{} {}\n\n", self.name, usage));

        out.push_str("GLOBAL FLAGS:\n");
        out.push_str(help::GLOBAL_FLAGS);
        out.push('\n');

        if !self.commands.is_empty() {
            help::header(&mut out, "COMMAND", self.commands.len());
            out.push_str(&self.commands.help("\t"));
            out.push('\n');
        }

        if !self.flags.is_empty() {
            help::header(&mut out, "FLAG", self.flags.len());
            out.push_str(&self.flags.help("\t"));
            out.push('\n');
        }

        help::finish(out)
    }

    /// Handler-free description of the schema.
    pub fn metadata(&self) -> ProgramMeta {
        let mut meta = ProgramMeta::new(&self.name, &self.version);
        meta.tagline = self.tagline.clone();
        meta.description = self.description.clone();
        meta.authors = self.authors.iter().map(Author::metadata).collect();
        meta.usage = self.usage.clone();
        meta.flags = self.flags.metadata();
        meta.commands = self.commands.metadata();
        meta
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version())
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("flags", &self.flags)
            .field("commands", &self.commands)
            .field("action", &self.action.is_some())
            .finish_non_exhaustive()
    }
}
