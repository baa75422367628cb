//! Handlers and the values they receive.

use indexmap::IndexMap;

/// The result of parsing one token sequence against a flag set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    flags: IndexMap<String, String>,
    arguments: Vec<String>,
}

impl Invocation {
    pub fn new(flags: IndexMap<String, String>, arguments: Vec<String>) -> Self {
        Self { flags, arguments }
    }

    /// Value of a flag by its canonical name (never by alias).
    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(String::as_str)
    }

    pub fn flags(&self) -> &IndexMap<String, String> {
        &self.flags
    }

    /// Tokens that were not consumed as flags or flag values, in input order.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn into_parts(self) -> (IndexMap<String, String>, Vec<String>) {
        (self.flags, self.arguments)
    }
}

/// A handler invoked with the parsed flags and arguments.
pub type Action = Box<dyn Fn(&Invocation) -> anyhow::Result<()>>;

/// Message of the stock action used when nothing else handles a run.
pub const USE_HELP_MESSAGE: &str = "use the \"--help\" global flag";

/// An action that does nothing.
pub fn noop() -> Action {
    Box::new(|_| Ok(()))
}

/// An action that always fails, pointing the user at `--help`.
pub fn use_help() -> Action {
    Box::new(|_| Err(anyhow::anyhow!(USE_HELP_MESSAGE)))
}
