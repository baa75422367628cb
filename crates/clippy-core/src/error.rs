//! Error types for schema validation, input parsing and action failures.

use thiserror::Error;

use crate::report::Severity;

/// A mistake in the declared schema. Always a bug in the embedding program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A flag or command name is empty.
    #[error("missing name of flag or command")]
    InvalidName,

    /// A name or alias contains a character outside letters, digits and `-`.
    #[error("invalid character {ch:?} in {name:?}")]
    InvalidCharacter { ch: char, name: String },

    /// Two flags in one set share a name or alias.
    #[error("duplicate flag name or alias: {0:?}")]
    DuplicateFlag(String),

    /// A command declares no names at all.
    #[error("missing name of command")]
    MissingCommandName,

    /// Two commands in one set share a name or alias.
    #[error("duplicate command name {0:?}")]
    DuplicateCommandName(String),
}

/// Bad user input found while parsing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A flag token was the last token, so it has no value.
    #[error("no corresponding value for flag: {0:?}")]
    MissingFlagValue(String),

    /// A flag without a default was not supplied.
    #[error("no given or default value for flag: {0:?}")]
    MissingRequiredFlag(String),

    /// Neither a command nor a top-level action handled the invocation.
    #[error("{0}")]
    NoAction(String),
}

/// Failure returned by an action handler. Opaque to the framework.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ActionError(#[from] anyhow::Error);

impl ActionError {
    pub fn msg(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self(anyhow::Error::msg(message))
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

/// Any failure that can end a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

impl Error {
    /// Which reporting channel this error belongs to.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Schema(_) => Severity::Setup,
            Self::Input(_) => Severity::Input,
            Self::Action(_) => Severity::Action,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
