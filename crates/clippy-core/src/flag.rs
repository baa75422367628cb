//! Flag declarations and the token parser.
//!
//! A flag is always followed by exactly one value token (`--out file.txt` or
//! `-o file.txt`). Tokens that do not name a declared flag are positional
//! arguments, even when they start with `-`.

use std::collections::HashSet;

use clippy_metadata::{DefaultMeta, FlagMeta};
use indexmap::IndexMap;

use crate::action::Invocation;
use crate::error::{InputError, SchemaError};
use crate::help;

/// What a flag resolves to when it is not given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultValue {
    /// No default: the flag is mandatory.
    #[default]
    Required,
    /// The flag defaults to the empty string.
    Empty,
    /// The flag defaults to this value.
    Value(String),
}

impl DefaultValue {
    fn resolve(&self) -> Option<&str> {
        match self {
            Self::Required => None,
            Self::Empty => Some(""),
            Self::Value(v) => Some(v.as_str()),
        }
    }
}

/// A named option that takes a value in the next token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    name: String,
    alias: Option<char>,
    value_kind: String,
    description: String,
    default: DefaultValue,
}

impl Flag {
    /// A mandatory flag called `--name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            value_kind: String::new(),
            description: String::new(),
            default: DefaultValue::Required,
        }
    }

    /// Single-character alias, matched as `-c`.
    pub fn alias(mut self, alias: char) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Label for the kind of value, e.g. `FILE` or `URL`. Documentation only.
    pub fn value_kind(mut self, kind: impl Into<String>) -> Self {
        self.value_kind = kind.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = DefaultValue::Value(value.into());
        self
    }

    /// Make the flag optional with an empty-string default.
    pub fn default_empty(mut self) -> Self {
        self.default = DefaultValue::Empty;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias_char(&self) -> Option<char> {
        self.alias
    }

    pub fn kind(&self) -> &str {
        &self.value_kind
    }

    pub fn about(&self) -> &str {
        &self.description
    }

    pub fn defaults_to(&self) -> &DefaultValue {
        &self.default
    }

    pub fn is_required(&self) -> bool {
        self.default == DefaultValue::Required
    }

    /// Validate the declaration.
    pub fn check(&self) -> Result<(), SchemaError> {
        check_name(&self.name)?;
        if let Some(alias) = self.alias {
            if !alias.is_alphanumeric() {
                return Err(SchemaError::InvalidCharacter {
                    ch: alias,
                    name: alias.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Whether `token` is `--name` or `-alias`.
    pub fn matches(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return long == self.name;
        }
        match (self.alias, token.strip_prefix('-')) {
            (Some(alias), Some(short)) => {
                let mut chars = short.chars();
                chars.next() == Some(alias) && chars.next().is_none()
            }
            _ => false,
        }
    }

    /// Left column of the help row: `--name, -a`.
    pub(crate) fn label(&self) -> String {
        match self.alias {
            Some(alias) => format!("--{}, -{}", self.name, alias),
            None => format!("--{}", self.name),
        }
    }

    /// Right column of the help row: description plus any default.
    pub(crate) fn summary(&self) -> String {
        match &self.default {
            DefaultValue::Required => self.description.clone(),
            DefaultValue::Empty => format!("{} ({:?})", self.description, ""),
            DefaultValue::Value(v) => format!("{} ({:?})", self.description, v),
        }
    }

    pub fn metadata(&self) -> FlagMeta {
        FlagMeta {
            name: self.name.clone(),
            alias: self.alias,
            value_kind: self.value_kind.clone(),
            description: self.description.clone(),
            default: match &self.default {
                DefaultValue::Required => DefaultMeta::Required,
                DefaultValue::Empty => DefaultMeta::Empty,
                DefaultValue::Value(v) => DefaultMeta::Value(v.clone()),
            },
        }
    }
}

/// Names of flags and commands: non-empty, letters, digits and `-` only.
pub(crate) fn check_name(name: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::InvalidName);
    }
    if let Some(ch) = name.chars().find(|c| !c.is_alphanumeric() && *c != '-') {
        return Err(SchemaError::InvalidCharacter {
            ch,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// An ordered list of flags. Order only affects help output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, flag: Flag) {
        self.flags.push(flag);
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flag> {
        self.flags.iter()
    }

    /// Validate every flag and reject names or aliases seen twice.
    ///
    /// Names and aliases share one namespace.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen: HashSet<String> = HashSet::new();
        for flag in &self.flags {
            flag.check()?;
            if !seen.insert(flag.name.clone()) {
                return Err(SchemaError::DuplicateFlag(flag.name.clone()));
            }
            if let Some(alias) = flag.alias {
                let alias = alias.to_string();
                if !seen.insert(alias.clone()) {
                    return Err(SchemaError::DuplicateFlag(alias));
                }
            }
        }
        Ok(())
    }

    /// The flag named by `token`, if any.
    pub fn get(&self, token: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.matches(token))
    }

    /// Split `tokens` into flag values and positional arguments, then fill in
    /// defaults for every flag that was not given.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Invocation, InputError> {
        let mut flags: IndexMap<String, String> = IndexMap::new();
        let mut arguments: Vec<String> = Vec::new();

        let mut i = 0usize;
        while i < tokens.len() {
            let token = tokens[i].as_ref();
            let Some(flag) = self.get(token) else {
                arguments.push(token.to_string());
                i += 1;
                continue;
            };
            let Some(value) = tokens.get(i + 1) else {
                return Err(InputError::MissingFlagValue(token.to_string()));
            };
            tracing::trace!(flag = %flag.name, value = value.as_ref(), "matched flag");
            flags.insert(flag.name.clone(), value.as_ref().to_string());
            i += 2;
        }

        for flag in &self.flags {
            if flags.contains_key(&flag.name) {
                continue;
            }
            match flag.default.resolve() {
                Some(value) => {
                    flags.insert(flag.name.clone(), value.to_string());
                }
                None => return Err(InputError::MissingRequiredFlag(flag.name.clone())),
            }
        }

        Ok(Invocation::new(flags, arguments))
    }

    /// Aligned help rows, one per flag, each prefixed with `indent`.
    pub fn help(&self, indent: &str) -> String {
        let rows: Vec<(String, String)> =
            self.flags.iter().map(|f| (f.label(), f.summary())).collect();
        help::rows(indent, &rows)
    }

    pub fn metadata(&self) -> Vec<FlagMeta> {
        self.flags.iter().map(Flag::metadata).collect()
    }
}

impl From<Vec<Flag>> for FlagSet {
    fn from(flags: Vec<Flag>) -> Self {
        Self { flags }
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FlagSet {
    type Item = &'a Flag;
    type IntoIter = std::slice::Iter<'a, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}
