//! Subcommands: named units of behavior with their own flags.

use std::collections::HashSet;
use std::fmt;

use clippy_metadata::CommandMeta;

use crate::action::{Action, Invocation};
use crate::error::{Error, SchemaError};
use crate::flag::{Flag, FlagSet, check_name};
use crate::help;

/// A subcommand. The first name is canonical, the rest are aliases.
pub struct Command {
    names: Vec<String>,
    description: String,
    usage: Option<String>,
    flags: FlagSet,
    action: Option<Action>,
}

/// What running a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// `-h`/`--help` came first; the command's help text.
    Help(String),
    /// Flags parsed and the action returned successfully.
    Completed,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            description: String::new(),
            usage: None,
            flags: FlagSet::new(),
            action: None,
        }
    }

    /// A command with no names at all. Never passes `check`.
    pub fn unnamed() -> Self {
        Self {
            names: Vec::new(),
            ..Self::new("")
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.names.push(alias.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the default `[flags and values...] [arguments...]` usage line.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Invocation) -> anyhow::Result<()> + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The canonical name, or `""` for an unnamed command.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    pub fn about(&self) -> &str {
        &self.description
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn matches(&self, token: &str) -> bool {
        self.names.iter().any(|n| n == token)
    }

    /// Validate names and the command's own flags.
    pub fn check(&self) -> Result<(), SchemaError> {
        if self.names.is_empty() {
            return Err(SchemaError::MissingCommandName);
        }
        for name in &self.names {
            check_name(name)?;
        }
        self.flags.check()
    }

    /// Run with the tokens that followed the command name.
    ///
    /// `program` is only used for help text. `fallback` runs when the command
    /// declares no action of its own.
    pub fn run<S: AsRef<str>>(
        &self,
        program: &str,
        tokens: &[S],
        fallback: &Action,
    ) -> Result<CommandOutcome, Error> {
        if tokens.first().is_some_and(|t| help::is_help(t.as_ref())) {
            return Ok(CommandOutcome::Help(self.help(program)));
        }

        let invocation = self.flags.parse(tokens)?;
        tracing::debug!(
            command = self.name(),
            flags = invocation.flags().len(),
            arguments = invocation.arguments().len(),
            "running command"
        );

        let action = self.action.as_ref().unwrap_or(fallback);
        action(&invocation).map_err(|e| Error::Action(e.into()))?;
        Ok(CommandOutcome::Completed)
    }

    /// Help text for `program <command>`.
    pub fn help(&self, program: &str) -> String {
        let name = self.name();
        let mut out = String::new();

        out.push_str("NAME:\n");
        out.push_str(&format!("\t{program} {name}\n\n"));

        if !self.description.is_empty() {
            out.push_str("DESCRIPTION:\n");
            out.push_str(&format!("\t{}\n\n", self.description));
        }

        out.push_str("USAGE:\n");
        let usage = self.usage.as_deref().unwrap_or(help::COMMAND_USAGE);
        out.push_str(&format!("\t{program} {name} {usage}\n\n"));

        if !self.flags.is_empty() {
            help::header(&mut out, "FLAG", self.flags.len());
            out.push_str(&self.flags.help("\t"));
            out.push('\n');
        }

        help::finish(out)
    }

    pub fn metadata(&self) -> CommandMeta {
        CommandMeta {
            name: self.name().to_string(),
            aliases: self.names.iter().skip(1).cloned().collect(),
            description: self.description.clone(),
            usage: self.usage.clone(),
            flags: self.flags.metadata(),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("names", &self.names)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("flags", &self.flags)
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// An ordered list of commands.
#[derive(Debug, Default)]
pub struct CommandSet {
    commands: Vec<Command>,
}

impl CommandSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Validate every command, then reject any name used twice across the set.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for command in &self.commands {
            command.check()?;
            for name in &command.names {
                if !seen.insert(name.as_str()) {
                    return Err(SchemaError::DuplicateCommandName(name.clone()));
                }
            }
        }
        Ok(())
    }

    /// The command named (or aliased) `token`.
    pub fn get(&self, token: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(token))
    }

    /// Aligned help rows: all names joined by `, `, then the description.
    pub fn help(&self, indent: &str) -> String {
        let rows: Vec<(String, String)> = self
            .commands
            .iter()
            .map(|c| (c.names.join(", "), c.description.clone()))
            .collect();
        help::rows(indent, &rows)
    }

    pub fn metadata(&self) -> Vec<CommandMeta> {
        self.commands.iter().map(Command::metadata).collect()
    }
}

impl From<Vec<Command>> for CommandSet {
    fn from(commands: Vec<Command>) -> Self {
        Self { commands }
    }
}

impl FromIterator<Command> for CommandSet {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CommandSet {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action;
    use crate::error::InputError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn check_rejects_missing_and_invalid_names() {
        assert_eq!(Command::unnamed().check(), Err(SchemaError::MissingCommandName));
        assert_eq!(Command::new("").check(), Err(SchemaError::InvalidName));
        assert!(matches!(
            Command::new("run").alias("r!").check(),
            Err(SchemaError::InvalidCharacter { ch: '!', .. })
        ));
        assert!(Command::new("dry-run").alias("d2").check().is_ok());
    }

    #[test]
    fn check_covers_the_commands_flags() {
        let cmd = Command::new("build")
            .flag(Flag::new("out").alias('o'))
            .flag(Flag::new("o"));
        assert_eq!(cmd.check(), Err(SchemaError::DuplicateFlag("o".to_string())));
    }

    #[test]
    fn set_rejects_names_shared_across_commands() {
        let set: CommandSet = vec![
            Command::new("run").alias("r"),
            Command::new("build"),
            Command::new("r"),
        ]
        .into();
        assert_eq!(
            set.check(),
            Err(SchemaError::DuplicateCommandName("r".to_string()))
        );

        let set: CommandSet = vec![Command::new("run").alias("run")].into();
        assert_eq!(
            set.check(),
            Err(SchemaError::DuplicateCommandName("run".to_string()))
        );
    }

    #[test]
    fn get_resolves_names_and_aliases() {
        let set: CommandSet = vec![Command::new("run").alias("r"), Command::new("build")].into();
        assert!(set.check().is_ok());
        assert_eq!(set.get("r").map(Command::name), Some("run"));
        assert_eq!(set.get("run").map(Command::name), Some("run"));
        assert_eq!(set.get("build").map(Command::name), Some("build"));
        assert!(set.get("b").is_none());
        assert!(set.get("--run").is_none());
    }

    #[test]
    fn help_token_skips_parse_and_action() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let cmd = Command::new("build")
            .flag(Flag::new("target"))
            .action(move |_| {
                *counter.borrow_mut() += 1;
                Ok(())
            });

        let outcome = cmd.run("demo", &argv(&["--help"]), &action::noop()).unwrap();
        assert!(matches!(outcome, CommandOutcome::Help(text) if text.starts_with("NAME:\n\tdemo build")));
        let outcome = cmd.run("demo", &argv(&["-h", "extra"]), &action::noop()).unwrap();
        assert!(matches!(outcome, CommandOutcome::Help(_)));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn help_token_later_is_an_argument() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let cmd = Command::new("build").action(move |inv| {
            sink.borrow_mut().extend(inv.arguments().iter().cloned());
            Ok(())
        });
        let outcome = cmd.run("demo", &argv(&["x", "--help"]), &action::noop()).unwrap();
        assert_eq!(outcome, CommandOutcome::Completed);
        assert_eq!(*seen.borrow(), argv(&["x", "--help"]));
    }

    #[test]
    fn empty_tokens_still_parse() {
        let cmd = Command::new("build").flag(Flag::new("target"));
        let err = cmd.run::<String>("demo", &[], &action::noop()).unwrap_err();
        assert!(matches!(
            err,
            Error::Input(InputError::MissingRequiredFlag(name)) if name == "target"
        ));
    }

    #[test]
    fn parse_failure_never_runs_the_action() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let cmd = Command::new("build")
            .flag(Flag::new("target").alias('t'))
            .action(move |_| {
                *counter.borrow_mut() += 1;
                Ok(())
            });
        let err = cmd.run("demo", &argv(&["-t"]), &action::noop()).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::MissingFlagValue(_))));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn missing_action_uses_the_fallback() {
        let cmd = Command::new("build");
        assert_eq!(
            cmd.run::<String>("demo", &[], &action::noop()).unwrap(),
            CommandOutcome::Completed
        );
        let err = cmd.run::<String>("demo", &[], &action::use_help()).unwrap_err();
        assert!(matches!(err, Error::Action(_)));
    }

    #[test]
    fn action_errors_are_passed_through() {
        let cmd = Command::new("build").action(|_| anyhow::bail!("compile failed"));
        let err = cmd.run::<String>("demo", &[], &action::noop()).unwrap_err();
        assert!(matches!(err, Error::Action(_)));
        assert_eq!(err.to_string(), "compile failed");
    }

    #[test]
    fn command_help_layout() {
        let cmd = Command::new("build")
            .alias("b")
            .description("Build the project")
            .flag(Flag::new("out").alias('o').description("output file").default_value("a.out"));
        assert_eq!(
            cmd.help("demo"),
            "NAME:\n\tdemo build\n\n\
             DESCRIPTION:\n\tBuild the project\n\n\
             USAGE:\n\tdemo build [flags and values...] [arguments...]\n\n\
             FLAG:\n\t--out, -o\toutput file (\"a.out\")"
        );
    }

    #[test]
    fn command_help_with_usage_override_and_no_flags() {
        let cmd = Command::new("clean").usage("<dir>");
        assert_eq!(cmd.help("demo"), "NAME:\n\tdemo clean\n\nUSAGE:\n\tdemo clean <dir>");
    }

    #[test]
    fn set_help_joins_aliases_and_aligns() {
        let set: CommandSet = vec![
            Command::new("run").alias("r").description("Run it"),
            Command::new("build").description("Build it"),
        ]
        .into();
        assert_eq!(set.help("\t"), "\trun, r\tRun it\n\tbuild \tBuild it\n");
    }
}
