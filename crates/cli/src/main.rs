use anyhow::{Context, bail};
use clippy_core::{Author, Command, Flag, Invocation, Program};
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    init_tracing();
    program().run_env();
}

fn program() -> Program {
    Program::new("clippy-demo", env!("CARGO_PKG_VERSION"))
        .tagline("a tour of clippy-core")
        .description("Greets, echoes and fails on demand.")
        .author(Author::new("clippy developers", "dev@clippy.invalid"))
        .flag(
            Flag::new("style")
                .alias('s')
                .value_kind("STYLE")
                .description("output style")
                .default_value("plain"),
        )
        .command(
            Command::new("greet")
                .alias("hi")
                .description("Print a greeting")
                .flag(
                    Flag::new("name")
                        .alias('n')
                        .value_kind("NAME")
                        .description("who to greet")
                        .default_value("world"),
                )
                .flag(
                    Flag::new("punctuation")
                        .alias('p')
                        .description("appended to the greeting")
                        .default_empty(),
                )
                .action(greet),
        )
        .command(
            Command::new("echo")
                .description("Print each argument with a prefix")
                .usage("--prefix <PREFIX> [arguments...]")
                .flag(Flag::new("prefix").value_kind("PREFIX").description("printed before each argument"))
                .action(echo),
        )
        .command(
            Command::new("fail")
                .description("Always fail")
                .action(|_| bail!("this command always fails")),
        )
        .command(
            Command::new("schema")
                .description("Print this program's schema as JSON")
                .action(schema),
        )
        .action(default_action)
}

fn greet(inv: &Invocation) -> anyhow::Result<()> {
    let name = inv.flag("name").context("name flag not parsed")?;
    let punctuation = inv.flag("punctuation").unwrap_or_default();
    tracing::debug!(name, punctuation, "greeting");
    println!("Hello, {name}{punctuation}");
    for arg in inv.arguments() {
        println!("{arg}");
    }
    Ok(())
}

fn echo(inv: &Invocation) -> anyhow::Result<()> {
    let prefix = inv.flag("prefix").context("prefix flag not parsed")?;
    for arg in inv.arguments() {
        println!("{prefix}{arg}");
    }
    Ok(())
}

fn schema(_: &Invocation) -> anyhow::Result<()> {
    let json = program()
        .metadata()
        .to_json_pretty()
        .context("failed to encode schema")?;
    println!("{json}");
    Ok(())
}

fn default_action(inv: &Invocation) -> anyhow::Result<()> {
    let style = inv.flag("style").unwrap_or_default();
    println!("style={style}");
    for arg in inv.arguments() {
        println!("{arg}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_valid() {
        assert!(program().check().is_ok());
    }

    #[test]
    fn schema_export_lists_every_command() {
        let meta = program().metadata();
        let names: Vec<&str> = meta.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["greet", "echo", "fail", "schema"]);
        assert_eq!(meta.command("hi").map(|c| c.flags.len()), Some(2));
    }
}
