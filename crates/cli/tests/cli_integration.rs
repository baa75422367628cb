use std::process::{Command, Output};

fn demo() -> Command {
    Command::new(env!("CARGO_BIN_EXE_clippy-demo"))
}

fn run(args: &[&str]) -> Output {
    demo()
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run clippy-demo")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn help_works_from_any_position() {
    for args in [&["--help"][..], &["-s", "fancy", "-h"][..], &["x", "--help"][..]] {
        let out = run(args);
        assert!(
            out.status.success(),
            "clippy-demo {args:?} failed:\nstatus: {}\nstderr:\n{}",
            out.status,
            stderr(&out),
        );
        let text = stdout(&out);
        assert!(text.starts_with("NAME:\n\tclippy-demo - a tour of clippy-core\n"), "unexpected help output:\n{text}");
        assert!(text.contains("COMMANDS:\n\tgreet, hi\tPrint a greeting\n"), "unexpected help output:\n{text}");
        assert!(text.contains("FLAG:\n\t--style, -s\toutput style (\"plain\")"), "unexpected help output:\n{text}");
    }
}

#[test]
fn version_prints_name_and_version() {
    let out = run(&["greet", "-v"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        format!("clippy-demo {}\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn command_help_does_not_run_the_command() {
    let out = run(&["hi", "--help"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("NAME:\n\tclippy-demo greet\n"), "unexpected help output:\n{text}");
    assert!(text.contains("FLAGS:\n"), "unexpected help output:\n{text}");
    assert!(text.contains("appended to the greeting (\"\")"), "unexpected help output:\n{text}");
    assert!(!text.contains("Hello"));
}

#[test]
fn greet_uses_defaults_and_aliases() {
    let out = run(&["greet"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "Hello, world\n");

    let out = run(&["hi", "-n", "Ada", "--punctuation", "!", "extra"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "Hello, Ada!\nextra\n");
}

#[test]
fn default_action_parses_global_flags() {
    let out = run(&["--unknown", "-s", "fancy", "a"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "style=fancy\n--unknown\na\n");
}

#[test]
fn missing_required_flag_exits_with_input_code() {
    let out = run(&["echo", "a"]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(
        stderr(&out).trim_end(),
        "clippy-demo: no given or default value for flag: \"prefix\""
    );
    assert!(stdout(&out).is_empty());
}

#[test]
fn dangling_flag_exits_with_input_code() {
    let out = run(&["-s"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("no corresponding value for flag: \"-s\""));
}

#[test]
fn action_failure_exits_with_action_code() {
    let out = run(&["fail"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out).trim_end(), "clippy-demo: this command always fails");
}

#[test]
fn echo_prefixes_arguments() {
    let out = run(&["echo", "a", "--prefix", "> ", "b"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "> a\n> b\n");
}

#[test]
fn schema_prints_json() {
    let out = run(&["schema"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("\"name\": \"clippy-demo\""), "unexpected schema:\n{text}");
    assert!(text.contains("\"aliases\": [\n        \"hi\"\n      ]"), "unexpected schema:\n{text}");
}
