//! Collaborators the dispatcher talks to: where text goes and how failures end
//! the process.

use std::io::Write;

use crate::error::Error;

/// Reporting channel of a failure. Each maps to its own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An action handler failed.
    Action,
    /// The user's tokens could not be parsed.
    Input,
    /// The declared schema is invalid.
    Setup,
}

impl Severity {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Action => 1,
            Self::Input => 2,
            Self::Setup => 3,
        }
    }
}

/// Line-oriented sink for help and version text.
pub trait Output {
    fn emit(&mut self, text: &str);
}

/// Receives every failure of a run. Implementations may terminate the process.
pub trait Reporter {
    fn report(&mut self, program: &str, severity: Severity, error: &Error);
}

/// Writes each emission to stdout followed by a newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdOutput;

impl Output for StdOutput {
    fn emit(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout (e.g. `| head`) is not worth failing over.
        let _ = writeln!(stdout, "{text}");
    }
}

/// Collects emissions in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferOutput {
    emitted: Vec<String>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> &[String] {
        &self.emitted
    }

    /// Everything emitted so far, one line per emission.
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for text in &self.emitted {
            out.push_str(text);
            out.push('\n');
        }
        out
    }
}

impl Output for BufferOutput {
    fn emit(&mut self, text: &str) {
        self.emitted.push(text.to_string());
    }
}

/// Prefix `message` with the program name unless it already carries it.
pub fn format_message(program: &str, message: &str) -> String {
    match message.split_once(':') {
        Some((head, _)) if head == program => message.to_string(),
        _ => format!("{program}: {message}"),
    }
}

/// Prints `program: message` to stderr and exits with the severity's code.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExitReporter;

impl Reporter for ExitReporter {
    fn report(&mut self, program: &str, severity: Severity, error: &Error) {
        let code = severity.exit_code();
        tracing::debug!(?severity, code, "terminating after error");
        eprintln!("{}", format_message(program, &format!("{error:#}")));
        std::process::exit(code);
    }
}

/// One recorded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub message: String,
}

/// Records failures instead of exiting.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    reports: Vec<Report>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, program: &str, severity: Severity, error: &Error) {
        self.reports.push(Report {
            severity,
            message: format_message(program, &error.to_string()),
        });
    }
}
