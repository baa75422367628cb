//! Building blocks for help text.

/// Default usage line of a program.
pub const PROGRAM_USAGE: &str = "[global flags...] [command] [flags and values...] [arguments...]";

/// Default usage line of a command.
pub const COMMAND_USAGE: &str = "[flags and values...] [arguments...]";

/// The reserved global flags, as listed under `GLOBAL FLAGS:`.
pub const GLOBAL_FLAGS: &str = "\t--help, -h  \tshow help (with optional subcommand) and exit\n\
                                \t--version, -v  \tshow version and exit\n";

/// Whether `token` asks for help.
pub fn is_help(token: &str) -> bool {
    token == "-h" || token == "--help"
}

/// Whether `token` asks for the version.
pub fn is_version(token: &str) -> bool {
    token == "-v" || token == "--version"
}

/// Section header, singular for one entry and plural otherwise (`FLAG:` / `FLAGS:`).
pub fn header(out: &mut String, singular: &str, count: usize) {
    out.push_str(singular);
    if count > 1 {
        out.push('S');
    }
    out.push_str(":\n");
}

/// Two-column rows: `indent`, left column padded to the widest entry,
/// `indent`, right column.
pub fn rows(indent: &str, rows: &[(String, String)]) -> String {
    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (left, right) in rows {
        out.push_str(&format!("{indent}{left:<width$}{indent}{right}\n"));
    }
    out
}

/// Drop the trailing blank lines every section leaves behind.
pub fn finish(mut out: String) -> String {
    let len = out.trim_end_matches('\n').len();
    out.truncate(len);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_pluralizes_past_one() {
        let mut out = String::new();
        header(&mut out, "FLAG", 1);
        header(&mut out, "COMMAND", 2);
        assert_eq!(out, "FLAG:\nCOMMANDS:\n");
    }

    #[test]
    fn rows_pad_by_characters() {
        let text = rows(
            "\t",
            &[
                ("größe".to_string(), "a".to_string()),
                ("ab".to_string(), "b".to_string()),
            ],
        );
        assert_eq!(text, "\tgröße\ta\n\tab   \tb\n");
    }

    #[test]
    fn reserved_tokens() {
        assert!(is_help("-h") && is_help("--help"));
        assert!(is_version("-v") && is_version("--version"));
        assert!(!is_help("help") && !is_version("-V"));
    }

    #[test]
    fn finish_trims_only_newlines() {
        assert_eq!(finish("a\t\n\n".to_string()), "a\t");
    }
}
