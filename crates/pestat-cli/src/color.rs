//! Decide whether output gets ANSI colors.

use std::io::IsTerminal;

/// Environment variable forcing colors on or off.
pub const PESTAT_COLOR_VAR: &str = "PESTAT_COLOR";

/// Color-related process environment, captured once.
#[derive(Debug, Clone, Default)]
pub struct ColorEnv {
    /// Value of `PESTAT_COLOR`
    pub pestat_color: Option<String>,
    /// Value of `NO_COLOR`
    pub no_color: Option<String>,
    /// Whether stdout is an interactive terminal
    pub stdout_is_tty: bool,
}

impl ColorEnv {
    pub fn from_process() -> Self {
        Self {
            pestat_color: std::env::var(PESTAT_COLOR_VAR).ok(),
            no_color: std::env::var("NO_COLOR").ok(),
            stdout_is_tty: std::io::stdout().is_terminal(),
        }
    }
}

/// Parse a `PESTAT_COLOR` value. `auto` and anything unrecognized defer
/// to the next rule.
fn parse_override(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "always" | "1" | "yes" | "true" | "on" => Some(true),
        "never" | "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Resolve colors: command-line flag, then `PESTAT_COLOR`, then a
/// non-empty `NO_COLOR`, then whether stdout is a terminal.
pub fn use_color(flag: Option<bool>, env: &ColorEnv) -> bool {
    if let Some(choice) = flag {
        return choice;
    }
    if let Some(choice) = env.pestat_color.as_deref().and_then(parse_override) {
        return choice;
    }
    if env.no_color.as_deref().is_some_and(|v| !v.is_empty()) {
        return false;
    }
    env.stdout_is_tty
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pestat_color: Option<&str>, no_color: Option<&str>, tty: bool) -> ColorEnv {
        ColorEnv {
            pestat_color: pestat_color.map(str::to_string),
            no_color: no_color.map(str::to_string),
            stdout_is_tty: tty,
        }
    }

    #[test]
    fn test_flag_wins() {
        assert!(use_color(Some(true), &env(Some("never"), Some("1"), false)));
        assert!(!use_color(Some(false), &env(Some("always"), None, true)));
    }

    #[test]
    fn test_env_override() {
        assert!(use_color(None, &env(Some("always"), Some("1"), false)));
        assert!(!use_color(None, &env(Some("0"), None, true)));
    }

    #[test]
    fn test_auto_defers() {
        assert!(use_color(None, &env(Some("auto"), None, true)));
        assert!(!use_color(None, &env(Some("auto"), None, false)));
    }

    #[test]
    fn test_no_color() {
        assert!(!use_color(None, &env(None, Some("1"), true)));
        assert!(use_color(None, &env(None, Some(""), true)));
    }

    #[test]
    fn test_tty_default() {
        assert!(use_color(None, &env(None, None, true)));
        assert!(!use_color(None, &env(None, None, false)));
    }
}
