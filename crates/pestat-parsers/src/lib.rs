//! Shared parsing utilities for PBS command output.
//!
//! This crate provides the helpers used by the job feed, the node feed
//! and the directory lookups so they tokenize input the same way.

pub mod command;
pub mod memory;

pub use command::{CommandError, CommandOutput, run_command, run_command_status};
pub use memory::{KB_PER_GB, kb_to_gb, parse_size_kb};

/// Filter helper for optional string fields.
/// Returns None if the string is empty or a placeholder value.
pub fn non_empty_string(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "--" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split an attribute line of the form `key = value [value...]`.
///
/// The first token is the attribute name, the second is the separator
/// position and everything after it is the value, rejoined with single
/// spaces. Lines with fewer than three tokens yield None.
pub fn split_attribute(line: &str) -> Option<(&str, String)> {
    let mut tokens = line.split_whitespace();
    let key = tokens.next()?;
    let _separator = tokens.next()?;
    let value: Vec<&str> = tokens.collect();
    if value.is_empty() {
        return None;
    }
    Some((key, value.join(" ")))
}

/// Drop the `.server` suffix from a PBS job id: `123[4].pbs01` -> `123[4]`.
pub fn strip_server_suffix(job_id: &str) -> &str {
    job_id.split('.').next().unwrap_or(job_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_string() {
        assert_eq!(non_empty_string("hello"), Some("hello".to_string()));
        assert_eq!(non_empty_string("  hello  "), Some("hello".to_string()));
        assert_eq!(non_empty_string(""), None);
        assert_eq!(non_empty_string("-"), None);
        assert_eq!(non_empty_string("--"), None);
    }

    #[test]
    fn test_split_attribute() {
        assert_eq!(
            split_attribute("     state = free"),
            Some(("state", "free".to_string()))
        );
        assert_eq!(
            split_attribute("  jobs = 1.srv/0,   2.srv/1"),
            Some(("jobs", "1.srv/0, 2.srv/1".to_string()))
        );
        assert_eq!(split_attribute("  jobs ="), None);
        assert_eq!(split_attribute("n001"), None);
    }

    #[test]
    fn test_strip_server_suffix() {
        assert_eq!(strip_server_suffix("100.server"), "100");
        assert_eq!(strip_server_suffix("200[1].pbs.example.org"), "200[1]");
        assert_eq!(strip_server_suffix("300"), "300");
    }
}
