//! CLI argument parsing for pestat.

pub mod color;
pub mod config;

pub use color::{ColorEnv, use_color};
pub use config::{ConfigError, FeedSources, IdentityFilter, ReportConfig};

use camino::Utf8PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pestat")]
#[command(version)]
#[command(about = "One-line-per-node summary of a PBS cluster")]
pub struct Args {
    /// Show the owner next to each job id
    #[arg(short = 'u', long)]
    pub show_users: bool,

    /// Only list flagged nodes (bad state, orphaned job, memory pressure)
    #[arg(short, long)]
    pub flagged: bool,

    /// Include nodes that are down
    #[arg(short, long)]
    pub down: bool,

    /// Force colored output
    #[arg(short, long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(short, long)]
    pub no_color: bool,

    /// Only list nodes running jobs of this user
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// Only list nodes running jobs of members of this group
    #[arg(long, value_name = "GROUP")]
    pub group: Option<String>,

    /// Only list nodes with at least this many distinct jobs
    #[arg(short, long, value_name = "N", default_value = "0")]
    pub min_jobs: usize,

    /// JSON file mapping queue names to colors
    #[arg(long, value_name = "FILE")]
    pub queue_colors: Option<Utf8PathBuf>,

    /// Read the node dump from a file instead of running pbsnodes
    #[arg(long, value_name = "FILE")]
    pub pbsnodes_file: Option<Utf8PathBuf>,

    /// Read the job listing from a file instead of running qstat
    #[arg(long, value_name = "FILE")]
    pub qstat_file: Option<Utf8PathBuf>,
}

impl Args {
    /// Explicit color choice from the command line, if any.
    pub fn color_flag(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["pestat"]).unwrap();
        assert!(!args.show_users);
        assert!(!args.flagged);
        assert!(!args.down);
        assert_eq!(args.min_jobs, 0);
        assert_eq!(args.color_flag(), None);
    }

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from(["pestat", "-u", "-f", "-d", "-m", "3", "-n"]).unwrap();
        assert!(args.show_users);
        assert!(args.flagged);
        assert!(args.down);
        assert_eq!(args.min_jobs, 3);
        assert_eq!(args.color_flag(), Some(false));
    }

    #[test]
    fn test_color_flags_conflict() {
        assert!(Args::try_parse_from(["pestat", "--color", "--no-color"]).is_err());
    }

    #[test]
    fn test_extraneous_argument_rejected() {
        assert!(Args::try_parse_from(["pestat", "stray"]).is_err());
        assert!(Args::try_parse_from(["pestat", "--min-jobs", "many"]).is_err());
    }

    #[test]
    fn test_user_and_group_parse_together() {
        // the conflict is reported by ReportConfig, not clap
        let args = Args::try_parse_from(["pestat", "--user", "a", "--group", "b"]).unwrap();
        assert_eq!(args.user.as_deref(), Some("a"));
        assert_eq!(args.group.as_deref(), Some("b"));
    }
}
