//! Top-level error type rendered by miette.

use camino::Utf8PathBuf;
use miette::Diagnostic;
use pestat_cli::ConfigError;
use pestat_identity::IdentityError;
use pestat_pbs::{PbsnodesError, QstatError};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PestatError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown user: {0}")]
    #[diagnostic(
        code(pestat::unknown_user),
        help("no passwd entry matches this name; check the spelling")
    )]
    UnknownUser(String),

    #[error("Unknown group: {0}")]
    #[diagnostic(
        code(pestat::unknown_group),
        help("no group entry matches this name; check the spelling")
    )]
    UnknownGroup(String),

    #[error("Directory lookup failed")]
    #[diagnostic(code(pestat::directory))]
    Directory(#[source] IdentityError),

    #[error(transparent)]
    #[diagnostic(code(pestat::qstat))]
    Qstat(#[from] QstatError),

    #[error(transparent)]
    #[diagnostic(code(pestat::pbsnodes))]
    Pbsnodes(#[from] PbsnodesError),

    #[error("Failed to read feed file {path}")]
    #[diagnostic(code(pestat::feed_file))]
    FeedFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report")]
    #[diagnostic(code(pestat::output))]
    Output(#[source] std::io::Error),
}

impl From<IdentityError> for PestatError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::UnknownUser(user) => Self::UnknownUser(user),
            IdentityError::UnknownGroup(group) => Self::UnknownGroup(group),
            other => Self::Directory(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_errors_map_to_user_errors() {
        let err: PestatError = IdentityError::UnknownUser("nosuchuser".into()).into();
        assert!(matches!(err, PestatError::UnknownUser(ref u) if u == "nosuchuser"));
        assert_eq!(err.to_string(), "Unknown user: nosuchuser");

        let err: PestatError = IdentityError::UnknownGroup("nogroup".into()).into();
        assert!(matches!(err, PestatError::UnknownGroup(_)));

        let err: PestatError = IdentityError::Lookup {
            database: "group".into(),
            code: Some(1),
        }
        .into();
        assert!(matches!(err, PestatError::Directory(_)));
    }
}
