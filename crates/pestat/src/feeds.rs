//! Acquire the job listing, node dump and identity target.

use crate::error::PestatError;
use camino::Utf8Path;
use pestat_cli::{FeedSources, IdentityFilter};
use pestat_pbs::{
    JobDirectory, NodeRecord, parse_pbsnodes, parse_qstat, query_pbsnodes, query_qstat,
};
use pestat_state::IdentityTarget;

async fn read_feed_file(path: &Utf8Path) -> Result<String, PestatError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PestatError::FeedFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Job directory from a snapshot file or a live qstat.
pub async fn load_job_directory(sources: &FeedSources) -> Result<JobDirectory, PestatError> {
    match sources.qstat.as_deref() {
        Some(path) => Ok(parse_qstat(&read_feed_file(path).await?)),
        None => Ok(query_qstat().await?),
    }
}

/// Node records from a snapshot file or a live pbsnodes.
pub async fn load_nodes(sources: &FeedSources) -> Result<Vec<NodeRecord>, PestatError> {
    match sources.pbsnodes.as_deref() {
        Some(path) => Ok(parse_pbsnodes(&read_feed_file(path).await?)),
        None => Ok(query_pbsnodes().await?),
    }
}

/// Look up the user or group a filter names. Only called when a filter is
/// active, so plain runs never touch the directory service.
pub async fn resolve_identity(
    filter: Option<&IdentityFilter>,
) -> Result<Option<IdentityTarget>, PestatError> {
    let target = match filter {
        None => return Ok(None),
        Some(IdentityFilter::User(user)) => {
            pestat_identity::resolve_user(user).await?;
            IdentityTarget::User(user.clone())
        }
        Some(IdentityFilter::Group(group)) => {
            let index = pestat_identity::resolve_group(group).await?;
            IdentityTarget::Group {
                name: group.clone(),
                index,
            }
        }
    };
    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_feed_file() {
        let sources = FeedSources {
            pbsnodes: Some("/nonexistent/pestat/pbsnodes.txt".into()),
            qstat: None,
        };
        let err = load_nodes(&sources).await.unwrap_err();
        assert!(matches!(err, PestatError::FeedFile { .. }));
    }

    #[tokio::test]
    async fn test_no_filter_skips_directory() {
        assert!(resolve_identity(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_user_filter() {
        let filter = IdentityFilter::User("nosuchuser".into());
        let err = resolve_identity(Some(&filter)).await.unwrap_err();
        assert!(matches!(err, PestatError::UnknownUser(_)));
    }
}
