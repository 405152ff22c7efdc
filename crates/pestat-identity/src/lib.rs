//! User and group resolution for pestat's selection filters.
//!
//! Lookups run only when a filter asks for them, so a plain report never
//! touches the directory service.

pub mod getent;
pub mod index;

pub use getent::{GroupEntry, PasswdEntry};
pub use index::GroupIndex;

use pestat_parsers::CommandError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),
    #[error("Unknown group: {0}")]
    UnknownGroup(String),
    #[error("getent {database} failed with exit code {code:?}")]
    Lookup { database: String, code: Option<i32> },
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Confirm that `name` exists in the passwd database.
pub async fn resolve_user(name: &str) -> Result<PasswdEntry, IdentityError> {
    let entry = getent::getent_user(name).await?;
    entry.ok_or_else(|| IdentityError::UnknownUser(name.to_string()))
}

/// Scan the group and passwd tables and index them for `group`.
pub async fn resolve_group(group: &str) -> Result<GroupIndex, IdentityError> {
    let groups = getent::getent_group_table().await?;
    let users = getent::getent_passwd_table().await?;
    index_group(group, &groups, &users)
}

/// Build the index, failing when `group` is not one of the scanned groups.
pub fn index_group(
    group: &str,
    groups: &[GroupEntry],
    users: &[PasswdEntry],
) -> Result<GroupIndex, IdentityError> {
    let index = GroupIndex::build(groups, users);
    if !index.has_group(group) {
        return Err(IdentityError::UnknownGroup(group.to_string()));
    }
    tracing::debug!(
        "group {}: {} members",
        group,
        index.members_of(group).len()
    );
    Ok(index)
}
