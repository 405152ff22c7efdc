//! Query the system directory via getent.

use crate::IdentityError;
use pestat_parsers::{non_empty_string, run_command_status};
use tokio::process::Command;

/// getent exit code for "key not found".
const GETENT_NOT_FOUND: i32 = 2;

/// One `passwd` record: `name:passwd:uid:gid:gecos:home:shell`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswdEntry {
    pub name: String,
    pub uid: u32,
    pub gid: u32,
}

/// One `group` record: `name:passwd:gid:member,member,...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub name: String,
    pub gid: u32,
    pub members: Vec<String>,
}

/// Parse a colon-delimited passwd line.
pub fn parse_passwd_line(line: &str) -> Option<PasswdEntry> {
    let fields: Vec<&str> = line.trim().split(':').collect();
    if fields.len() < 4 || fields[0].is_empty() {
        return None;
    }

    Some(PasswdEntry {
        name: fields[0].to_string(),
        uid: fields[2].parse().ok()?,
        gid: fields[3].parse().ok()?,
    })
}

/// Parse a colon-delimited group line.
pub fn parse_group_line(line: &str) -> Option<GroupEntry> {
    let fields: Vec<&str> = line.trim().split(':').collect();
    if fields.len() < 3 || fields[0].is_empty() {
        return None;
    }

    let members = fields
        .get(3)
        .map(|m| {
            m.split(',').filter_map(non_empty_string).collect()
        })
        .unwrap_or_default();

    Some(GroupEntry {
        name: fields[0].to_string(),
        gid: fields[2].parse().ok()?,
        members,
    })
}

/// Parse every record of a passwd table, skipping malformed lines.
pub fn parse_passwd(output: &str) -> Vec<PasswdEntry> {
    output.lines().filter_map(parse_passwd_line).collect()
}

/// Parse every record of a group table, skipping malformed lines.
pub fn parse_group(output: &str) -> Vec<GroupEntry> {
    output.lines().filter_map(parse_group_line).collect()
}

/// Run `getent <database> [key]`.
///
/// Returns None when getent reports the key as missing.
async fn getent(database: &str, key: Option<&str>) -> Result<Option<String>, IdentityError> {
    let mut cmd = Command::new("getent");
    cmd.arg(database);
    if let Some(key) = key {
        cmd.arg(key);
    }

    let output = run_command_status(&mut cmd, "getent").await?;
    if output.success() {
        return Ok(Some(output.stdout));
    }
    match output.code {
        Some(GETENT_NOT_FOUND) => Ok(None),
        code => Err(IdentityError::Lookup {
            database: database.to_string(),
            code,
        }),
    }
}

/// Look up a single user by name.
pub async fn getent_user(name: &str) -> Result<Option<PasswdEntry>, IdentityError> {
    let output = getent("passwd", Some(name)).await?;
    Ok(output.as_deref().and_then(|o| o.lines().find_map(parse_passwd_line)))
}

/// Fetch the whole passwd table.
pub async fn getent_passwd_table() -> Result<Vec<PasswdEntry>, IdentityError> {
    let output = getent("passwd", None).await?;
    Ok(output.as_deref().map(parse_passwd).unwrap_or_default())
}

/// Fetch the whole group table.
pub async fn getent_group_table() -> Result<Vec<GroupEntry>, IdentityError> {
    let output = getent("group", None).await?;
    Ok(output.as_deref().map(parse_group).unwrap_or_default())
}
