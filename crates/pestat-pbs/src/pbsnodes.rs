//! Parse node blocks from `pbsnodes -a` output.

use crate::types::{NodeRecord, NodeState};
use pestat_parsers::{
    CommandError, parse_size_kb, run_command, split_attribute, strip_server_suffix,
};
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum PbsnodesError {
    #[error("Failed to query pbsnodes: {0}")]
    Command(#[from] CommandError),
}

/// Attribute names read from each node block.
mod attr {
    pub const STATE: &str = "state";
    pub const MEM_AVAILABLE: &str = "resources_available.mem";
    pub const MEM_ASSIGNED: &str = "resources_assigned.mem";
    pub const NCPUS: &str = "resources_available.ncpus";
    pub const JOBS: &str = "jobs";
    pub const POWER_STATE: &str = "resources_available.pwr_mgt_power_state";
}

/// Attributes collected for one node while its block is open.
#[derive(Debug, Default)]
struct NodeBlock {
    name: String,
    state: Option<String>,
    power_state: Option<String>,
    cpus: Option<String>,
    mem_total: Option<String>,
    mem_assigned: Option<String>,
    jobs: Option<String>,
}

impl NodeBlock {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            attr::STATE => &mut self.state,
            attr::POWER_STATE => &mut self.power_state,
            attr::NCPUS => &mut self.cpus,
            attr::MEM_AVAILABLE => &mut self.mem_total,
            attr::MEM_ASSIGNED => &mut self.mem_assigned,
            attr::JOBS => &mut self.jobs,
            _ => return,
        };
        *slot = Some(value);
    }

    fn finish(self) -> NodeRecord {
        let raw_state = self.state.unwrap_or_default();
        let state = NodeState::classify_with_power(&raw_state, self.power_state.as_deref());

        NodeRecord {
            state,
            cpus: self
                .cpus
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0),
            mem_total_kb: parse_memory(
                &self.name,
                attr::MEM_AVAILABLE,
                self.mem_total.as_deref(),
            ),
            mem_assigned_kb: parse_memory(
                &self.name,
                attr::MEM_ASSIGNED,
                self.mem_assigned.as_deref(),
            ),
            job_ids: self.jobs.as_deref().map(parse_jobs).unwrap_or_default(),
            name: self.name,
            raw_state,
        }
    }
}

/// Missing memory is zero; malformed memory is zero with a warning.
fn parse_memory(node: &str, key: &str, value: Option<&str>) -> u64 {
    let Some(value) = value else {
        return 0;
    };
    parse_size_kb(value).unwrap_or_else(|| {
        tracing::warn!("{}: unparseable {} value {:?}", node, key, value);
        0
    })
}

/// Parse the `jobs` attribute into distinct job ids, keeping feed order.
///
/// Entries are separated by commas and/or whitespace. PBS Pro lists one
/// entry per assigned cpu (`123.server/0, 123.server/1`), so the slot
/// suffix and server suffix are dropped before de-duplication.
pub fn parse_jobs(value: &str) -> Vec<String> {
    let mut job_ids: Vec<String> = Vec::new();
    for entry in value.split(|c: char| c == ',' || c.is_whitespace()) {
        let entry = entry.split('/').next().unwrap_or(entry);
        let id = strip_server_suffix(entry);
        if id.is_empty() || job_ids.iter().any(|seen| seen == id) {
            continue;
        }
        job_ids.push(id.to_string());
    }
    job_ids
}

/// Parse the whole node dump into one record per node block.
///
/// A block opens with an unindented node-name line and closes at a blank
/// line or the next node-name line. Attribute lines outside any block are
/// skipped.
pub fn parse_pbsnodes(output: &str) -> Vec<NodeRecord> {
    let mut nodes = Vec::new();
    let mut current: Option<NodeBlock> = None;

    for line in output.lines() {
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                nodes.push(block.finish());
            }
            continue;
        }

        if !line.starts_with(char::is_whitespace) {
            if let Some(block) = current.take() {
                nodes.push(block.finish());
            }
            current = Some(NodeBlock::new(line.trim()));
            continue;
        }

        match (current.as_mut(), split_attribute(line)) {
            (Some(block), Some((key, value))) => block.set(key, value),
            (Some(_), None) => {}
            (None, _) => {
                tracing::warn!("pbsnodes: attribute line outside a node block: {}", line.trim())
            }
        }
    }

    if let Some(block) = current.take() {
        nodes.push(block.finish());
    }

    tracing::debug!("pbsnodes: parsed {} nodes", nodes.len());
    nodes
}

/// Query every node with pbsnodes.
pub async fn query_pbsnodes() -> Result<Vec<NodeRecord>, PbsnodesError> {
    let mut cmd = Command::new("pbsnodes");
    cmd.arg("-a");

    let stdout = run_command(&mut cmd, "pbsnodes").await?;
    Ok(parse_pbsnodes(&stdout))
}
