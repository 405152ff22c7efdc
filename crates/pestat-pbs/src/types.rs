//! PBS job and node types.

use std::collections::HashMap;

/// Operator-facing node state.
///
/// `Excl` is kept separate so the report can print it, but it renders and
/// flags exactly like `Busy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    Free,
    Busy,
    Excl,
    Offline,
    Down,
    PoweredDown,
    Unknown,
}

impl NodeState {
    /// Classify a raw PBS state string such as `job-exclusive,busy`.
    ///
    /// Each comma separated token goes through [`NodeState::from_token`];
    /// the most severe token wins. Never fails: anything unrecognized is
    /// `Unknown`.
    pub fn classify(raw: &str) -> Self {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Self::from_token)
            .max_by_key(|s| s.severity())
            .unwrap_or(Self::Unknown)
    }

    /// Classify a raw state, letting a `powered-off` power state override it.
    pub fn classify_with_power(raw: &str, power_state: Option<&str>) -> Self {
        match power_state.map(str::trim) {
            Some("powered-off") => Self::PoweredDown,
            _ => Self::classify(raw),
        }
    }

    /// Single-token state table.
    fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "free" => Self::Free,
            "job-busy" | "busy" => Self::Busy,
            "job-exclusive" | "resv-exclusive" | "job-sharing" => Self::Excl,
            "offline" => Self::Offline,
            "down" => Self::Down,
            "state-unknown" | "stale" | "unresolvable" => Self::Unknown,
            "provisioning" | "wait-provisioning" | "sleep" | "maintenance" | "initializing" => {
                Self::Unknown
            }
            _ => Self::Unknown,
        }
    }

    /// Precedence used when a raw state carries several tokens.
    fn severity(&self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Excl => 1,
            Self::Busy => 2,
            Self::Unknown => 3,
            Self::Offline => 4,
            Self::Down => 5,
            Self::PoweredDown => 6,
        }
    }

    /// Short label printed in the state column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Busy => "busy",
            Self::Excl => "excl",
            Self::Offline => "offl",
            Self::Down => "down",
            Self::PoweredDown => "pwrdn",
            Self::Unknown => "UNKN",
        }
    }

    /// States that put a node on the operator's attention list.
    pub fn is_anomalous(&self) -> bool {
        matches!(self, Self::Offline | Self::Down | Self::Unknown)
    }
}

/// One row of the job listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    /// Job id without the server suffix, e.g. `123` or `200[]`
    pub job_id: String,

    /// Job owner
    pub user: String,

    /// Queue the job was submitted to
    pub queue: String,
}

/// Job id -> record lookup built from the job listing.
#[derive(Debug, Clone, Default)]
pub struct JobDirectory {
    jobs: HashMap<String, JobRecord>,
}

impl JobDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. A later row for the same id replaces the earlier one.
    pub fn insert(&mut self, record: JobRecord) {
        self.jobs.insert(record.job_id.clone(), record);
    }

    pub fn get(&self, job_id: &str) -> Option<&JobRecord> {
        self.jobs.get(job_id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl FromIterator<JobRecord> for JobDirectory {
    fn from_iter<I: IntoIterator<Item = JobRecord>>(iter: I) -> Self {
        let mut directory = Self::new();
        for record in iter {
            directory.insert(record);
        }
        directory
    }
}

/// Node information from pbsnodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Node name
    pub name: String,

    /// Literal `state` attribute
    pub raw_state: String,

    /// Classified state, power state already applied
    pub state: NodeState,

    /// `resources_available.ncpus`
    pub cpus: u32,

    /// `resources_available.mem` in KiB
    pub mem_total_kb: u64,

    /// `resources_assigned.mem` in KiB; may exceed the total
    pub mem_assigned_kb: u64,

    /// Distinct job ids in feed order, server and slot suffixes removed
    pub job_ids: Vec<String>,
}

impl NodeRecord {
    /// Number of distinct template ids among the node's jobs.
    pub fn unique_job_count(&self) -> usize {
        crate::jobid::unique_templates(&self.job_ids)
    }
}
