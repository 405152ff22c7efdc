//! Annotated node types produced by reconciliation.

use crate::palette::QueueColor;
use pestat_identity::GroupIndex;
use pestat_pbs::{NodeRecord, NodeState};

/// Username shown for a job the job listing doesn't know about.
pub const ORPHAN_USER: &str = "NONE*";

/// Memory pressure above this percentage flags the node.
pub const PRESSURE_FLAG_PCT: f64 = 50.0;

/// How worrying a job annotation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Resolved through the job directory
    Ok,
    /// Orphaned array task; its template just hasn't shown up in qstat yet
    Info,
    /// Orphaned singleton job
    Error,
}

/// One job bound to a node, resolved against the job directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobAnnotation {
    /// Instance id as listed on the node, e.g. `200[4]`
    pub job_id: String,

    /// Template id used for lookup, e.g. `200[]`
    pub template_id: String,

    /// Owner from the job directory, None when orphaned
    pub user: Option<String>,

    /// Queue from the job directory, None when orphaned
    pub queue: Option<String>,

    /// Palette color of the queue, if it has one
    pub queue_color: Option<QueueColor>,

    pub severity: Severity,
}

impl JobAnnotation {
    pub fn is_orphaned(&self) -> bool {
        self.user.is_none()
    }

    pub fn is_array_instance(&self) -> bool {
        pestat_pbs::is_array_instance(&self.job_id)
    }

    /// Owner, or the orphan sentinel.
    pub fn display_user(&self) -> &str {
        self.user.as_deref().unwrap_or(ORPHAN_USER)
    }
}

/// Why a node is on the attention list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeFlags {
    /// State is offl, down or UNKN
    pub state: bool,
    /// At least one orphaned singleton job
    pub orphaned_job: bool,
    /// Memory pressure above [`PRESSURE_FLAG_PCT`]
    pub memory_pressure: bool,
}

impl NodeFlags {
    pub fn any(&self) -> bool {
        self.state || self.orphaned_job || self.memory_pressure
    }
}

/// Node record plus everything derived from it.
#[derive(Debug, Clone)]
pub struct AnnotatedNode {
    pub node: NodeRecord,

    /// `100 * assigned / (total + 1)`
    pub mem_pressure_pct: f64,

    pub flags: NodeFlags,

    /// One entry per job id, in node order
    pub jobs: Vec<JobAnnotation>,

    /// Whether any job belongs to the selected user or group. Always true
    /// when no identity filter is active.
    pub matches_identity: bool,
}

impl AnnotatedNode {
    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn state(&self) -> NodeState {
        self.node.state
    }

    pub fn is_flagged(&self) -> bool {
        self.flags.any()
    }

    pub fn unique_job_count(&self) -> usize {
        self.node.unique_job_count()
    }

    /// Whole percentage shown in the report. Rounded up, so it exceeds 50
    /// exactly when `mem_pressure_pct` does.
    pub fn mem_pressure_display(&self) -> u64 {
        self.mem_pressure_pct.ceil() as u64
    }
}

/// Identity a user or group filter selects on.
#[derive(Debug, Clone)]
pub enum IdentityTarget {
    User(String),
    Group { name: String, index: GroupIndex },
}

impl IdentityTarget {
    /// True when `user` is the target user or a member of the target group.
    pub fn matches(&self, user: &str) -> bool {
        match self {
            Self::User(target) => target == user,
            Self::Group { name, index } => index.is_member(user, name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pestat_identity::getent::{parse_group, parse_passwd};

    fn annotation(job_id: &str, template_id: &str, user: Option<&str>) -> JobAnnotation {
        JobAnnotation {
            job_id: job_id.to_string(),
            template_id: template_id.to_string(),
            user: user.map(str::to_string),
            queue: None,
            queue_color: None,
            severity: Severity::Ok,
        }
    }

    #[test]
    fn test_display_user() {
        assert_eq!(annotation("1", "1", Some("alice")).display_user(), "alice");
        assert_eq!(annotation("1", "1", None).display_user(), ORPHAN_USER);
    }

    #[test]
    fn test_array_instance() {
        assert!(annotation("2[1]", "2[]", None).is_array_instance());
        assert!(!annotation("2", "2", None).is_array_instance());
    }

    #[test]
    fn test_flags_any() {
        assert!(!NodeFlags::default().any());
        let flags = NodeFlags {
            memory_pressure: true,
            ..NodeFlags::default()
        };
        assert!(flags.any());
    }

    #[test]
    fn test_identity_target_matches() {
        let user = IdentityTarget::User("alice".into());
        assert!(user.matches("alice"));
        assert!(!user.matches("bob"));

        let groups = parse_group("lab:x:500:bob\n");
        let users = parse_passwd("carol:x:3:500::/:/bin/sh\n");
        let group = IdentityTarget::Group {
            name: "lab".into(),
            index: GroupIndex::build(&groups, &users),
        };
        assert!(group.matches("bob"));
        assert!(group.matches("carol"));
        assert!(!group.matches("alice"));
    }
}
