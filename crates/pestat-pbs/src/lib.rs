//! PBS integration for pestat.
//!
//! Query the job listing via qstat and node state via pbsnodes.

pub mod jobid;
pub mod pbsnodes;
pub mod qstat;
pub mod types;

pub use jobid::{is_array_instance, template_id, unique_templates};
pub use pbsnodes::{PbsnodesError, parse_pbsnodes, query_pbsnodes};
pub use qstat::{QstatError, parse_qstat, query_qstat};
pub use types::{JobDirectory, JobRecord, NodeRecord, NodeState};
