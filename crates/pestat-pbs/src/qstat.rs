//! Build the job directory from `qstat -a` output.

use crate::types::{JobDirectory, JobRecord};
use pestat_parsers::{CommandError, run_command, strip_server_suffix};
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum QstatError {
    #[error("Failed to query qstat: {0}")]
    Command(#[from] CommandError),
}

/// qstat arguments: alternate (columnar) listing, wide ids.
///
/// Columns: Job ID, Username, Queue, Jobname, SessID, NDS, TSK, ...
const QSTAT_ARGS: [&str; 2] = ["-a", "-w"];

/// Parse a single qstat row.
///
/// Rows are recognized by shape rather than position: at least three
/// tokens and a job id starting with a digit. Server banners, column
/// titles and dashed separators never match.
fn parse_qstat_line(line: &str) -> Option<JobRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }
    if !fields[0].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    Some(JobRecord {
        job_id: strip_server_suffix(fields[0]).to_string(),
        user: fields[1].to_string(),
        queue: fields[2].to_string(),
    })
}

/// Parse the full qstat listing. An idle cluster yields an empty directory.
pub fn parse_qstat(output: &str) -> JobDirectory {
    let directory: JobDirectory = output.lines().filter_map(parse_qstat_line).collect();
    tracing::debug!("qstat: {} jobs in directory", directory.len());
    directory
}

/// Query the job listing with qstat.
pub async fn query_qstat() -> Result<JobDirectory, QstatError> {
    let mut cmd = Command::new("qstat");
    cmd.args(QSTAT_ARGS);

    let stdout = run_command(&mut cmd, "qstat").await?;
    Ok(parse_qstat(&stdout))
}
