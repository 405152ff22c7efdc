//! Array job id normalization.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;

static ARRAY_INDEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]$").unwrap());

/// Collapse an array task id to its template: `200[4]` -> `200[]`.
///
/// Ids without a numeric index, including templates themselves, come back
/// unchanged.
pub fn template_id(job_id: &str) -> Cow<'_, str> {
    ARRAY_INDEX.replace(job_id, "[]")
}

/// True when the id names one task of an array job.
pub fn is_array_instance(job_id: &str) -> bool {
    ARRAY_INDEX.is_match(job_id)
}

/// Count distinct templates, so all tasks of one array job count once.
pub fn unique_templates<S: AsRef<str>>(job_ids: &[S]) -> usize {
    job_ids
        .iter()
        .map(|id| template_id(id.as_ref()))
        .collect::<HashSet<_>>()
        .len()
}
