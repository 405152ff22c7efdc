//! Reconcile node records against the job directory and flag anomalies.

use crate::palette::QueuePalette;
use crate::types::{
    AnnotatedNode, IdentityTarget, JobAnnotation, NodeFlags, PRESSURE_FLAG_PCT, Severity,
};
use pestat_pbs::{JobDirectory, NodeRecord, is_array_instance, template_id};

/// Read-only lookups shared by every node.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileContext<'a> {
    pub directory: &'a JobDirectory,
    pub palette: &'a QueuePalette,
    pub target: Option<&'a IdentityTarget>,
}

/// Percentage of memory assigned, `100 * assigned / (total + 1)`.
///
/// The `+ 1` keeps nodes that report no memory from dividing by zero.
pub fn memory_pressure_pct(assigned_kb: u64, total_kb: u64) -> f64 {
    100.0 * assigned_kb as f64 / (total_kb as f64 + 1.0)
}

/// Resolve one job id through its template.
pub fn annotate_job(job_id: &str, ctx: &ReconcileContext<'_>) -> JobAnnotation {
    let template = template_id(job_id).into_owned();

    match ctx.directory.get(&template) {
        Some(record) => JobAnnotation {
            job_id: job_id.to_string(),
            user: Some(record.user.clone()),
            queue: Some(record.queue.clone()),
            queue_color: ctx.palette.color_for(&record.queue),
            severity: Severity::Ok,
            template_id: template,
        },
        None => {
            let severity = if is_array_instance(job_id) {
                Severity::Info
            } else {
                Severity::Error
            };
            JobAnnotation {
                job_id: job_id.to_string(),
                template_id: template,
                user: None,
                queue: None,
                queue_color: None,
                severity,
            }
        }
    }
}

/// Annotate a single node.
pub fn reconcile_node(node: NodeRecord, ctx: &ReconcileContext<'_>) -> AnnotatedNode {
    let jobs: Vec<JobAnnotation> = node.job_ids.iter().map(|id| annotate_job(id, ctx)).collect();
    let mem_pressure_pct = memory_pressure_pct(node.mem_assigned_kb, node.mem_total_kb);

    let flags = NodeFlags {
        state: node.state.is_anomalous(),
        orphaned_job: jobs.iter().any(|j| j.severity == Severity::Error),
        memory_pressure: mem_pressure_pct > PRESSURE_FLAG_PCT,
    };

    let matches_identity = match ctx.target {
        None => true,
        Some(target) => jobs
            .iter()
            .filter_map(|j| j.user.as_deref())
            .any(|user| target.matches(user)),
    };

    AnnotatedNode {
        node,
        mem_pressure_pct,
        flags,
        jobs,
        matches_identity,
    }
}

/// Annotate every node, keeping feed order.
pub fn reconcile(nodes: Vec<NodeRecord>, ctx: &ReconcileContext<'_>) -> Vec<AnnotatedNode> {
    let annotated: Vec<AnnotatedNode> = nodes
        .into_iter()
        .map(|node| reconcile_node(node, ctx))
        .collect();

    let orphaned = annotated
        .iter()
        .flat_map(|n| &n.jobs)
        .filter(|j| j.is_orphaned())
        .count();
    tracing::debug!(
        "reconciled {} nodes, {} orphaned job references",
        annotated.len(),
        orphaned
    );

    annotated
}
