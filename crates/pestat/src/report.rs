//! Turn parsed feeds into a sorted report.

use pestat_cli::ReportConfig;
use pestat_pbs::{JobDirectory, NodeRecord};
use pestat_report::{Report, Theme};
use pestat_state::{IdentityTarget, ReconcileContext, reconcile};

/// Reconcile, select, render and sort.
pub fn build_report(
    directory: &JobDirectory,
    nodes: Vec<NodeRecord>,
    target: Option<&IdentityTarget>,
    config: &ReportConfig,
) -> Report {
    let ctx = ReconcileContext {
        directory,
        palette: &config.palette,
        target,
    };
    let annotated = reconcile(nodes, &ctx);

    let theme = Theme::new(config.color);
    let mut report = Report::build(&annotated, &config.selection, &theme, &config.render);
    report.sort_by_node();

    tracing::debug!(
        "{} of {} nodes selected, {} flagged",
        report.rows.len(),
        annotated.len(),
        annotated.iter().filter(|n| n.is_flagged()).count()
    );
    report
}
