//! Selection predicates over annotated nodes.

use crate::types::AnnotatedNode;
use pestat_pbs::NodeState;

/// Active filters. Every predicate must hold for a node to be emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Keep nodes classified `down`
    pub include_down: bool,
    /// Minimum number of distinct template jobs
    pub min_jobs: usize,
    /// Drop nodes that aren't flagged
    pub flagged_only: bool,
}

pub fn passes_down_filter(node: &AnnotatedNode, include_down: bool) -> bool {
    include_down || node.state() != NodeState::Down
}

pub fn passes_min_jobs(node: &AnnotatedNode, min_jobs: usize) -> bool {
    node.unique_job_count() >= min_jobs
}

pub fn passes_flagged_only(node: &AnnotatedNode, flagged_only: bool) -> bool {
    !flagged_only || node.is_flagged()
}

/// The identity match is computed during reconciliation; with no user or
/// group filter it is always true.
pub fn passes_identity(node: &AnnotatedNode) -> bool {
    node.matches_identity
}

impl Selection {
    pub fn keeps(&self, node: &AnnotatedNode) -> bool {
        passes_down_filter(node, self.include_down)
            && passes_min_jobs(node, self.min_jobs)
            && passes_identity(node)
            && passes_flagged_only(node, self.flagged_only)
    }

    /// Nodes that pass every predicate, in input order.
    pub fn apply<'a>(
        &'a self,
        nodes: &'a [AnnotatedNode],
    ) -> impl Iterator<Item = &'a AnnotatedNode> + 'a {
        nodes.iter().filter(move |n| self.keeps(n))
    }
}
