//! Reconciled cluster state for pestat.
//!
//! Joins PBS node records with the job directory, flags anomalies and
//! selects the nodes a report should show.

pub mod palette;
pub mod reconcile;
pub mod select;
pub mod types;

pub use palette::{PaletteError, QueueColor, QueuePalette};
pub use reconcile::{ReconcileContext, annotate_job, memory_pressure_pct, reconcile, reconcile_node};
pub use select::Selection;
pub use types::{
    AnnotatedNode, IdentityTarget, JobAnnotation, NodeFlags, ORPHAN_USER, PRESSURE_FLAG_PCT,
    Severity,
};
