//! Per-person export snapshots for Hearth.
//!
//! Builds a versioned JSON document per person: identity summary,
//! derived financial totals, and the ordered account list. This is the
//! one byte-level contract downstream migration tooling depends on.

pub mod builder;
pub mod error;
pub mod snapshot;

pub use builder::ExportService;
pub use error::ExportError;
pub use snapshot::{
    FinancialSummary, PersonSummary, Snapshot, SnapshotAccount, SNAPSHOT_VERSION,
};
