//! Batch case processing.
//!
//! Four modules around one lifecycle:
//! ```text
//! BatchStore (items) → BatchOrchestrator (drive loop) → BatchMetrics (projection)
//!                          └─ CaseProcessor (remote-or-synthetic, ../client.rs)
//! ```
//!
//! The store is the single home of the current run's items; the orchestrator
//! is their only writer; metrics and presentation read cloned snapshots.

pub mod metrics;
pub mod runner;
pub mod store;
pub mod types;

pub use metrics::BatchMetrics;
pub use runner::BatchOrchestrator;
pub use store::{BatchStore, RunGuard};
pub use types::{BatchItem, BatchProgress, BatchRunSummary, BatchStatus};
