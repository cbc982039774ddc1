//! casepipe — batch case-processing orchestrator for a clinical-text
//! compression and triage service.
//!
//! Drives each submitted clinical case through a three-stage remote pipeline
//! (compress → triage → recommend), tracks per-item lifecycle state, and
//! degrades to a deterministic synthetic result when the inference service is
//! unreachable. Every case submitted to the orchestrator resolves to a
//! structurally valid result; only the item-level record reflects whether the
//! resolution was remote or synthetic.
//!
//! Presentation concerns (rendering the item list, charts, styling) live in
//! the consuming application and only read snapshots from this crate.

pub mod config;
pub mod models;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries embedding the crate.
///
/// Respects `RUST_LOG` when set, otherwise falls back to the crate default.
/// Safe to call more than once (later calls are no-ops).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
