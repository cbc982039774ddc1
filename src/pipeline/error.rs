//! Pipeline error taxonomy.
//!
//! Remote-side variants (`Connection`, `Timeout`, `Transport`, `ServiceStatus`,
//! `ResponseParsing`) are recovered inside [`PipelineClient`] by substituting a
//! synthetic result and never reach the orchestrator. `Generation` is the one
//! per-case failure the orchestrator records; `EmptyBatch` and `RunInProgress`
//! are pre-run rejections.
//!
//! [`PipelineClient`]: super::client::PipelineClient

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Cannot reach inference service at {0}")]
    Connection(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("Inference service returned HTTP {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("Malformed pipeline response: {0}")]
    ResponseParsing(String),

    #[error("Synthetic generation failed: {0}")]
    Generation(String),

    #[error("Batch contains no cases")]
    EmptyBatch,

    #[error("A batch run is already in progress")]
    RunInProgress,
}
