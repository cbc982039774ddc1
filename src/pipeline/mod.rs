//! The three-stage case pipeline and its batch orchestration.
//!
//! A case resolves through `compress → triage → recommend`, remotely when the
//! inference service answers, synthetically when it does not. The batch layer
//! drives an ordered case sequence through that resolution one item at a time.

pub mod batch;
pub mod client;
pub mod error;
pub mod remote;
pub mod synthetic;

pub use batch::{BatchItem, BatchMetrics, BatchOrchestrator, BatchProgress, BatchRunSummary, BatchStatus, BatchStore};
pub use client::{CaseProcessor, PipelineClient, ProcessedCase, ResultSource};
pub use error::PipelineError;
pub use remote::RemoteInferenceClient;
pub use synthetic::SyntheticGenerator;
