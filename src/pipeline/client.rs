//! PipelineClient — the remote-or-synthetic two-step.
//!
//! Failure of the remote call is not an exceptional path here; it is the
//! explicit first arm of a two-step pipeline: try the service, then fall
//! through to the synthetic generator with the same input. The caller always
//! receives a structurally valid result, tagged with where it came from.
//! Only a generation failure (the fallback itself cannot produce a result)
//! propagates.

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::error::PipelineError;
use super::remote::RemoteInferenceClient;
use super::synthetic::SyntheticGenerator;
use crate::models::PipelineResult;

/// Where a case's result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// The remote inference service responded.
    Remote,
    /// Degraded mode — locally generated stand-in.
    Synthetic,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Synthetic => "synthetic",
        }
    }
}

impl std::fmt::Display for ResultSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A settled case: the pipeline result plus its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedCase {
    pub result: PipelineResult,
    pub source: ResultSource,
}

/// Seam between the orchestrator and whatever resolves a case.
///
/// Production uses [`PipelineClient`]; tests substitute mocks.
pub trait CaseProcessor {
    fn process(
        &self,
        case_text: &str,
    ) -> impl Future<Output = Result<ProcessedCase, PipelineError>> + Send;
}

/// Remote pipeline with deterministic synthetic fallback.
pub struct PipelineClient {
    remote: RemoteInferenceClient,
    synthetic: SyntheticGenerator,
}

impl PipelineClient {
    pub fn new(remote: RemoteInferenceClient) -> Self {
        Self {
            remote,
            synthetic: SyntheticGenerator::new(),
        }
    }

    /// Client against the configured service URL with the standard timeout.
    pub fn from_env() -> Self {
        Self::new(RemoteInferenceClient::from_env())
    }
}

impl CaseProcessor for PipelineClient {
    async fn process(&self, case_text: &str) -> Result<ProcessedCase, PipelineError> {
        match self.remote.process_case(case_text).await {
            Ok(result) => Ok(ProcessedCase {
                result,
                source: ResultSource::Remote,
            }),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Inference service unavailable, generating synthetic result"
                );
                let result = self.synthetic.generate(case_text)?;
                Ok(ProcessedCase {
                    result,
                    source: ResultSource::Synthetic,
                })
            }
        }
    }
}
