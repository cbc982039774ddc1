//! HTTP client for the remote inference service.
//!
//! One call per case: `POST {base_url}/process` with `{"clinical_text": ...}`,
//! expecting a `PipelineResult` payload back. Each request carries its own
//! timeout. "No response" and "malformed payload" deliberately share one error
//! family — both trigger the same synthetic fallback downstream, and the
//! service contract evidences no retry policy.

use std::time::Duration;

use serde::Serialize;

use super::error::PipelineError;
use crate::config;
use crate::models::PipelineResult;

/// Client for the remote compress → triage → recommend pipeline.
pub struct RemoteInferenceClient {
    base_url: String,
    client: reqwest::Client,
    timeout_ms: u64,
}

/// Request body for `/process`.
#[derive(Serialize)]
struct ProcessRequest<'a> {
    clinical_text: &'a str,
}

impl RemoteInferenceClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_ms,
        }
    }

    /// Client configured from `CASEPIPE_API_URL` (or the local default)
    /// with the standard 5000 ms request timeout.
    pub fn from_env() -> Self {
        Self::new(&config::service_base_url(), config::REQUEST_TIMEOUT_MS)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one case through the remote pipeline.
    pub async fn process_case(&self, case_text: &str) -> Result<PipelineResult, PipelineError> {
        let url = format!("{}/process", self.base_url);
        let body = ProcessRequest {
            clinical_text: case_text,
        };

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    PipelineError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    PipelineError::Timeout(self.timeout_ms)
                } else {
                    PipelineError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PipelineResult = response
            .json()
            .await
            .map_err(|e| PipelineError::ResponseParsing(e.to_string()))?;

        // A payload violating the compression invariants is as unusable as
        // no payload at all.
        if !parsed.satisfies_invariants() {
            return Err(PipelineError::ResponseParsing(
                "token counts violate compression invariants".to_string(),
            ));
        }

        Ok(parsed)
    }
}
