//! Core types for the batch processing lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Case, PipelineResult};
use crate::pipeline::client::{ProcessedCase, ResultSource};

/// Per-item state machine: `pending → processing → {complete | error}`.
/// Terminal states are never left within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Pending,
    Processing,
    Complete,
    Error,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "complete" => Some(Self::Complete),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Processing record pairing a case with its status and, once settled,
/// its result or error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub case: Case,
    pub status: BatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PipelineResult>,
    /// Whether the result came from the service or the synthetic fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ResultSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchItem {
    pub fn pending(case: Case) -> Self {
        Self {
            case,
            status: BatchStatus::Pending,
            result: None,
            source: None,
            error: None,
            started_at: None,
            finished_at: None,
        }
    }

    pub(crate) fn begin(&mut self) {
        self.status = BatchStatus::Processing;
        self.started_at = Some(Utc::now());
    }

    pub(crate) fn complete(&mut self, processed: ProcessedCase) {
        self.status = BatchStatus::Complete;
        self.result = Some(processed.result);
        self.source = Some(processed.source);
        self.finished_at = Some(Utc::now());
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.status = BatchStatus::Error;
        self.error = Some(message);
        self.finished_at = Some(Utc::now());
    }
}

/// Status counts refreshed after every per-item transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchProgress {
    pub pending: u32,
    pub processing: u32,
    pub complete: u32,
    pub error: u32,
}

impl BatchProgress {
    pub fn of(items: &[BatchItem]) -> Self {
        let mut progress = Self::default();
        for item in items {
            match item.status {
                BatchStatus::Pending => progress.pending += 1,
                BatchStatus::Processing => progress.processing += 1,
                BatchStatus::Complete => progress.complete += 1,
                BatchStatus::Error => progress.error += 1,
            }
        }
        progress
    }

    pub fn total(&self) -> u32 {
        self.pending + self.processing + self.complete + self.error
    }

    pub fn settled(&self) -> u32 {
        self.complete + self.error
    }
}

/// Outcome summary of one full batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRunSummary {
    pub total_cases: u32,
    pub completed: u32,
    pub failed: u32,
    pub duration_ms: u64,
}

impl BatchRunSummary {
    pub fn empty() -> Self {
        Self {
            total_cases: 0,
            completed: 0,
            failed: 0,
            duration_ms: 0,
        }
    }
}
