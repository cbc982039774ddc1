//! Deterministic stand-in for the remote pipeline.
//!
//! When the inference service is unreachable, the orchestrator and metrics
//! layer still need numerically well-formed data to aggregate. The generator
//! classifies priority with a keyword heuristic and fills the compression and
//! recommendation stages with fixed reference figures. Same input text, same
//! result — repeated calls are byte-identical.
//!
//! The P1/P2 assignment is a routing default for degraded mode, not a
//! diagnostic claim.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use super::error::PipelineError;
use crate::models::{
    reduction_percentage, CompressionResult, DoctorResult, PipelineResult, PriorityLevel,
    TriageResult,
};

/// Terms signaling a critical/severe/emergency condition.
static URGENCY_LEXICON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)critical|severe|emergency|alert").expect("urgency lexicon regex is valid")
});

/// Reference compression figures for a representative clinical case.
const SYNTHETIC_ORIGINAL_TOKENS: u64 = 1250;
const SYNTHETIC_COMPRESSED_TOKENS: u64 = 87;
const SYNTHETIC_COMPRESSION_MS: u64 = 8;
const SYNTHETIC_RECOMMENDATION_MS: u64 = 24;
const SYNTHETIC_TOTAL_MS: u64 = 32;

const SYNTHETIC_REASON: &str = "Clinical assessment based on submitted text";
const SYNTHETIC_RECOMMENDATION: &str =
    "Review all critical parameters. Consider specialist consultation for complex cases.";

/// Keyword-rule-based generator guaranteeing a well-formed result offline.
pub struct SyntheticGenerator;

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a deterministic result for the given case text.
    ///
    /// Errors only when there is nothing to classify (empty/whitespace-only
    /// input) — the one way the fallback path itself can fail.
    pub fn generate(&self, case_text: &str) -> Result<PipelineResult, PipelineError> {
        if case_text.trim().is_empty() {
            return Err(PipelineError::Generation(
                "case text is empty".to_string(),
            ));
        }

        let is_red_alert = URGENCY_LEXICON.is_match(case_text);
        let priority_level = if is_red_alert {
            PriorityLevel::P1
        } else {
            PriorityLevel::P2
        };

        Ok(PipelineResult {
            compression: CompressionResult {
                original_token_count: SYNTHETIC_ORIGINAL_TOKENS,
                compressed_token_count: SYNTHETIC_COMPRESSED_TOKENS,
                reduction_percentage: reduction_percentage(
                    SYNTHETIC_ORIGINAL_TOKENS,
                    SYNTHETIC_COMPRESSED_TOKENS,
                ),
                compression_time_ms: SYNTHETIC_COMPRESSION_MS,
                compressed_state: json!({ "is_red_alert": is_red_alert }),
            },
            triage: TriageResult {
                priority_level,
                priority_name: priority_level.name().to_string(),
                reason: SYNTHETIC_REASON.to_string(),
            },
            doctor: DoctorResult {
                recommendation: SYNTHETIC_RECOMMENDATION.to_string(),
                processing_time_ms: SYNTHETIC_RECOMMENDATION_MS,
            },
            total_time_ms: SYNTHETIC_TOTAL_MS,
        })
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}
