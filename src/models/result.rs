//! PipelineResult — the outcome of running a case through the three-stage
//! pipeline (compression → triage → recommendation).
//!
//! The shape mirrors the inference service's JSON payload, so the remote
//! client deserializes straight into these types.

use serde::{Deserialize, Serialize};

/// Ordered urgency classification assigned by the triage stage.
///
/// P1 is the most urgent; comparison follows urgency, so `P1 > P2 > P3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityLevel {
    P1,
    P2,
    P3,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }

    /// Human-readable name matching the triage stage's vocabulary.
    pub fn name(&self) -> &'static str {
        match self {
            Self::P1 => "CRITICAL",
            Self::P2 => "URGENT",
            Self::P3 => "STANDARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "P1" => Some(Self::P1),
            "P2" => Some(Self::P2),
            "P3" => Some(Self::P3),
            _ => None,
        }
    }

    pub fn all() -> &'static [PriorityLevel] {
        &[Self::P1, Self::P2, Self::P3]
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::P1)
    }

    fn urgency(&self) -> u8 {
        match self {
            Self::P1 => 3,
            Self::P2 => 2,
            Self::P3 => 1,
        }
    }
}

impl Ord for PriorityLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.urgency().cmp(&other.urgency())
    }
}

impl PartialOrd for PriorityLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compression stage output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionResult {
    pub original_token_count: u64,
    pub compressed_token_count: u64,
    /// Reduction in percent, 0–100.
    pub reduction_percentage: f64,
    pub compression_time_ms: u64,
    /// Sparse key/value summary of the case. Opaque to the orchestrator —
    /// only the presentation layer interprets it.
    #[serde(default)]
    pub compressed_state: serde_json::Value,
}

/// Triage stage output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    pub priority_level: PriorityLevel,
    pub priority_name: String,
    pub reason: String,
}

/// Recommendation stage output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorResult {
    pub recommendation: String,
    pub processing_time_ms: u64,
}

/// Full outcome of the three-stage pipeline for one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub compression: CompressionResult,
    pub triage: TriageResult,
    pub doctor: DoctorResult,
    pub total_time_ms: u64,
}

impl PipelineResult {
    /// Structural invariants every well-formed result satisfies:
    /// `compressed ≤ original`, reduction within [0, 100], and total latency
    /// at least the largest stage latency. Remote payloads failing this are
    /// treated as malformed.
    pub fn satisfies_invariants(&self) -> bool {
        let c = &self.compression;
        c.compressed_token_count <= c.original_token_count
            && (0.0..=100.0).contains(&c.reduction_percentage)
            && self.total_time_ms >= c.compression_time_ms.max(self.doctor.processing_time_ms)
    }
}

/// Reduction percentage for a token-count pair, `(1 - compressed/original) × 100`,
/// clamped to [0, 100]. Zero original tokens yields 0 rather than a NaN.
pub fn reduction_percentage(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    let pct = (1.0 - compressed as f64 / original as f64) * 100.0;
    pct.clamp(0.0, 100.0)
}
