//! Case — one clinical document or patient narrative submitted for processing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document/category kind of a submitted case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    LabReport,
    ImagingScan,
    VitalsMonitor,
    FreeText,
}

impl CaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LabReport => "lab_report",
            Self::ImagingScan => "imaging_scan",
            Self::VitalsMonitor => "vitals_monitor",
            Self::FreeText => "free_text",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "lab_report" => Some(Self::LabReport),
            "imaging_scan" => Some(Self::ImagingScan),
            "vitals_monitor" => Some(Self::VitalsMonitor),
            "free_text" => Some(Self::FreeText),
            _ => None,
        }
    }

    pub fn all() -> &'static [CaseKind] {
        &[
            Self::LabReport,
            Self::ImagingScan,
            Self::VitalsMonitor,
            Self::FreeText,
        ]
    }
}

impl std::fmt::Display for CaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A clinical case awaiting (or having undergone) pipeline processing.
///
/// Immutable after creation — the orchestrator only references it, never
/// mutates it. Upload mechanics and marker extraction happen upstream;
/// `confidence` and `markers` arrive as informational attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: Uuid,
    pub kind: CaseKind,
    pub text: String,
    /// Extraction confidence from the upstream preprocessor (0.0–1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Cosmetic marker tags from upstream — informational only.
    #[serde(default)]
    pub markers: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Case {
    pub fn new(kind: CaseKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text: text.into(),
            confidence: None,
            markers: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_markers(mut self, markers: Vec<String>) -> Self {
        self.markers = markers;
        self
    }
}
