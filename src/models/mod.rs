//! Domain model for submitted cases and pipeline outcomes.

pub mod case;
pub mod result;

pub use case::{Case, CaseKind};
pub use result::{
    reduction_percentage, CompressionResult, DoctorResult, PipelineResult, PriorityLevel,
    TriageResult,
};
