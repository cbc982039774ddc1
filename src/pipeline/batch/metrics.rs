//! BatchMetrics — pure derived view over a batch item snapshot.
//!
//! Owns no state, never errors, defined for the empty set. Items still
//! pending or processing count against the success-rate denominator but
//! contribute nothing to the compression aggregates.

use serde::Serialize;

use crate::config;
use crate::models::PipelineResult;

use super::types::{BatchItem, BatchStatus};

/// Cross-batch statistics for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchMetrics {
    pub total_cases: u32,
    pub completed_cases: u32,
    pub error_cases: u32,
    /// `complete / total` over all items, as a percentage. 0 when empty.
    pub success_rate: f64,
    pub avg_reduction_percentage: f64,
    pub min_reduction_percentage: f64,
    pub max_reduction_percentage: f64,
    pub avg_total_time_ms: f64,
    /// Per-item `original - compressed`, clamped at 0, summed.
    pub total_tokens_saved: u64,
    /// Items whose triage priority is P1.
    pub critical_case_count: u32,
    /// Tokens saved × the fixed per-token rate. Presentation convenience.
    pub estimated_savings_usd: f64,
}

impl BatchMetrics {
    pub fn empty() -> Self {
        Self {
            total_cases: 0,
            completed_cases: 0,
            error_cases: 0,
            success_rate: 0.0,
            avg_reduction_percentage: 0.0,
            min_reduction_percentage: 0.0,
            max_reduction_percentage: 0.0,
            avg_total_time_ms: 0.0,
            total_tokens_saved: 0,
            critical_case_count: 0,
            estimated_savings_usd: 0.0,
        }
    }

    /// Compute metrics for an item snapshot. Pure: identical snapshots yield
    /// identical metrics.
    pub fn compute(items: &[BatchItem]) -> Self {
        let total = items.len() as u32;
        let error_cases = items
            .iter()
            .filter(|i| i.status == BatchStatus::Error)
            .count() as u32;

        let results: Vec<&PipelineResult> = items
            .iter()
            .filter(|i| i.status == BatchStatus::Complete)
            .filter_map(|i| i.result.as_ref())
            .collect();
        let completed = results.len() as u32;

        let mut metrics = Self::empty();
        metrics.total_cases = total;
        metrics.completed_cases = completed;
        metrics.error_cases = error_cases;

        if total > 0 {
            metrics.success_rate = f64::from(completed) / f64::from(total) * 100.0;
        }

        if results.is_empty() {
            return metrics;
        }

        let reductions: Vec<f64> = results
            .iter()
            .map(|r| r.compression.reduction_percentage)
            .collect();
        metrics.avg_reduction_percentage =
            reductions.iter().sum::<f64>() / reductions.len() as f64;
        metrics.min_reduction_percentage = reductions.iter().copied().fold(f64::MAX, f64::min);
        metrics.max_reduction_percentage = reductions.iter().copied().fold(f64::MIN, f64::max);

        metrics.avg_total_time_ms = results
            .iter()
            .map(|r| r.total_time_ms as f64)
            .sum::<f64>()
            / results.len() as f64;

        metrics.total_tokens_saved = results
            .iter()
            .map(|r| {
                r.compression
                    .original_token_count
                    .saturating_sub(r.compression.compressed_token_count)
            })
            .sum();

        metrics.critical_case_count = results
            .iter()
            .filter(|r| r.triage.priority_level.is_critical())
            .count() as u32;

        metrics.estimated_savings_usd =
            metrics.total_tokens_saved as f64 * config::COST_PER_TOKEN_USD;

        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Case, CaseKind};
    use crate::pipeline::batch::types::BatchItem;
    use crate::pipeline::client::{ProcessedCase, ResultSource};
    use crate::pipeline::synthetic::SyntheticGenerator;

    fn completed_item(text: &str) -> BatchItem {
        let mut item = BatchItem::pending(Case::new(CaseKind::FreeText, text));
        item.begin();
        item.complete(ProcessedCase {
            result: SyntheticGenerator::new().generate(text).unwrap(),
            source: ResultSource::Synthetic,
        });
        item
    }

    fn failed_item(text: &str) -> BatchItem {
        let mut item = BatchItem::pending(Case::new(CaseKind::FreeText, text));
        item.begin();
        item.fail("generator refused".to_string());
        item
    }

    #[test]
    fn empty_snapshot_yields_zeroed_metrics() {
        let metrics = BatchMetrics::compute(&[]);
        assert_eq!(metrics, BatchMetrics::empty());
        assert_eq!(metrics.success_rate, 0.0);
        assert!(metrics.success_rate.is_finite());
    }

    #[test]
    fn compute_is_idempotent() {
        let items = vec![completed_item("stable"), failed_item("broken")];
        assert_eq!(BatchMetrics::compute(&items), BatchMetrics::compute(&items));
    }

    #[test]
    fn all_error_snapshot_stays_finite() {
        let items = vec![failed_item("a"), failed_item("b")];
        let metrics = BatchMetrics::compute(&items);
        assert_eq!(metrics.success_rate, 0.0);
        assert_eq!(metrics.error_cases, 2);
        assert_eq!(metrics.avg_reduction_percentage, 0.0);
        assert_eq!(metrics.total_tokens_saved, 0);
    }

    #[test]
    fn unsettled_items_count_against_denominator() {
        let mut items = vec![completed_item("done")];
        items.push(BatchItem::pending(Case::new(CaseKind::FreeText, "waiting")));
        let mut processing = BatchItem::pending(Case::new(CaseKind::FreeText, "running"));
        processing.begin();
        items.push(processing);

        let metrics = BatchMetrics::compute(&items);
        assert_eq!(metrics.total_cases, 3);
        assert_eq!(metrics.completed_cases, 1);
        assert!((metrics.success_rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn compression_aggregates_over_completed_items() {
        let items = vec![completed_item("a"), completed_item("b"), failed_item("c")];
        let metrics = BatchMetrics::compute(&items);

        // Synthetic figures: 1250 → 87 per item, 32 ms total.
        assert!((metrics.avg_reduction_percentage - 93.04).abs() < 0.01);
        assert_eq!(metrics.min_reduction_percentage, metrics.max_reduction_percentage);
        assert_eq!(metrics.avg_total_time_ms, 32.0);
        assert_eq!(metrics.total_tokens_saved, 2 * (1250 - 87));
    }

    #[test]
    fn critical_count_tracks_p1_triage() {
        let items = vec![
            completed_item("critical potassium"),
            completed_item("routine follow-up"),
        ];
        let metrics = BatchMetrics::compute(&items);
        assert_eq!(metrics.critical_case_count, 1);
    }

    #[test]
    fn estimated_savings_is_linear_in_tokens_saved() {
        let items = vec![completed_item("a")];
        let metrics = BatchMetrics::compute(&items);
        let expected = (1250 - 87) as f64 * crate::config::COST_PER_TOKEN_USD;
        assert!((metrics.estimated_savings_usd - expected).abs() < 1e-12);
    }

    #[test]
    fn success_rate_expressed_as_percentage() {
        let items = vec![
            completed_item("a"),
            completed_item("b"),
            completed_item("c"),
            failed_item("d"),
        ];
        assert_eq!(BatchMetrics::compute(&items).success_rate, 75.0);
    }
}
