//! BatchOrchestrator — drives cases through the pipeline one at a time.
//!
//! Strictly sequential over the input order: it mirrors a single-clinician
//! intake queue and bounds load on the inference service. The only suspension
//! point is the processor's remote call; an item settles before the next one
//! starts, so consumers never observe out-of-order completion.

use std::sync::Arc;
use std::time::Instant;

use super::store::BatchStore;
use super::types::{BatchProgress, BatchRunSummary};
use crate::models::Case;
use crate::pipeline::client::CaseProcessor;
use crate::pipeline::error::PipelineError;

/// Orchestrates a full batch run over a case sequence.
pub struct BatchOrchestrator<P: CaseProcessor> {
    processor: P,
    store: Arc<BatchStore>,
}

impl<P: CaseProcessor> BatchOrchestrator<P> {
    pub fn new(processor: P, store: Arc<BatchStore>) -> Self {
        Self { processor, store }
    }

    /// The store backing this orchestrator, for snapshot/metrics readers.
    pub fn store(&self) -> Arc<BatchStore> {
        Arc::clone(&self.store)
    }

    /// Whether a run is currently in progress.
    pub fn is_running(&self) -> bool {
        self.store.is_running()
    }

    /// Process `cases` in order, one at a time.
    ///
    /// Creates one pending item per case, then advances each through
    /// `processing → complete | error`. A per-case failure is recorded on its
    /// item and the loop continues — one case never aborts the batch.
    /// `progress_fn` is invoked with fresh counts after every transition.
    ///
    /// Rejected before any item is touched when `cases` is empty
    /// (`EmptyBatch`) or another run is active (`RunInProgress`).
    pub async fn run_batch(
        &self,
        cases: &[Case],
        progress_fn: Option<&dyn Fn(BatchProgress)>,
    ) -> Result<BatchRunSummary, PipelineError> {
        if cases.is_empty() {
            return Err(PipelineError::EmptyBatch);
        }

        let Some(_guard) = self.store.try_begin_run(cases) else {
            tracing::info!("Batch run already in progress, ignoring repeat invocation");
            return Err(PipelineError::RunInProgress);
        };

        let start = Instant::now();
        tracing::info!(cases = cases.len(), "Starting batch run");

        let mut summary = BatchRunSummary::empty();
        summary.total_cases = cases.len() as u32;

        for (index, case) in cases.iter().enumerate() {
            self.store.mark_processing(index);
            self.emit(progress_fn);

            match self.processor.process(&case.text).await {
                Ok(processed) => {
                    tracing::debug!(
                        case_id = %case.id,
                        kind = case.kind.as_str(),
                        source = processed.source.as_str(),
                        priority = processed.result.triage.priority_level.as_str(),
                        "Case settled"
                    );
                    self.store.mark_complete(index, processed);
                    summary.completed += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        case_id = %case.id,
                        error = %e,
                        "Case failed, continuing batch"
                    );
                    self.store.mark_error(index, e.to_string());
                    summary.failed += 1;
                }
            }

            self.emit(progress_fn);
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            completed = summary.completed,
            failed = summary.failed,
            duration_ms = summary.duration_ms,
            "Batch run finished"
        );

        Ok(summary)
    }

    fn emit(&self, progress_fn: Option<&dyn Fn(BatchProgress)>) {
        if let Some(progress) = progress_fn {
            progress(self.store.progress());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::models::{CaseKind, PriorityLevel};
    use crate::pipeline::batch::metrics::BatchMetrics;
    use crate::pipeline::batch::types::BatchStatus;
    use crate::pipeline::client::{ProcessedCase, ResultSource};
    use crate::pipeline::synthetic::SyntheticGenerator;

    /// Mock processor: synthetic results for every case, except texts
    /// containing the poison word, which fail like a broken generator.
    struct MockProcessor {
        poison: Option<&'static str>,
    }

    impl MockProcessor {
        fn reliable() -> Self {
            Self { poison: None }
        }

        fn poisoned_by(word: &'static str) -> Self {
            Self { poison: Some(word) }
        }
    }

    impl CaseProcessor for MockProcessor {
        async fn process(&self, case_text: &str) -> Result<ProcessedCase, PipelineError> {
            if let Some(word) = self.poison {
                if case_text.contains(word) {
                    return Err(PipelineError::Generation(format!(
                        "refusing text containing {word:?}"
                    )));
                }
            }
            let result = SyntheticGenerator::new().generate(case_text)?;
            Ok(ProcessedCase {
                result,
                source: ResultSource::Synthetic,
            })
        }
    }

    fn make_cases(texts: &[&str]) -> Vec<Case> {
        texts
            .iter()
            .map(|t| Case::new(CaseKind::FreeText, *t))
            .collect()
    }

    fn orchestrator(processor: MockProcessor) -> BatchOrchestrator<MockProcessor> {
        BatchOrchestrator::new(processor, Arc::new(BatchStore::new()))
    }

    #[tokio::test]
    async fn one_item_per_case_in_input_order() {
        let orch = orchestrator(MockProcessor::reliable());
        let cases = make_cases(&["first case", "second case", "third case"]);

        let summary = orch.run_batch(&cases, None).await.unwrap();
        assert_eq!(summary.total_cases, 3);
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.failed, 0);

        let items = orch.store().snapshot();
        assert_eq!(items.len(), 3);
        for (item, case) in items.iter().zip(&cases) {
            assert_eq!(item.case.id, case.id);
            assert!(item.status.is_terminal());
            assert!(item.started_at.unwrap() <= item.finished_at.unwrap());
        }
    }

    #[tokio::test]
    async fn empty_batch_rejected_before_run() {
        let orch = orchestrator(MockProcessor::reliable());
        let err = orch.run_batch(&[], None).await.unwrap_err();
        assert!(matches!(err, PipelineError::EmptyBatch));
        assert!(!orch.is_running());
    }

    /// Scenario A: remote unreachable for all four cases — every item still
    /// completes via the synthetic fallback.
    #[tokio::test]
    async fn all_fallback_batch_completes_fully() {
        let orch = orchestrator(MockProcessor::reliable());
        let cases = make_cases(&["a", "b", "c", "d"]);

        orch.run_batch(&cases, None).await.unwrap();

        let items = orch.store().snapshot();
        assert!(items.iter().all(|i| i.status == BatchStatus::Complete));
        assert!(items.iter().all(|i| i.source == Some(ResultSource::Synthetic)));

        let metrics = BatchMetrics::compute(&items);
        assert_eq!(metrics.success_rate, 100.0);
        assert_eq!(metrics.error_cases, 0);
    }

    /// Scenario B: the fallback generator itself fails on case #3 — siblings
    /// keep their results, success rate lands at 75%.
    #[tokio::test]
    async fn single_failure_never_aborts_batch() {
        let orch = orchestrator(MockProcessor::poisoned_by("malformed"));
        let cases = make_cases(&["one", "two", "malformed three", "four"]);

        let summary = orch.run_batch(&cases, None).await.unwrap();
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.failed, 1);

        let items = orch.store().snapshot();
        assert_eq!(items[0].status, BatchStatus::Complete);
        assert_eq!(items[1].status, BatchStatus::Complete);
        assert_eq!(items[2].status, BatchStatus::Error);
        assert!(items[2].result.is_none());
        assert!(items[2].error.as_ref().unwrap().contains("malformed"));
        assert_eq!(items[3].status, BatchStatus::Complete);

        let metrics = BatchMetrics::compute(&items);
        assert_eq!(metrics.success_rate, 75.0);
    }

    /// Scenario C: urgency lexicon routes through to the critical-case count.
    #[tokio::test]
    async fn critical_case_reaches_metrics() {
        let orch = orchestrator(MockProcessor::reliable());
        let cases = make_cases(&["patient in critical condition"]);

        orch.run_batch(&cases, None).await.unwrap();

        let items = orch.store().snapshot();
        assert_eq!(
            items[0].result.as_ref().unwrap().triage.priority_level,
            PriorityLevel::P1
        );
        assert_eq!(BatchMetrics::compute(&items).critical_case_count, 1);
    }

    /// Scenario D: a second invocation while a run is active is rejected and
    /// leaves the in-flight item set untouched.
    #[tokio::test]
    async fn reentrant_run_rejected_without_corruption() {
        let store = Arc::new(BatchStore::new());
        let orch = BatchOrchestrator::new(MockProcessor::reliable(), Arc::clone(&store));

        let in_flight = make_cases(&["held case"]);
        let _guard = store.try_begin_run(&in_flight).unwrap();

        let err = orch
            .run_batch(&make_cases(&["intruder"]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::RunInProgress));

        let items = store.snapshot();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].case.id, in_flight[0].id);
        assert_eq!(items[0].status, BatchStatus::Pending);
    }

    #[tokio::test]
    async fn progress_emitted_after_every_transition() {
        let orch = orchestrator(MockProcessor::reliable());
        let cases = make_cases(&["a", "b"]);

        let observed: RefCell<Vec<BatchProgress>> = RefCell::new(Vec::new());
        let record = |p: BatchProgress| observed.borrow_mut().push(p);
        let progress_fn: &dyn Fn(BatchProgress) = &record;
        orch.run_batch(&cases, Some(progress_fn)).await.unwrap();

        let observed = observed.into_inner();
        // Two transitions per item: → processing, → terminal.
        assert_eq!(observed.len(), 4);
        assert_eq!(observed[0].processing, 1);
        assert_eq!(observed[1].complete, 1);
        assert_eq!(observed[3].complete, 2);
        // Settled counts never decrease.
        for pair in observed.windows(2) {
            assert!(pair[1].settled() >= pair[0].settled());
        }
    }

    #[tokio::test]
    async fn run_flag_clears_after_completion() {
        let orch = orchestrator(MockProcessor::reliable());
        orch.run_batch(&make_cases(&["a"]), None).await.unwrap();
        assert!(!orch.is_running());
        // A fresh run replaces the previous item set.
        orch.run_batch(&make_cases(&["x", "y"]), None).await.unwrap();
        assert_eq!(orch.store().snapshot().len(), 2);
    }
}
