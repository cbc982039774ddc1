//! BatchStore — owned, explicitly-scoped home of the current run's items.
//!
//! Single-writer discipline: only the orchestrator (holding the run guard)
//! mutates items; every other consumer reads cloned snapshots, so observed
//! state is always fully settled. The run guard also rejects overlapping
//! `run_batch` invocations — observable batch identity never mixes two runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::models::Case;
use crate::pipeline::client::ProcessedCase;

use super::types::{BatchItem, BatchProgress};

/// In-memory store for the current batch's items.
pub struct BatchStore {
    items: Mutex<Vec<BatchItem>>,
    running: AtomicBool,
}

impl BatchStore {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            running: AtomicBool::new(false),
        }
    }

    /// Begin a new run over `cases`, replacing any previous run's items.
    ///
    /// Returns `None` if a run is already active — the item set stays
    /// untouched in that case. The returned guard marks the run finished
    /// when dropped.
    pub fn try_begin_run(&self, cases: &[Case]) -> Option<RunGuard<'_>> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        if let Ok(mut items) = self.items.lock() {
            *items = cases.iter().cloned().map(BatchItem::pending).collect();
        }

        Some(RunGuard { store: self })
    }

    /// Is a batch run currently in progress?
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Cloned snapshot of the current items, in case order.
    pub fn snapshot(&self) -> Vec<BatchItem> {
        self.items
            .lock()
            .map(|items| items.clone())
            .unwrap_or_default()
    }

    /// Status counts for the current items.
    pub fn progress(&self) -> BatchProgress {
        self.items
            .lock()
            .map(|items| BatchProgress::of(&items))
            .unwrap_or_default()
    }

    // ── Writer operations (orchestrator only) ───────────────

    pub(crate) fn mark_processing(&self, index: usize) {
        if let Ok(mut items) = self.items.lock() {
            if let Some(item) = items.get_mut(index) {
                item.begin();
            }
        }
    }

    pub(crate) fn mark_complete(&self, index: usize, processed: ProcessedCase) {
        if let Ok(mut items) = self.items.lock() {
            if let Some(item) = items.get_mut(index) {
                item.complete(processed);
            }
        }
    }

    pub(crate) fn mark_error(&self, index: usize, message: String) {
        if let Ok(mut items) = self.items.lock() {
            if let Some(item) = items.get_mut(index) {
                item.fail(message);
            }
        }
    }
}

impl Default for BatchStore {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII token for an active batch run.
///
/// Dropping the guard marks the store idle again; the settled items remain
/// readable until the next run replaces them.
pub struct RunGuard<'a> {
    store: &'a BatchStore,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.store.running.store(false, Ordering::Release);
    }
}
