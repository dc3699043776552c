//! The check orchestrator: one run of the batched link checker.
//!
//! [`CheckSession`] owns all state for a single run and drives the backend
//! through strictly sequential batch requests. Batches are never requested
//! out of order or concurrently; batch N's results are always merged before
//! batch N+1 is requested, which keeps progress and the batch cursor
//! monotonic and bounds memory to "all results so far".
//!
//! Cancellation is cooperative via an externally owned
//! [`CancellationToken`]: the token is checked before each batch request,
//! and an in-flight request is raced against it so cancelling takes effect
//! immediately rather than after the request completes.

use std::collections::{BTreeSet, HashMap};

use linkdock_core::check::{BatchReport, CheckResult, CheckStatus, LinkItem};
use linkdock_core::types::DbId;
use tokio_util::sync::CancellationToken;

use crate::backend::CheckBackend;
use crate::error::CheckError;

/// Lifecycle of one check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No run started yet (or state was discarded for a restart).
    Idle,
    /// Batches are being requested.
    Running,
    /// The last batch was merged; every item has a terminal status.
    Completed,
    /// Cancelled mid-run; unreached items remain pending.
    Cancelled,
    /// A run-fatal error halted the loop; partial results are kept.
    /// Distinct from both cancellation and "some links are dead".
    Failed,
}

/// Counts of results by status, for display summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub live: usize,
    pub dead: usize,
    pub timed_out: usize,
    pub pending: usize,
}

/// All data associated with one check run: results keyed by link id (in
/// seed order for stable display), pagination bookkeeping, and the
/// deletion selection.
#[derive(Debug, Default)]
pub struct RunState {
    results: Vec<CheckResult>,
    index: HashMap<DbId, usize>,
    total_items: usize,
    batch_cursor: u32,
    progress_percent: u8,
    selected: BTreeSet<DbId>,
}

impl RunState {
    fn seed(&mut self, items: &[LinkItem]) {
        self.results = items.iter().map(CheckResult::pending).collect();
        self.index = items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id, pos))
            .collect();
        self.total_items = items.len();
    }

    /// Merge one batch report: each result replaces its pending placeholder
    /// by id. Entries not present in the batch are untouched, and a result
    /// that already settled is never overwritten.
    fn merge(&mut self, report: &BatchReport) {
        for result in &report.results {
            if let Some(&pos) = self.index.get(&result.id) {
                if !self.results[pos].status.is_terminal() {
                    self.results[pos] = result.clone();
                }
            }
        }
        // Progress is monotonically non-decreasing even if a re-requested
        // batch reports a lower figure.
        self.progress_percent = self.progress_percent.max(report.progress);
    }

    /// Results in seed order.
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Look up one result by link id.
    pub fn result(&self, id: DbId) -> Option<&CheckResult> {
        self.index.get(&id).map(|&pos| &self.results[pos])
    }

    /// Ids currently marked for deletion. Always a subset of the ids whose
    /// status is terminal non-live.
    pub fn selected(&self) -> &BTreeSet<DbId> {
        &self.selected
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn batch_cursor(&self) -> u32 {
        self.batch_cursor
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    /// Tally results by status.
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for result in &self.results {
            match result.status {
                CheckStatus::Live => summary.live += 1,
                CheckStatus::Dead => summary.dead += 1,
                CheckStatus::TimedOut => summary.timed_out += 1,
                CheckStatus::Pending => summary.pending += 1,
            }
        }
        summary
    }
}

/// Stateful controller for one check run over a [`CheckBackend`].
pub struct CheckSession<B> {
    backend: B,
    phase: Phase,
    state: RunState,
    last_error: Option<String>,
}

impl<B: CheckBackend> CheckSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            phase: Phase::Idle,
            state: RunState::default(),
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// The backend this session drives (tests inspect call recordings).
    pub fn backend_ref(&self) -> &B {
        &self.backend
    }

    /// The message of the run-fatal error that put the session in
    /// [`Phase::Failed`], if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Discard any previous run's state and seed a fresh one.
    ///
    /// Restarting from Completed or Cancelled goes through here, so stale
    /// results are never reused. An empty item list completes immediately
    /// without issuing any batch request.
    pub async fn start(&mut self) -> Result<(), CheckError> {
        self.state = RunState::default();
        self.phase = Phase::Idle;
        self.last_error = None;

        let items = match self.backend.list_items().await {
            Ok(items) => items,
            Err(err) => {
                self.fail(&err);
                return Err(err);
            }
        };

        self.state.seed(&items);
        if items.is_empty() {
            self.state.progress_percent = 100;
            self.phase = Phase::Completed;
        } else {
            self.phase = Phase::Running;
        }
        Ok(())
    }

    /// Request and merge one batch. Returns `true` while more batches
    /// remain, `false` once the session has left the Running phase.
    ///
    /// The cancellation token is observed twice: before the request is
    /// issued, and while it is in flight (the request future is dropped the
    /// moment the token fires).
    pub async fn step(&mut self, cancel: &CancellationToken) -> Result<bool, CheckError> {
        if self.phase != Phase::Running {
            return Ok(false);
        }
        if cancel.is_cancelled() {
            self.phase = Phase::Cancelled;
            return Ok(false);
        }

        let report = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                self.phase = Phase::Cancelled;
                return Ok(false);
            }
            result = self.backend.probe_batch(self.state.batch_cursor) => match result {
                Ok(report) => report,
                Err(err) => {
                    self.fail(&err);
                    return Err(err);
                }
            },
        };

        self.state.merge(&report);

        if report.is_last_batch {
            self.state.progress_percent = 100;
            self.select_all_bad();
            self.phase = Phase::Completed;
            tracing::info!(total = self.state.total_items, "Link check completed");
            return Ok(false);
        }

        self.state.batch_cursor += 1;
        Ok(true)
    }

    /// Run a full session: seed, then step until completion, cancellation
    /// or a run-fatal error.
    pub async fn run(&mut self, cancel: &CancellationToken) -> Result<(), CheckError> {
        self.start().await?;
        while self.step(cancel).await? {}
        Ok(())
    }

    /// Toggle one id in or out of the deletion selection. Only links with a
    /// terminal non-live status may enter the selection; returns whether the
    /// id is selected afterwards.
    pub fn toggle_selection(&mut self, id: DbId) -> bool {
        if self.state.selected.remove(&id) {
            return false;
        }
        let eligible = self
            .state
            .result(id)
            .is_some_and(|r| r.status.is_deletable());
        if eligible {
            self.state.selected.insert(id);
        }
        eligible
    }

    /// Select every link whose terminal status is not live. Pending entries
    /// (from a cancelled run) are never selected.
    pub fn select_all_bad(&mut self) {
        self.state.selected = self
            .state
            .results
            .iter()
            .filter(|r| r.status.is_deletable())
            .map(|r| r.id)
            .collect();
    }

    /// Empty the deletion selection.
    pub fn clear_selection(&mut self) {
        self.state.selected.clear();
    }

    /// Issue one bulk-delete call for the current selection.
    ///
    /// An empty selection is rejected locally with
    /// [`CheckError::EmptySelection`] and no backend call. On success the
    /// caller is responsible for refreshing its own item list.
    pub async fn delete_selected(&mut self) -> Result<u64, CheckError> {
        if self.state.selected.is_empty() {
            return Err(CheckError::EmptySelection);
        }
        let deleted = self.backend.bulk_delete(&self.state.selected).await?;
        tracing::info!(deleted, "Bad links deleted");
        Ok(deleted)
    }

    fn fail(&mut self, err: &CheckError) {
        self.last_error = Some(err.to_string());
        self.phase = Phase::Failed;
        tracing::warn!(error = %err, "Link check run failed");
    }
}
