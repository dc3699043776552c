//! Orchestrator state-machine tests against a scripted backend.
//!
//! The mock backend serves batches the same way the real endpoint does
//! (stateless slice arithmetic over a fixed item list), so these tests
//! exercise the full run lifecycle: sequential pagination, merging,
//! progress, cancellation, run-fatal errors, and the selection workflow.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use linkdock_checker::{BatchPlan, CheckBackend, CheckError, CheckSession, Phase};
use linkdock_core::check::{BatchReport, CheckResult, CheckStatus, LinkItem, BATCH_SIZE};
use linkdock_core::types::DbId;
use tokio_util::sync::CancellationToken;

/// Scripted backend: every link has a predetermined terminal status, and
/// batches are served from slice arithmetic like the production endpoint.
struct MockBackend {
    items: Vec<LinkItem>,
    outcomes: HashMap<DbId, CheckStatus>,
    /// Batch indices requested, in order.
    probe_calls: Mutex<Vec<u32>>,
    /// Id sets passed to bulk_delete.
    delete_calls: Mutex<Vec<BTreeSet<DbId>>>,
    fail_list: bool,
    /// Fail the probe call for this batch index.
    fail_at: Option<u32>,
    /// Never resolve probe calls (for abort-in-flight tests).
    hang: bool,
}

impl MockBackend {
    fn new(count: usize, bad: &[DbId], timeouts: &[DbId]) -> Self {
        let items: Vec<LinkItem> = (1..=count as DbId)
            .map(|id| LinkItem {
                id,
                name: format!("site-{id}"),
                url: format!("https://example.test/{id}"),
            })
            .collect();
        let outcomes = items
            .iter()
            .map(|item| {
                let status = if bad.contains(&item.id) {
                    CheckStatus::Dead
                } else if timeouts.contains(&item.id) {
                    CheckStatus::TimedOut
                } else {
                    CheckStatus::Live
                };
                (item.id, status)
            })
            .collect();
        Self {
            items,
            outcomes,
            probe_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            fail_list: false,
            fail_at: None,
            hang: false,
        }
    }

    fn probe_calls(&self) -> Vec<u32> {
        self.probe_calls.lock().unwrap().clone()
    }

    fn classify(&self, item: &LinkItem) -> CheckResult {
        let status = self.outcomes[&item.id];
        CheckResult {
            id: item.id,
            name: item.name.clone(),
            url: item.url.clone(),
            status,
            status_code: match status {
                CheckStatus::Live => Some(200),
                CheckStatus::Dead => Some(404),
                _ => None,
            },
            error_detail: match status {
                CheckStatus::Dead => Some("HTTP status 404".into()),
                CheckStatus::TimedOut => Some("no response within 5s".into()),
                _ => None,
            },
        }
    }
}

#[async_trait]
impl CheckBackend for MockBackend {
    async fn list_items(&self) -> Result<Vec<LinkItem>, CheckError> {
        if self.fail_list {
            return Err(CheckError::BatchFetch("database unavailable".into()));
        }
        Ok(self.items.clone())
    }

    async fn probe_batch(&self, batch_index: u32) -> Result<BatchReport, CheckError> {
        self.probe_calls.lock().unwrap().push(batch_index);
        if self.hang {
            futures::future::pending::<()>().await;
        }
        if self.fail_at == Some(batch_index) {
            return Err(CheckError::BatchFetch("connection reset".into()));
        }
        let plan = BatchPlan::new(self.items.len(), batch_index, BATCH_SIZE);
        let results = self.items[plan.start..plan.end]
            .iter()
            .map(|item| self.classify(item))
            .collect();
        Ok(BatchReport {
            total: plan.total,
            batch_index,
            batch_size: BATCH_SIZE,
            is_last_batch: plan.is_last_batch,
            results,
            progress: plan.progress(),
        })
    }

    async fn bulk_delete(&self, ids: &BTreeSet<DbId>) -> Result<u64, CheckError> {
        self.delete_calls.lock().unwrap().push(ids.clone());
        // Ids not owned by the caller are per-id no-ops, mirroring the
        // server contract.
        let owned = ids
            .iter()
            .filter(|id| self.items.iter().any(|item| item.id == **id))
            .count();
        Ok(owned as u64)
    }
}

#[tokio::test]
async fn twenty_three_items_run_in_three_batches() {
    let mut session = CheckSession::new(MockBackend::new(23, &[3, 15], &[22]));
    let cancel = CancellationToken::new();

    session.run(&cancel).await.unwrap();

    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.state().progress_percent(), 100);
    assert_eq!(session.backend_ref().probe_calls(), vec![0, 1, 2]);

    // Every seeded id got exactly one terminal classification.
    let results = session.state().results();
    assert_eq!(results.len(), 23);
    let ids: BTreeSet<DbId> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), 23);
    assert!(results.iter().all(|r| r.status.is_terminal()));
}

#[tokio::test]
async fn progress_is_monotone_and_hits_100_only_at_the_end() {
    let mut session = CheckSession::new(MockBackend::new(23, &[], &[]));
    let cancel = CancellationToken::new();

    session.start().await.unwrap();
    let mut observed = vec![session.state().progress_percent()];
    while session.step(&cancel).await.unwrap() {
        let progress = session.state().progress_percent();
        assert!(progress < 100, "100 must only appear on the last batch");
        observed.push(progress);
    }
    observed.push(session.state().progress_percent());

    assert!(observed.windows(2).all(|w| w[0] <= w[1]), "{observed:?}");
    assert_eq!(*observed.last().unwrap(), 100);
}

#[tokio::test]
async fn completion_auto_selects_exactly_the_bad_links() {
    let bad = [2, 11, 23];
    let timeouts = [7];
    let mut session = CheckSession::new(MockBackend::new(23, &bad, &timeouts));
    session.run(&CancellationToken::new()).await.unwrap();

    let expected: BTreeSet<DbId> = bad.iter().chain(timeouts.iter()).copied().collect();
    assert_eq!(session.state().selected(), &expected);
}

#[tokio::test]
async fn toggle_only_admits_terminal_non_live_links() {
    let mut session = CheckSession::new(MockBackend::new(5, &[2], &[]));
    session.run(&CancellationToken::new()).await.unwrap();

    // Deselect the dead link, then re-select it.
    assert!(!session.toggle_selection(2));
    assert!(session.state().selected().is_empty());
    assert!(session.toggle_selection(2));

    // A live link and an unknown id never enter the selection.
    assert!(!session.toggle_selection(1));
    assert!(!session.toggle_selection(999));
    assert_eq!(session.state().selected(), &BTreeSet::from([2]));

    session.clear_selection();
    assert!(session.state().selected().is_empty());
}

#[tokio::test]
async fn cancellation_stops_before_the_next_batch_request() {
    let mut session = CheckSession::new(MockBackend::new(23, &[1], &[]));
    let cancel = CancellationToken::new();

    session.start().await.unwrap();
    assert!(session.step(&cancel).await.unwrap());
    cancel.cancel();
    assert!(!session.step(&cancel).await.unwrap());

    assert_eq!(session.phase(), Phase::Cancelled);
    // Only batch 0 was ever requested.
    assert_eq!(session.backend_ref().probe_calls(), vec![0]);

    // Results: the processed batch is terminal, the rest stayed pending.
    let results = session.state().results();
    assert!(results[..10].iter().all(|r| r.status.is_terminal()));
    assert!(results[10..]
        .iter()
        .all(|r| r.status == CheckStatus::Pending));

    // Selecting all bad links after cancellation never picks pending
    // entries, only the terminal non-live ones already observed.
    session.select_all_bad();
    assert_eq!(session.state().selected(), &BTreeSet::from([1]));
}

#[tokio::test]
async fn cancellation_aborts_an_in_flight_request() {
    let mut backend = MockBackend::new(23, &[], &[]);
    backend.hang = true;
    let mut session = CheckSession::new(backend);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    // The probe future never resolves on its own; the run must still
    // return promptly once the token fires.
    tokio::time::timeout(Duration::from_secs(2), session.run(&cancel))
        .await
        .expect("run did not observe cancellation")
        .unwrap();

    assert_eq!(session.phase(), Phase::Cancelled);
    assert!(session
        .state()
        .results()
        .iter()
        .all(|r| r.status == CheckStatus::Pending));
}

#[tokio::test]
async fn batch_fetch_failure_halts_the_run_as_failed() {
    let mut backend = MockBackend::new(23, &[], &[]);
    backend.fail_at = Some(1);
    let mut session = CheckSession::new(backend);

    let err = session
        .run(&CancellationToken::new())
        .await
        .expect_err("run should surface the batch failure");
    assert_matches!(err, CheckError::BatchFetch(_));

    // Failed is distinct from Cancelled and from a completed run with dead
    // links; partial results are kept.
    assert_eq!(session.phase(), Phase::Failed);
    assert!(session.last_error().unwrap().contains("connection reset"));
    let results = session.state().results();
    assert!(results[..10].iter().all(|r| r.status.is_terminal()));
    assert!(results[10..]
        .iter()
        .all(|r| r.status == CheckStatus::Pending));
}

#[tokio::test]
async fn item_list_failure_fails_the_run_before_any_batch() {
    let mut backend = MockBackend::new(5, &[], &[]);
    backend.fail_list = true;
    let mut session = CheckSession::new(backend);

    let err = session.start().await.expect_err("seed should fail");
    assert_matches!(err, CheckError::BatchFetch(_));
    assert_eq!(session.phase(), Phase::Failed);
    assert!(session.backend_ref().probe_calls().is_empty());
}

#[tokio::test]
async fn empty_item_list_completes_without_probing() {
    let mut session = CheckSession::new(MockBackend::new(0, &[], &[]));
    session.run(&CancellationToken::new()).await.unwrap();

    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.state().progress_percent(), 100);
    assert!(session.backend_ref().probe_calls().is_empty());
}

#[tokio::test]
async fn deleting_with_empty_selection_is_rejected_locally() {
    let mut session = CheckSession::new(MockBackend::new(5, &[], &[]));
    session.run(&CancellationToken::new()).await.unwrap();

    // All links live, so nothing was auto-selected.
    assert!(session.state().selected().is_empty());
    let err = session.delete_selected().await.expect_err("must reject");
    assert_matches!(err, CheckError::EmptySelection);
    assert!(session.backend_ref().delete_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_passes_the_selection_and_reports_the_count() {
    let mut session = CheckSession::new(MockBackend::new(8, &[3, 6], &[]));
    session.run(&CancellationToken::new()).await.unwrap();

    let deleted = session.delete_selected().await.unwrap();
    assert_eq!(deleted, 2);
    let calls = session.backend_ref().delete_calls.lock().unwrap().clone();
    assert_eq!(calls, vec![BTreeSet::from([3, 6])]);
}

#[tokio::test]
async fn foreign_ids_in_a_delete_set_are_per_id_noops() {
    let backend = MockBackend::new(5, &[], &[]);
    // Id 5 is owned, id 999 is not: the count reflects owned ids only.
    let deleted = backend.bulk_delete(&BTreeSet::from([5, 999])).await.unwrap();
    assert_eq!(deleted, 1);
}

#[tokio::test]
async fn restart_discards_stale_results() {
    let mut session = CheckSession::new(MockBackend::new(5, &[2], &[]));
    let cancel = CancellationToken::new();
    session.run(&cancel).await.unwrap();
    assert_eq!(session.state().selected(), &BTreeSet::from([2]));

    // Re-seeding puts everything back to pending with an empty selection.
    session.start().await.unwrap();
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.state().progress_percent(), 0);
    assert_eq!(session.state().batch_cursor(), 0);
    assert!(session.state().selected().is_empty());
    assert!(session
        .state()
        .results()
        .iter()
        .all(|r| r.status == CheckStatus::Pending));

    session.run(&cancel).await.unwrap();
    assert_eq!(session.phase(), Phase::Completed);
}
