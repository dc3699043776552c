//! Link-health check domain types.
//!
//! Shared between the server-side batch prober endpoint and the client-side
//! check orchestrator so both sides agree on the wire contract. Wire field
//! names are camelCase to match the public JSON contract of
//! `GET /api/v1/websites/check`.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Number of links probed per batch request.
pub const BATCH_SIZE: usize = 10;

/// One bookmark under test: the minimal projection of a website row the
/// checker needs (identity plus display fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkItem {
    pub id: DbId,
    pub name: String,
    pub url: String,
}

/// Outcome classification for a single probed link.
///
/// `Pending` is the only non-terminal status: a result is seeded as pending
/// and transitions exactly once to one of the terminal statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Not yet probed.
    Pending,
    /// Final response status in [200, 400).
    Live,
    /// Non-2xx/3xx response or a non-timeout transport failure.
    Dead,
    /// The probe did not complete within the per-link budget.
    TimedOut,
}

impl CheckStatus {
    /// Whether this status is terminal (the probe has settled).
    pub fn is_terminal(self) -> bool {
        self != CheckStatus::Pending
    }

    /// Whether a link with this status is eligible for bulk deletion:
    /// terminal and not live.
    pub fn is_deletable(self) -> bool {
        matches!(self, CheckStatus::Dead | CheckStatus::TimedOut)
    }
}

/// Outcome of probing one [`LinkItem`].
///
/// `id`, `name` and `url` are copied from the item so results can be
/// displayed without re-fetching the link list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub id: DbId,
    pub name: String,
    pub url: String,
    pub status: CheckStatus,
    /// HTTP status code, present only when a response was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Human-readable failure cause, present only for dead/timed-out links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl CheckResult {
    /// Seed a pending result for an item that has not been probed yet.
    pub fn pending(item: &LinkItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            url: item.url.clone(),
            status: CheckStatus::Pending,
            status_code: None,
            error_detail: None,
        }
    }
}

/// Response of one batch prober invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Total number of links owned by the caller.
    pub total: usize,
    /// Zero-based index of the slice this report covers.
    pub batch_index: u32,
    /// Fixed slice width the index is multiplied by.
    pub batch_size: usize,
    /// True when this slice reaches (or lies beyond) the end of the list.
    pub is_last_batch: bool,
    pub results: Vec<CheckResult>,
    /// Percent complete after this batch; exactly 100 on the last batch.
    pub progress: u8,
}
