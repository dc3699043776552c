//! Error taxonomy for check runs.
//!
//! Per-link probe failures are never errors: they are absorbed into the
//! link's own `CheckResult`. These variants cover the run-level and
//! workflow-level failures only. Cancellation is not an error either; it is
//! reported through the session phase.

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The prober invocation itself failed before any per-link
    /// classification happened (item list unavailable, transport failure,
    /// non-success response). Fatal for the current run.
    #[error("batch fetch failed: {0}")]
    BatchFetch(String),

    /// Deletion was requested with nothing selected. Rejected locally;
    /// no network call is made.
    #[error("no links selected for deletion")]
    EmptySelection,

    /// The bulk-delete call failed as a whole. Retryable.
    #[error("bulk delete failed: {0}")]
    DeleteFailed(String),
}
