//! Batched link-health checking.
//!
//! Two cooperating pieces:
//!
//! - [`probe`] -- the server-side prober: bounded-time liveness probes with
//!   HEAD-then-GET fallback, fanned out across one fixed-size batch.
//! - [`session`] -- the client-side orchestrator: an explicit state machine
//!   that drives repeated batch requests to completion (or cancellation),
//!   merges results by link id, and runs the selection/bulk-delete workflow
//!   over the links found dead.
//!
//! The [`backend::CheckBackend`] trait is the seam between the two: the
//! orchestrator only ever sees that trait, so it is testable without a
//! server, and [`backend::HttpBackend`] is the production implementation
//! speaking to the API.

pub mod backend;
pub mod batch;
pub mod error;
pub mod probe;
pub mod session;

pub use backend::{CheckBackend, HttpBackend};
pub use batch::BatchPlan;
pub use error::CheckError;
pub use probe::LinkProber;
pub use session::{CheckSession, Phase, RunState};
