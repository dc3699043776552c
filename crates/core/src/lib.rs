//! Shared domain types for the linkdock platform.
//!
//! - [`types`] -- primitive aliases used across all crates.
//! - [`error`] -- the domain error taxonomy.
//! - [`check`] -- link-health check types shared by the prober endpoint
//!   and the check orchestrator.

pub mod check;
pub mod error;
pub mod types;
