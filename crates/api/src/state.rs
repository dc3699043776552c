use std::sync::Arc;

use linkdock_checker::LinkProber;

use crate::analyze::PageAnalyzer;
use crate::auth::google::GoogleTokenVerifier;
use crate::config::ServerConfig;
use crate::summarize::Summarizer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: linkdock_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Liveness prober used by the batch check endpoint.
    pub prober: Arc<LinkProber>,
    /// Page metadata extractor for the analyze/fetch-logo endpoints.
    pub analyzer: Arc<PageAnalyzer>,
    /// Opaque AI summarizer collaborator.
    pub summarizer: Arc<dyn Summarizer>,
    /// Opaque Google ID-token verifier collaborator.
    pub google_verifier: Arc<dyn GoogleTokenVerifier>,
}
