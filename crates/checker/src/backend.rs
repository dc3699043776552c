//! The seam between the orchestrator and the server.

use std::collections::BTreeSet;

use async_trait::async_trait;
use linkdock_core::check::{BatchReport, LinkItem};
use linkdock_core::types::DbId;
use serde::Deserialize;

use crate::error::CheckError;

/// Operations a check run needs from the outside world. The orchestrator is
/// generic over this trait; tests script it, production uses
/// [`HttpBackend`].
#[async_trait]
pub trait CheckBackend {
    /// Fetch the caller's full ordered item list (used once, to seed a run).
    async fn list_items(&self) -> Result<Vec<LinkItem>, CheckError>;

    /// Request one batch of probe results.
    async fn probe_batch(&self, batch_index: u32) -> Result<BatchReport, CheckError>;

    /// Delete the given ids; returns the count actually removed.
    async fn bulk_delete(&self, ids: &BTreeSet<DbId>) -> Result<u64, CheckError>;
}

/// Standard `{ "data": T }` envelope the API wraps responses in.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct DeletedPayload {
    deleted: u64,
}

/// HTTP implementation of [`CheckBackend`] against the linkdock API.
///
/// Caller identity travels in the `X-User-Id` header on every request, so
/// the server scopes all reads and deletes to that user.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    user_id: DbId,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, user_id: DbId) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl CheckBackend for HttpBackend {
    async fn list_items(&self) -> Result<Vec<LinkItem>, CheckError> {
        let response = self
            .client
            .get(self.url("/api/v1/websites"))
            .header("X-User-Id", self.user_id)
            .send()
            .await
            .map_err(|e| CheckError::BatchFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| CheckError::BatchFetch(e.to_string()))?;

        let envelope: DataEnvelope<Vec<LinkItem>> = response
            .json()
            .await
            .map_err(|e| CheckError::BatchFetch(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn probe_batch(&self, batch_index: u32) -> Result<BatchReport, CheckError> {
        let response = self
            .client
            .get(self.url("/api/v1/websites/check"))
            .query(&[("batch", batch_index)])
            .header("X-User-Id", self.user_id)
            .send()
            .await
            .map_err(|e| CheckError::BatchFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| CheckError::BatchFetch(e.to_string()))?;

        let envelope: DataEnvelope<BatchReport> = response
            .json()
            .await
            .map_err(|e| CheckError::BatchFetch(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn bulk_delete(&self, ids: &BTreeSet<DbId>) -> Result<u64, CheckError> {
        let ids: Vec<DbId> = ids.iter().copied().collect();
        let response = self
            .client
            .delete(self.url("/api/v1/websites/check"))
            .header("X-User-Id", self.user_id)
            .json(&serde_json::json!({ "ids": ids }))
            .send()
            .await
            .map_err(|e| CheckError::DeleteFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| CheckError::DeleteFailed(e.to_string()))?;

        let envelope: DataEnvelope<DeletedPayload> = response
            .json()
            .await
            .map_err(|e| CheckError::DeleteFailed(e.to_string()))?;
        Ok(envelope.data.deleted)
    }
}
