//! The AI summarizer collaborator, treated as an opaque external call.
//!
//! Given a URL and the raw title/description scraped from the page, the
//! summarizer may return a cleaned brand name, a short summary, and a
//! suggested category. Failures are absorbed: metadata analysis degrades to
//! the raw extraction rather than erroring.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Cleaned-up metadata suggested by the summarizer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageSummary {
    /// Core brand name with slogans and boilerplate stripped.
    pub name: Option<String>,
    /// Short human-readable summary of what the site does.
    pub summary: Option<String>,
    /// Suggested group/category label.
    pub category: Option<String>,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize a page; `None` when the summarizer is unavailable, declined
    /// to answer, or failed.
    async fn summarize(&self, url: &str, title: &str, description: &str) -> Option<PageSummary>;
}

/// Disabled summarizer: analysis always falls back to raw extraction.
pub struct NoopSummarizer;

#[async_trait]
impl Summarizer for NoopSummarizer {
    async fn summarize(&self, _url: &str, _title: &str, _description: &str) -> Option<PageSummary> {
        None
    }
}

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    url: &'a str,
    title: &'a str,
    description: &'a str,
}

/// Summarizer backed by an external HTTP endpoint configured via
/// `SUMMARIZER_URL`.
pub struct HttpSummarizer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSummarizer {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, url: &str, title: &str, description: &str) -> Option<PageSummary> {
        let request = SummarizeRequest {
            url,
            title,
            description,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        match response {
            Ok(response) => match response.json::<PageSummary>().await {
                Ok(summary) => Some(summary),
                Err(err) => {
                    tracing::warn!(error = %err, "Summarizer returned unparseable payload");
                    None
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "Summarizer call failed");
                None
            }
        }
    }
}
