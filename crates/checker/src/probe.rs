//! Bounded-time liveness probes.
//!
//! Each link gets a single time budget (5 seconds by default) that spans the
//! whole two-step strategy: a HEAD request first, and on a non-timeout
//! transport failure one GET retry. The budget does not reset on fallback;
//! a fallback that runs past the deadline classifies the link as timed out.

use std::time::Duration;

use futures::future::join_all;
use linkdock_core::check::{CheckResult, CheckStatus, LinkItem};

/// Total time budget per link, covering both probe attempts.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// User-Agent sent with every probe.
const PROBE_USER_AGENT: &str = "Mozilla/5.0 (compatible; linkdock LinkChecker)";

/// Maximum redirects followed before a probe is classified dead.
const MAX_REDIRECTS: usize = 10;

/// Issues liveness probes. Cheap to share behind an `Arc`; the inner
/// `reqwest::Client` pools connections across probes.
pub struct LinkProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl LinkProber {
    /// Build a prober with the default per-link budget.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(PROBE_TIMEOUT)
    }

    /// Build a prober with a custom per-link budget (tests use a short one).
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(PROBE_USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client, timeout })
    }

    /// Probe every link in the slice concurrently and return their results
    /// in slice order. Individual failures never abort the batch.
    pub async fn probe_batch(&self, items: &[LinkItem]) -> Vec<CheckResult> {
        join_all(items.iter().map(|item| self.probe(item))).await
    }

    /// Probe one link and classify the outcome.
    ///
    /// - final status in [200, 400) -> live
    /// - any other status -> dead, with the code recorded
    /// - budget exhausted -> timed_out
    /// - other transport failure -> dead, with the failure message
    pub async fn probe(&self, item: &LinkItem) -> CheckResult {
        let (status, status_code, error_detail) =
            match tokio::time::timeout(self.timeout, self.attempt(&item.url)).await {
                Ok(Ok(code)) => {
                    if (200..400).contains(&code) {
                        (CheckStatus::Live, Some(code), None)
                    } else {
                        (
                            CheckStatus::Dead,
                            Some(code),
                            Some(format!("HTTP status {code}")),
                        )
                    }
                }
                Ok(Err(err)) => (CheckStatus::Dead, None, Some(err.to_string())),
                Err(_) => (
                    CheckStatus::TimedOut,
                    None,
                    Some(format!("no response within {:?}", self.timeout)),
                ),
            };

        tracing::debug!(id = item.id, url = %item.url, ?status, "Link probed");

        CheckResult {
            id: item.id,
            name: item.name.clone(),
            url: item.url.clone(),
            status,
            status_code,
            error_detail,
        }
    }

    /// HEAD first; on a non-timeout transport failure, one GET retry under
    /// the same (outer) deadline.
    async fn attempt(&self, url: &str) -> Result<u16, reqwest::Error> {
        match self.client.head(url).send().await {
            Ok(response) => Ok(response.status().as_u16()),
            Err(err) if err.is_timeout() => Err(err),
            Err(_) => {
                // Some servers reject or drop HEAD outright; a full fetch is
                // the authoritative answer for those.
                let response = self.client.get(url).send().await?;
                Ok(response.status().as_u16())
            }
        }
    }
}
