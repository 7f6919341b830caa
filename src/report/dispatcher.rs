//! Fire-and-forget delivery of final reports to the evaluation endpoint.
//!
//! `dispatch()` spawns a task and returns immediately. Delivery failures are
//! logged on that task and never reach the turn that triggered the report.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::payload::ReportPayload;
use crate::config::CallbackConfig;
use crate::error::DispatchError;

/// Upper bound on the delay between retries.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Destination for finished reports.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Human-readable target (URL, "memory", ...) for logs.
    fn target(&self) -> &str;

    /// Deliver one report. A single attempt; retries are the dispatcher's job.
    async fn deliver(&self, payload: &ReportPayload) -> Result<(), DispatchError>;
}

/// POSTs reports as JSON to a fixed URL.
pub struct HttpReportSink {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpReportSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &CallbackConfig) -> Self {
        Self::new(config.url.clone(), config.timeout)
    }
}

#[async_trait]
impl ReportSink for HttpReportSink {
    fn target(&self) -> &str {
        &self.url
    }

    async fn deliver(&self, payload: &ReportPayload) -> Result<(), DispatchError> {
        let resp = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::Timeout {
                        url: self.url.clone(),
                        timeout: self.timeout,
                    }
                } else {
                    DispatchError::Request {
                        url: self.url.clone(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(DispatchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        debug!(
            status = status.as_u16(),
            body = %body.chars().take(200).collect::<String>(),
            "Report endpoint accepted payload"
        );
        Ok(())
    }
}

/// How many times to try a delivery and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Always at least 1.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// One attempt, no retry.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
        }
    }

    pub fn from_config(config: &CallbackConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: config.initial_backoff,
        }
    }

    /// Delay before attempt `attempt + 1`, given `attempt` failures so far.
    /// Exponential with up to 25% random jitter, capped at [`MAX_BACKOFF`].
    fn backoff(&self, attempt: u32) -> Duration {
        let base = self
            .initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
            .min(MAX_BACKOFF);
        let jitter_ms = base.as_millis() as u64 / 4;
        if jitter_ms == 0 {
            return base;
        }
        base + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

/// Hands reports to background tasks.
#[derive(Clone)]
pub struct ReportDispatcher {
    sink: Arc<dyn ReportSink>,
    retry: RetryPolicy,
}

impl ReportDispatcher {
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self {
            sink,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build the HTTP dispatcher described by the callback config.
    pub fn from_config(config: &CallbackConfig) -> Self {
        Self::new(Arc::new(HttpReportSink::from_config(config)))
            .with_retry(RetryPolicy::from_config(config))
    }

    /// Deliver the report on a spawned task. Never blocks and never fails.
    ///
    /// The handle is only useful to callers that want to observe completion
    /// (tests, shutdown); dropping it detaches the task.
    pub fn dispatch(&self, payload: ReportPayload) -> JoinHandle<bool> {
        let sink = Arc::clone(&self.sink);
        let retry = self.retry;
        tokio::spawn(async move { deliver_with_retry(sink.as_ref(), &payload, retry).await })
    }
}

/// Returns whether the report was delivered.
async fn deliver_with_retry(
    sink: &dyn ReportSink,
    payload: &ReportPayload,
    retry: RetryPolicy,
) -> bool {
    let max_attempts = retry.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match sink.deliver(payload).await {
            Ok(()) => {
                info!(
                    session_id = %payload.session_id(),
                    target = %sink.target(),
                    attempt,
                    "Final report delivered"
                );
                return true;
            }
            Err(e) if attempt < max_attempts => {
                let delay = retry.backoff(attempt);
                warn!(
                    session_id = %payload.session_id(),
                    target = %sink.target(),
                    attempt,
                    kind = e.label(),
                    error = %e,
                    retry_in_ms = delay.as_millis() as u64,
                    "Report delivery failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                error!(
                    session_id = %payload.session_id(),
                    target = %sink.target(),
                    attempts = attempt,
                    kind = e.label(),
                    error = %e,
                    "Report delivery failed, giving up"
                );
            }
        }
    }
    false
}
