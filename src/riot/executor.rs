//! Retry, backoff and timeout handling around a single Riot API GET.
//!
//! [`RequestExecutor`] is the only place deciding whether a failure is
//! transient or definitive. Callers get an [`Outcome`] back and never an error.

use std::fmt::Debug;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{FetchError, TransportError};

pub type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Raw answer of one HTTP attempt.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed `Retry-After` header, when the server sent one.
    pub retry_after: Option<Duration>,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }
}

/// Structures capable of performing one raw GET against the Riot API.
#[async_trait]
pub trait ApiTransport: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<ApiResponse, TransportError>;
}

/// Result of one logical call after retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    NotFound,
    Exhausted,
    Error(String),
}

impl<T> Outcome<T> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::NotFound => "not found",
            Self::Exhausted => "exhausted",
            Self::Error(_) => "error",
        }
    }

    /// Treats every non-success outcome as a failure of `endpoint`.
    pub fn into_result(self, endpoint: &str) -> Result<T, FetchError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::NotFound => Err(FetchError::NotFound {
                endpoint: endpoint.to_string(),
            }),
            Self::Exhausted => Err(FetchError::Exhausted {
                endpoint: endpoint.to_string(),
            }),
            Self::Error(detail) => Err(FetchError::Unclassified {
                endpoint: endpoint.to_string(),
                detail,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_timeout: Duration,
    pub timeout_increment: Duration,
    /// Sleep after a 429, multiplied by the attempt number.
    pub rate_limit_backoff: Duration,
    /// Sleep after a network error or a timeout.
    pub transient_backoff: Duration,
}

impl RetryPolicy {
    pub fn timeout_for(&self, attempt: u32) -> Duration {
        self.base_timeout + self.timeout_increment * attempt
    }

    pub fn rate_limit_backoff_for(&self, attempt: u32) -> Duration {
        self.rate_limit_backoff * (attempt + 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_timeout: Duration::from_secs(5),
            timeout_increment: Duration::from_secs(2),
            rate_limit_backoff: Duration::from_secs(2),
            transient_backoff: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn ApiTransport>,
    policy: RetryPolicy,
    limiter: Option<Arc<DirectLimiter>>,
}

impl RequestExecutor {
    pub fn new(transport: Arc<dyn ApiTransport>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            limiter: None,
        }
    }

    /// Every attempt of every clone of this executor waits on the same bucket.
    pub fn with_rate_limit(mut self, per_second: NonZeroU32) -> Self {
        let quota = Quota::per_second(per_second);
        self.limiter = Some(Arc::new(RateLimiter::direct(quota)));
        self
    }

    /// Perform one logical call and decode a successful body as JSON.
    pub async fn execute<T: DeserializeOwned>(&self, url: &str) -> Outcome<T> {
        match self.execute_raw(url).await {
            Outcome::Success(body) => match serde_json::from_slice(&body) {
                Ok(value) => Outcome::Success(value),
                Err(e) => {
                    warn!(error = %e, "🛰️ ❌ Could not decode response body");
                    Outcome::Error(format!("decoding response: {e}"))
                }
            },
            Outcome::NotFound => Outcome::NotFound,
            Outcome::Exhausted => Outcome::Exhausted,
            Outcome::Error(detail) => Outcome::Error(detail),
        }
    }

    #[instrument(skip(self), fields(max_attempts = self.policy.max_attempts))]
    pub async fn execute_raw(&self, url: &str) -> Outcome<Bytes> {
        let max_attempts = self.policy.max_attempts;

        for attempt in 0..max_attempts {
            let is_last = attempt + 1 >= max_attempts;

            if let Some(limiter) = &self.limiter {
                limiter.until_ready().await;
            }

            let timeout = self.policy.timeout_for(attempt);
            let backoff = match tokio::time::timeout(timeout, self.transport.get(url)).await {
                Ok(Ok(response)) => match response.status {
                    200..=299 => {
                        debug!(attempt, status = response.status, "🛰️ ✅ Request succeeded");
                        return Outcome::Success(response.body);
                    }
                    404 => {
                        debug!(attempt, "🛰️ Resource not found");
                        return Outcome::NotFound;
                    }
                    429 => {
                        let backoff = response
                            .retry_after
                            .unwrap_or_else(|| self.policy.rate_limit_backoff_for(attempt));
                        warn!(
                            attempt,
                            backoff_ms = backoff.as_millis() as u64,
                            "🛰️ ⏳ Rate limited"
                        );
                        backoff
                    }
                    status => {
                        warn!(attempt, status, "🛰️ ❌ Unexpected status, not retrying");
                        return Outcome::Error(format!("unexpected status {status}"));
                    }
                },
                Ok(Err(e)) => {
                    warn!(attempt, error = %e, "🛰️ ⚠️ Transport error");
                    self.policy.transient_backoff
                }
                Err(_) => {
                    warn!(
                        attempt,
                        timeout_ms = timeout.as_millis() as u64,
                        "🛰️ ⚠️ Request timed out"
                    );
                    self.policy.transient_backoff
                }
            };

            if !is_last {
                tokio::time::sleep(backoff).await;
            }
        }

        warn!("🛰️ ❌ Retries exhausted");
        Outcome::Exhausted
    }
}
