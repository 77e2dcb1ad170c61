use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use serde::de::DeserializeOwned;

use super::executor::{ApiResponse, ApiTransport, Outcome, RequestExecutor, RetryPolicy};
use crate::champions::ChampionTable;
use crate::config::Config;
use crate::error::TransportError;

const DEFAULT_MATCH_SCAN_COUNT: u32 = 20;

/// Production transport: one reqwest GET carrying the static API key.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    /// Riot API Key
    key: String,
}

impl ReqwestTransport {
    pub fn new(key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            key,
        }
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ApiTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<ApiResponse, TransportError> {
        let res = self
            .client
            .get(url)
            .header("X-Riot-Token", &self.key)
            .send()
            .await?;

        let status = res.status().as_u16();
        let retry_after = res
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = res.bytes().await?;

        Ok(ApiResponse {
            status,
            retry_after,
            body,
        })
    }
}

/// Riot API client shared by every resolution flow.
///
/// Cloning is cheap: the transport, the rate limiter and the champion table are
/// all behind `Arc`s and never mutated.
#[derive(Debug, Clone)]
pub struct RiotClient {
    executor: RequestExecutor,
    champions: Arc<ChampionTable>,
    match_scan_count: u32,
}

impl RiotClient {
    pub fn new(config: &Config) -> Self {
        let transport = Arc::new(ReqwestTransport::new(config.riot_api_key.clone()));
        let executor = RequestExecutor::new(transport, config.retry_policy.clone())
            .with_rate_limit(config.riot_rate_limit_per_second);

        Self {
            executor,
            champions: Arc::new(ChampionTable::default()),
            match_scan_count: config.match_scan_count,
        }
    }

    /// Build a client over any transport, without a shared rate limiter.
    pub fn with_transport(transport: Arc<dyn ApiTransport>, policy: RetryPolicy) -> Self {
        Self {
            executor: RequestExecutor::new(transport, policy),
            champions: Arc::new(ChampionTable::default()),
            match_scan_count: DEFAULT_MATCH_SCAN_COUNT,
        }
    }

    pub fn with_champions(mut self, champions: Arc<ChampionTable>) -> Self {
        self.champions = champions;
        self
    }

    pub fn with_match_scan_count(mut self, count: u32) -> Self {
        self.match_scan_count = count;
        self
    }

    pub fn champions(&self) -> &ChampionTable {
        &self.champions
    }

    pub fn match_scan_count(&self) -> u32 {
        self.match_scan_count
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Outcome<T> {
        self.executor.execute(url).await
    }
}
