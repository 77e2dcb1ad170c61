use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::AppError;
use crate::riot::RetryPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub retry_policy: RetryPolicy,
    pub match_scan_count: u32,
    pub ddragon_version: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, `from_env` being the usual one.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        const DEFAULT_RIOT_RATE_LIMIT_PER_SECOND: u32 = 20;
        const DEFAULT_MATCH_SCAN_COUNT: u32 = 20;
        const MAX_MATCH_SCAN_COUNT: u32 = 100;
        const DEFAULT_DDRAGON_VERSION: &str = "16.1.1";

        let riot_api_key = lookup("RIOT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let millis = |key: &str, default: Duration| {
            parsed(key).map(Duration::from_millis).unwrap_or(default)
        };

        let riot_rate_limit_per_second = parsed("RIOT_RATE_LIMIT_PER_SECOND")
            .and_then(|v| u32::try_from(v).ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_RIOT_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        let defaults = RetryPolicy::default();
        let retry_policy = RetryPolicy {
            max_attempts: parsed("RIOT_MAX_ATTEMPTS")
                .and_then(|v| u32::try_from(v).ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.max_attempts),
            base_timeout: millis("RIOT_BASE_TIMEOUT_MS", defaults.base_timeout),
            timeout_increment: millis("RIOT_TIMEOUT_INCREMENT_MS", defaults.timeout_increment),
            rate_limit_backoff: millis("RIOT_RATE_LIMIT_BACKOFF_MS", defaults.rate_limit_backoff),
            transient_backoff: millis("RIOT_TRANSIENT_BACKOFF_MS", defaults.transient_backoff),
        };

        let match_scan_count = parsed("MATCH_SCAN_COUNT")
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(DEFAULT_MATCH_SCAN_COUNT)
            .clamp(1, MAX_MATCH_SCAN_COUNT);

        let ddragon_version =
            lookup("DDRAGON_VERSION").unwrap_or_else(|| DEFAULT_DDRAGON_VERSION.into());

        Ok(Self {
            riot_api_key,
            riot_rate_limit_per_second,
            retry_policy,
            match_scan_count,
            ddragon_version,
        })
    }
}
