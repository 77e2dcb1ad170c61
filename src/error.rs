use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Invalid player identity: {0}")]
    InvalidIdentity(String),

    #[error("Player not found: {game_name}#{tag_line}")]
    AccountNotFound { game_name: String, tag_line: String },

    #[error("No account found for puuid {puuid}")]
    PuuidNotFound { puuid: String },

    #[error("No gameplay region detected for puuid {puuid}")]
    RegionNotDetected { puuid: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure of a single-endpoint lookup once the executor gave up on it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Nothing found at {endpoint}")]
    NotFound { endpoint: String },

    #[error("Retries exhausted for {endpoint}")]
    Exhausted { endpoint: String },

    #[error("Unexpected response from {endpoint}: {detail}")]
    Unclassified { endpoint: String, detail: String },
}

/// Network-level failure of one request attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    Network(String),
}
