//! Error types shared by the catalog client and the aggregation engine.
//!
//! [`ApiError`] is what the catalog client surfaces upward. Only
//! [`ApiError::NotFound`], [`ApiError::Decode`] and
//! [`ApiError::RetriesExhausted`] ever leave the retry loop; the remaining
//! variants are per-attempt classifications carried inside
//! `RetriesExhausted::last`.
//!
//! [`StatsError`] is never fatal. Callers skip the offending dimension and
//! keep going.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The requested resource does not exist. Terminal.
    #[error("resource not found")]
    NotFound,

    /// The catalog rejected the bearer token.
    #[error("unauthorized: bearer token rejected")]
    Unauthorized,

    /// The catalog asked us to slow down.
    #[error("rate limited")]
    RateLimited,

    /// Any other non-2xx status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Connection, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The token endpoint failed to hand out a credential.
    #[error("credential error: {0}")]
    Credential(String),

    /// A successful response whose body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    #[error("giving up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<ApiError> },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum StatsError {
    /// Nothing was pushed, so there is no mean to report.
    #[error("no data")]
    NoData,

    #[error("value cannot be grouped: {0}")]
    Ungroupable(String),

    #[error("year {0} is outside every known generation")]
    YearOutOfRange(i32),
}
