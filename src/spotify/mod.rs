//! # Spotify Catalog Client
//!
//! Authenticated, paginated and retried access to the parts of the Spotify
//! Web API that playlist statistics need.
//!
//! ```text
//! Report assembly
//!          ↓
//! CatalogClient
//!     ├── playlist  (playlist + cursor pagination, 30 page cap)
//!     └── features  (audio features, 100 ids per request)
//!          ↓
//! request primitive (classify status, retry, back off)
//!     ├── CredentialCache (lazy refresh, forced refresh on 401)
//!     └── Transport (reqwest)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Failure classification
//!
//! | response          | handling                                   |
//! |-------------------|--------------------------------------------|
//! | 2xx               | decode and return                          |
//! | 404               | [`ApiError::NotFound`], returned at once   |
//! | 401               | force a credential refresh, retry          |
//! | 429               | wait [`RetryPolicy::rate_limit_delay`]     |
//! | anything else     | wait [`RetryPolicy::failure_delay`]        |
//!
//! After [`RetryPolicy::max_attempts`] the last classification is returned
//! wrapped in [`ApiError::RetriesExhausted`].

pub mod auth;
pub mod features;
pub mod playlist;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{config, error::ApiError, utils};

pub use auth::{ClientCredentials, Credential, CredentialCache, CredentialSource};

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    /// Undecoded response body, usually JSON.
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The HTTP seam of the client. Implementations only move bytes; status
/// handling happens in [`CatalogClient`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, bearer: &str) -> Result<RawResponse, ApiError>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds the underlying `reqwest::Client` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the TLS backend cannot be
    /// initialised.
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, bearer: &str) -> Result<RawResponse, ApiError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(bearer)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// How often and how patiently a catalog request is retried.
///
/// Every classified failure except 404 consumes one attempt, including a
/// failed attempt to obtain a credential. The delay depends on the kind of
/// failure:
///
/// - `429 Too Many Requests` waits [`rate_limit_delay`](Self::rate_limit_delay)
/// - `401 Unauthorized` refreshes the credential and retries immediately
/// - anything else waits [`failure_delay`](Self::failure_delay)
///
/// # Defaults
///
/// 10 attempts, 500 ms after a rate limit, 200 ms after other failures.
///
/// # Example
///
/// ```
/// let client = CatalogClient::from_env()?.with_retry_policy(RetryPolicy {
///     max_attempts: 3,
///     ..RetryPolicy::default()
/// });
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per request, the first one included. Treated as at
    /// least 1.
    pub max_attempts: u32,
    /// Wait after a `429` response.
    pub rate_limit_delay: Duration,
    /// Wait after any other retryable failure.
    pub failure_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            rate_limit_delay: Duration::from_millis(500),
            failure_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Same attempt budget, no waiting. Handy for tests.
    pub fn without_delays() -> Self {
        Self {
            rate_limit_delay: Duration::ZERO,
            failure_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Read-only client for the Spotify catalog.
///
/// Owns the pieces every request needs: a [`Transport`] that moves bytes, a
/// shared [`CredentialCache`] that hands out bearer tokens, the API base URL
/// and the [`RetryPolicy`]. The endpoint methods live next to their payload
/// types in [`playlist`] and [`features`].
///
/// The client is cheap to share behind an `Arc`; the credential cache
/// serialises refreshes internally.
///
/// # Example
///
/// ```
/// let client = CatalogClient::from_env()?;
/// let fetched = client.get_playlist("37i9dQZF1DXcBWIGoYBM5M").await?;
/// println!("{} tracks", fetched.tracks.len());
/// ```
pub struct CatalogClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<CredentialCache>,
    api_url: String,
    retry: RetryPolicy,
}

impl CatalogClient {
    /// Creates a client from explicit parts with the default [`RetryPolicy`].
    ///
    /// # Arguments
    ///
    /// * `transport` - HTTP implementation used for every GET
    /// * `credentials` - Cache that supplies bearer tokens
    /// * `api_url` - Base URL without trailing slash, e.g.
    ///   `https://api.spotify.com/v1`
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<CredentialCache>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials,
            api_url: api_url.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Production wiring: reqwest transport plus client-credentials auth, all
    /// settings read from the environment.
    ///
    /// No request is sent here. The first credential is fetched lazily by
    /// the first catalog call.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Config`] when the client id or secret is not set
    /// - [`ApiError::Transport`] when an HTTP client cannot be built
    pub fn from_env() -> Result<Self, ApiError> {
        let timeout = config::http_timeout();
        let transport = ReqwestTransport::new(timeout)?;
        let credentials = CredentialCache::new(ClientCredentials::from_env()?);
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(credentials),
            config::spotify_apiurl(),
        ))
    }

    /// Replaces the retry policy. Tests use [`RetryPolicy::without_delays`]
    /// to exercise retry paths without sleeping.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL endpoint paths are appended to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn credentials(&self) -> &Arc<CredentialCache> {
        &self.credentials
    }

    /// Fetches `url` and decodes the JSON body, retrying per the policy.
    ///
    /// A body that arrives with a success status but fails to decode is
    /// returned at once as [`ApiError::Decode`]; the same bytes would fail
    /// again.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self.get_with_retry(url).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Runs [`request`](Self::request) until it succeeds, hits a 404 or the
    /// attempt budget is spent.
    ///
    /// # Returns
    ///
    /// - `Ok(body)` on the first success
    /// - `Err(ApiError::NotFound)` immediately on a 404
    /// - `Err(ApiError::RetriesExhausted)` carrying the last failure otherwise
    async fn get_with_retry(&self, url: &str) -> Result<String, ApiError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut last = ApiError::Status(0);

        for attempt in 1..=attempts {
            let token = match self.credentials.get().await {
                Ok(token) => token,
                Err(e) => {
                    warn!(attempt, error = %e, "failed to obtain catalog credential");
                    last = e;
                    sleep(self.retry.failure_delay).await;
                    continue;
                }
            };

            match self.request(url, &token).await {
                Ok(body) => return Ok(body),
                Err(ApiError::NotFound) => return Err(ApiError::NotFound),
                Err(ApiError::Unauthorized) => {
                    warn!(attempt, url, "catalog rejected credential, refreshing");
                    if let Err(e) = self.credentials.force_refresh().await {
                        warn!(attempt, error = %e, "forced credential refresh failed");
                    }
                    last = ApiError::Unauthorized;
                }
                Err(ApiError::RateLimited) => {
                    warn!(attempt, url, "rate limited by catalog, backing off");
                    last = ApiError::RateLimited;
                    sleep(self.retry.rate_limit_delay).await;
                }
                Err(e) => {
                    warn!(attempt, url, error = %e, "catalog request failed, retrying");
                    last = e;
                    sleep(self.retry.failure_delay).await;
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts,
            last: Box::new(last),
        })
    }

    /// One authenticated GET, classified into the client's error taxonomy.
    async fn request(&self, url: &str, token: &str) -> Result<String, ApiError> {
        debug!(
            method = "GET",
            url,
            authorization = %format!("Bearer {}", utils::redact_token(token)),
            "catalog request"
        );

        let response = self.transport.get(url, token).await?;
        match response.status {
            status if status.is_success() => Ok(response.body),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimited),
            status => Err(ApiError::Status(status.as_u16())),
        }
    }
}
