use std::{fmt, time::Duration};

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{config, error::ApiError, types::TokenResponse, utils};

/// A bearer token and the instant it stops being valid.
#[derive(Clone)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &utils::redact_token(&self.token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Something that can hand out a fresh [`Credential`], usually the token
/// endpoint.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn obtain(&self) -> Result<Credential, ApiError>;
}

/// Holds the current credential and refreshes it on demand.
///
/// The token and its expiry live behind one lock and are always replaced
/// together. Refreshes are not deduplicated: two callers racing past an
/// expired credential may both hit the token endpoint, and the last write
/// wins.
pub struct CredentialCache {
    source: Box<dyn CredentialSource>,
    current: RwLock<Option<Credential>>,
}

impl CredentialCache {
    pub fn new(source: impl CredentialSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            current: RwLock::new(None),
        }
    }

    /// Starts out with an already obtained credential.
    pub fn with_credential(source: impl CredentialSource + 'static, credential: Credential) -> Self {
        Self {
            source: Box::new(source),
            current: RwLock::new(Some(credential)),
        }
    }

    /// Returns the cached token, refreshing first when it has expired or was
    /// never fetched.
    pub async fn get(&self) -> Result<String, ApiError> {
        {
            let current = self.current.read().await;
            if let Some(credential) = current.as_ref() {
                if !credential.is_expired(Utc::now()) {
                    return Ok(credential.token.clone());
                }
            }
        }

        self.force_refresh().await
    }

    /// Replaces the credential regardless of its expiry.
    ///
    /// Used when the catalog rejects a token that still looked valid. On
    /// failure the previous credential is left untouched.
    pub async fn force_refresh(&self) -> Result<String, ApiError> {
        let fresh = self.source.obtain().await?;
        info!(
            expires_at = %fresh.expires_at.to_rfc3339(),
            "obtained new catalog credential"
        );

        let token = fresh.token.clone();
        let mut current = self.current.write().await;
        *current = Some(fresh);
        Ok(token)
    }

    /// Expiry of the cached credential, if one was ever obtained.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.current.read().await.as_ref().map(|c| c.expires_at)
    }
}

/// Client-credentials grant against the Spotify accounts service.
pub struct ClientCredentials {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        })
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(
            config::spotify_apitoken_url(),
            config::spotify_client_id()?,
            config::spotify_client_secret()?,
            config::http_timeout(),
        )
    }

    fn basic_auth(&self) -> String {
        let secret = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(secret))
    }
}

#[async_trait]
impl CredentialSource for ClientCredentials {
    async fn obtain(&self) -> Result<Credential, ApiError> {
        debug!(
            method = "POST",
            url = %self.token_url,
            grant_type = "client_credentials",
            "token request"
        );

        let response = self
            .client
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, self.basic_auth())
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| ApiError::Credential(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, "token endpoint refused client credentials");
            return Err(ApiError::Credential(format!(
                "unexpected status from token endpoint: {status}"
            )));
        }

        let body = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ApiError::Credential(e.to_string()))?;

        let expires_at = Utc::now() + chrono::Duration::seconds(body.expires_in);
        Ok(Credential::new(body.access_token, expires_at))
    }
}
