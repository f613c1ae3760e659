//! Client-credentials exchange and the cached bearer credential.
//!
//! The cache owns a single credential and refreshes it lazily. The cache
//! mutex is held across the exchange, so at most one refresh is in flight
//! and callers queued behind it observe the refreshed value instead of
//! triggering duplicate exchanges.
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};

/// Bearer credential obtained from the accounts endpoint.
///
/// Replaced wholesale on every refresh; read-only outside this module.
#[derive(Debug, Clone)]
pub struct Credential {
    token: String,
    expires_at: Instant,
}

impl Credential {
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Usable iff the token is non-empty and unexpired.
    pub fn is_usable(&self) -> bool {
        !self.token.is_empty() && Instant::now() < self.expires_at
    }

    #[cfg(test)]
    pub(crate) fn for_tests(token: &str, ttl: Duration) -> Self {
        Credential {
            token: token.to_string(),
            expires_at: Instant::now() + ttl,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Lazily-refreshed cache around the client-credentials token exchange.
pub struct TokenCache {
    client: Client,
    accounts_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<Credential>>,
}

impl TokenCache {
    pub fn new(accounts_url: String, client_id: String, client_secret: String) -> Self {
        let base = accounts_url.trim_end_matches('/').to_string();
        TokenCache {
            client: Client::new(),
            accounts_url: base,
            client_id,
            client_secret,
            cached: Mutex::new(None),
        }
    }

    /// Return a usable credential, performing the token exchange only when
    /// the cached one is missing or expired.
    ///
    /// A failed exchange leaves the cache untouched; the next caller
    /// attempts the exchange again.
    pub async fn ensure_credential(&self) -> AppResult<Credential> {
        let mut cached = self.cached.lock().await;
        if let Some(credential) = cached.as_ref() {
            if credential.is_usable() {
                return Ok(credential.clone());
            }
        }

        let fresh = self.exchange().await?;
        *cached = Some(fresh.clone());
        Ok(fresh)
    }

    async fn exchange(&self) -> AppResult<Credential> {
        let url = format!("{}/api/token", self.accounts_url);
        tracing::debug!("Requesting client-credentials token from {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(AppError::Auth(format!(
                "token endpoint returned {}: {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;
        if token.access_token.is_empty() {
            return Err(AppError::Auth("token endpoint returned an empty access_token".to_string()));
        }

        tracing::info!("Obtained fresh access token (ttl {}s)", token.expires_in);
        Ok(Credential {
            token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}
