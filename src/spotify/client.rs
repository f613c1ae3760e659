//! Thin HTTP client for the Spotify Web API metadata endpoints.
//!
//! - `get_album` / `get_track` perform direct catalog lookups by id.
//! - `search` asks for at most one match of a given type.
//!
//! Responses are returned as raw JSON; the resolver extracts what it needs.
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(base_url: String) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        SpotifyClient { client: Client::new(), base_url: base }
    }

    /// Look up a single album by catalog id via `/albums/{id}`.
    pub async fn get_album(&self, id: &str, token: &str) -> AppResult<Value> {
        let url = format!("{}/albums/{}", self.base_url, id);
        self.get_json(&url, token).await
    }

    /// Look up a single track by catalog id via `/tracks/{id}`.
    pub async fn get_track(&self, id: &str, token: &str) -> AppResult<Value> {
        let url = format!("{}/tracks/{}", self.base_url, id);
        self.get_json(&url, token).await
    }

    /// Search for the single best match of `query` within `kind`
    /// (`album` or `track`).
    pub async fn search(&self, query: &str, kind: &str, token: &str) -> AppResult<Value> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!("Searching Spotify: q={} type={}", query, kind);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("type", kind), ("limit", "1")])
            .bearer_auth(token)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status().is_success() {
            response.json().await.map_err(AppError::HttpClient)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            Err(AppError::Spotify(format!(
                "Search failed. Status: {}, Body: {}",
                status, error_body
            )))
        }
    }

    async fn get_json(&self, url: &str, token: &str) -> AppResult<Value> {
        tracing::debug!("Spotify lookup: {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status().is_success() {
            response.json().await.map_err(AppError::HttpClient)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            Err(AppError::Spotify(format!(
                "Lookup failed. Status: {}, Body: {}",
                status, error_body
            )))
        }
    }
}
