//! Download of resolved artwork bytes.
use reqwest::Client;

use super::embed::EmbeddableImage;
use crate::error::{AppError, AppResult};

/// Download the bytes behind `source_url` and decode them into an
/// embeddable, render-ready image.
///
/// Network errors, non-success statuses, and non-image content all fail the
/// fetch; the failure is terminal, there is no retry.
pub async fn fetch_embeddable(client: &Client, source_url: &str) -> AppResult<EmbeddableImage> {
    tracing::debug!("Fetching artwork bytes from {}", source_url);

    let response = client
        .get(source_url)
        .send()
        .await
        .map_err(|e| AppError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(AppError::Fetch(format!(
            "artwork request returned {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Fetch(e.to_string()))?;

    EmbeddableImage::decode(&bytes)
        .map_err(|e| AppError::Fetch(format!("content is not a decodable image: {}", e)))
}
