//! Resolution of a classified input to exactly one source image URL.
//!
//! Direct references go through the catalog lookup endpoints; free-text
//! queries go through search with `limit=1`. In both cases the first image
//! of the (track's) album is the canonical result. An authority error, an
//! empty result set, or a missing image entry all resolve to `NotFound`;
//! there is no retry.
use serde_json::Value;

use super::classify::{ClassifiedInput, ResourceKind, SearchMode};
use crate::error::{AppError, AppResult};
use crate::spotify::{Credential, SpotifyClient};

/// The single canonical result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImageRef {
    pub source_url: String,
}

pub async fn resolve(
    client: &SpotifyClient,
    input: &ClassifiedInput,
    credential: &Credential,
) -> AppResult<ResolvedImageRef> {
    let token = credential.token();

    let source_url = match input {
        ClassifiedInput::Reference { kind: ResourceKind::Album, id } => {
            let album = client.get_album(id, token).await?;
            first_image_url(&album)
        }
        ClassifiedInput::Reference { kind: ResourceKind::Track, id } => {
            let track = client.get_track(id, token).await?;
            track.get("album").and_then(first_image_url)
        }
        ClassifiedInput::Query { text, mode } => {
            let query = format!("{}:{}", mode.query_prefix(), text);
            let results = client.search(&query, mode.search_type(), token).await?;
            let first_item = match mode {
                SearchMode::Album => results
                    .get("albums")
                    .and_then(|albums| albums.get("items"))
                    .and_then(|items| items.get(0)),
                SearchMode::Track => results
                    .get("tracks")
                    .and_then(|tracks| tracks.get("items"))
                    .and_then(|items| items.get(0)),
            };
            match mode {
                SearchMode::Album => first_item.and_then(first_image_url),
                SearchMode::Track => first_item
                    .and_then(|item| item.get("album"))
                    .and_then(first_image_url),
            }
        }
    };

    source_url
        .map(|url| ResolvedImageRef { source_url: url })
        .ok_or_else(|| AppError::NotFound("no image at the expected position".to_string()))
}

/// First entry of an album node's image list, if any.
fn first_image_url(node: &Value) -> Option<String> {
    node.get("images")
        .and_then(|images| images.get(0))
        .and_then(|image| image.get("url"))
        .and_then(|url| url.as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_image_url_takes_the_first_entry() {
        let album = json!({
            "images": [
                {"url": "https://img.example/large.png"},
                {"url": "https://img.example/small.png"}
            ]
        });
        assert_eq!(
            first_image_url(&album),
            Some("https://img.example/large.png".to_string())
        );
    }

    #[test]
    fn first_image_url_is_none_for_missing_or_empty_lists() {
        assert_eq!(first_image_url(&json!({})), None);
        assert_eq!(first_image_url(&json!({"images": []})), None);
        assert_eq!(first_image_url(&json!({"images": [{"height": 64}]})), None);
    }
}
