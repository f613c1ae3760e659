//! Common error type and result alias shared across the crate.
use serde::Serialize;

pub type AppResult<T> = Result<T, AppError>;

/// Stage taxonomy preserved for the state machine and diagnostics. The
/// presentation boundary collapses all of these to one user-visible outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Auth,
    NotFound,
    Fetch,
    Render,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("spotify api error: {0}")]
    Spotify(String),

    #[error("credential exchange failed: {0}")]
    Auth(String),

    #[error("no artwork found: {0}")]
    NotFound(String),

    #[error("artwork fetch failed: {0}")]
    Fetch(String),

    #[error("render failed: {0}")]
    Render(String),
}

impl AppError {
    /// Map onto the stage taxonomy. Transport and API-level errors only
    /// surface from metadata calls, so they count as a failed resolution.
    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::Auth(_) => FailureKind::Auth,
            AppError::HttpClient(_) | AppError::Spotify(_) | AppError::NotFound(_) => {
                FailureKind::NotFound
            }
            AppError::Fetch(_) => FailureKind::Fetch,
            AppError::Render(_) => FailureKind::Render,
        }
    }
}
