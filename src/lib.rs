//! Cover Framer library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the binary.
//! - `spotify`: Credential cache and thin client for the Spotify Web API.
//! - `resolve`: Input classification and artwork URL resolution.
//! - `artwork`: Artwork fetching, frame template, and compositing.
//! - `pipeline`: Invocation orchestrator and its state machine.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `SpotifyClient`,
//! `TokenCache`, `Pipeline`, and `CompositeArtifact`.
pub mod api;
pub mod artwork;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod resolve;
pub mod spotify;

pub use artwork::CompositeArtifact;
pub use config::Config;
pub use pipeline::Pipeline;
pub use spotify::{SpotifyClient, TokenCache};
