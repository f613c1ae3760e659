//! Orchestration of one search-to-artifact invocation.
//!
//! Stages run strictly sequentially: credential, classification,
//! resolution, fetch, composition. Any stage failure is terminal for the
//! invocation. Each invocation carries a monotonically increasing identity
//! and only the latest one may commit its outcome to the shared state, so
//! a slow invocation can never clobber the state of a newer one.
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::artwork::{self, CompositeArtifact, FrameTemplate};
use crate::error::{AppResult, FailureKind};
use crate::resolve::{self, SearchMode};
use crate::spotify::{SpotifyClient, TokenCache};

/// User-visible lifecycle of the latest invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Idle,
    Pending,
    Success(CompositeArtifact),
    Failed(FailureKind),
}

/// One search-to-artifact request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub raw_input: String,
    pub mode: SearchMode,
}

pub struct Pipeline {
    auth: TokenCache,
    spotify: SpotifyClient,
    artwork_client: reqwest::Client,
    template: FrameTemplate,
    state: RwLock<PipelineState>,
    latest: AtomicU64,
}

impl Pipeline {
    pub fn new(auth: TokenCache, spotify: SpotifyClient, template: FrameTemplate) -> Self {
        Pipeline {
            auth,
            spotify,
            artwork_client: reqwest::Client::new(),
            template,
            state: RwLock::new(PipelineState::Idle),
            latest: AtomicU64::new(0),
        }
    }

    pub async fn state(&self) -> PipelineState {
        self.state.read().await.clone()
    }

    /// Run one invocation to completion.
    ///
    /// Blank input short-circuits before any work: no network calls, state
    /// untouched, `Ok(None)`. Otherwise the invocation transitions the
    /// shared state to `Pending` and, if it is still the latest invocation
    /// when it finishes, to `Success` or `Failed`.
    pub async fn run(&self, request: &SearchRequest) -> AppResult<Option<CompositeArtifact>> {
        if request.raw_input.trim().is_empty() {
            return Ok(None);
        }

        let invocation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.commit(invocation, PipelineState::Pending).await;

        match self.execute(request).await {
            Ok(artifact) => {
                self.commit(invocation, PipelineState::Success(artifact.clone())).await;
                Ok(Some(artifact))
            }
            Err(err) => {
                tracing::warn!("Pipeline invocation {} failed ({:?}): {}", invocation, err.kind(), err);
                self.commit(invocation, PipelineState::Failed(err.kind())).await;
                Err(err)
            }
        }
    }

    async fn execute(&self, request: &SearchRequest) -> AppResult<CompositeArtifact> {
        let credential = self.auth.ensure_credential().await?;

        let input = resolve::classify(&request.raw_input, request.mode);
        tracing::debug!("Classified input: {:?}", input);

        let resolved = resolve::resolve(&self.spotify, &input, &credential).await?;
        let art = artwork::fetch_embeddable(&self.artwork_client, &resolved.source_url).await?;
        artwork::compose(&self.template, &art)
    }

    /// Commit `next` only if `invocation` is still the latest one started;
    /// results of superseded invocations are discarded silently.
    async fn commit(&self, invocation: u64, next: PipelineState) {
        let mut state = self.state.write().await;
        if self.latest.load(Ordering::SeqCst) == invocation {
            *state = next;
        } else {
            tracing::debug!("Discarding result of superseded invocation {}", invocation);
        }
    }
}
