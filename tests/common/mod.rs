//! Stub Spotify endpoints for pipeline tests, served by the same axum
//! stack the service itself uses.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use cover_framer::artwork::{EmbeddableImage, FrameTemplate};
use cover_framer::pipeline::Pipeline;
use cover_framer::spotify::{SpotifyClient, TokenCache};

/// Behavior knobs and call counters for one stub server instance.
///
/// Slow and empty responses are keyed off the query text: a search whose
/// `q` contains "slow" sleeps before answering, and one containing
/// "missing" answers with an empty item list.
pub struct Stub {
    pub token_calls: AtomicUsize,
    pub album_calls: AtomicUsize,
    pub track_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
    pub recorded_searches: Mutex<Vec<HashMap<String, String>>>,
    pub token_ttl_secs: AtomicU64,
    pub token_delay_ms: AtomicU64,
    pub fail_token: AtomicBool,
    base: Mutex<String>,
}

impl Stub {
    pub fn new() -> Arc<Self> {
        Arc::new(Stub {
            token_calls: AtomicUsize::new(0),
            album_calls: AtomicUsize::new(0),
            track_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            recorded_searches: Mutex::new(Vec::new()),
            token_ttl_secs: AtomicU64::new(3600),
            token_delay_ms: AtomicU64::new(0),
            fail_token: AtomicBool::new(false),
            base: Mutex::new(String::new()),
        })
    }

    fn image_url(&self, id: &str) -> String {
        format!("{}/artwork/{}", self.base.lock().unwrap(), id)
    }
}

/// Serve the stub on an ephemeral local port and return its address.
pub async fn spawn(stub: Arc<Stub>) -> SocketAddr {
    let router = Router::new()
        .route("/api/token", post(token))
        .route("/albums/:id", get(album))
        .route("/tracks/:id", get(track))
        .route("/search", get(search))
        .route("/artwork/:id", get(artwork))
        .with_state(stub.clone());

    let server = axum::Server::bind(&"127.0.0.1:0".parse().unwrap())
        .serve(router.into_make_service());
    let addr = server.local_addr();
    *stub.base.lock().unwrap() = format!("http://{}", addr);
    tokio::spawn(server);
    addr
}

async fn token(State(stub): State<Arc<Stub>>) -> Response {
    stub.token_calls.fetch_add(1, Ordering::SeqCst);

    let delay = stub.token_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if stub.fail_token.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "authority unavailable").into_response();
    }

    Json(json!({
        "access_token": "stub-token",
        "expires_in": stub.token_ttl_secs.load(Ordering::SeqCst),
    }))
    .into_response()
}

async fn album(State(stub): State<Arc<Stub>>, Path(id): Path<String>) -> Json<Value> {
    stub.album_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({"images": [{"url": stub.image_url(&id)}]}))
}

async fn track(State(stub): State<Arc<Stub>>, Path(id): Path<String>) -> Json<Value> {
    stub.track_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({"album": {"images": [{"url": stub.image_url(&id)}]}}))
}

async fn search(
    State(stub): State<Arc<Stub>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.search_calls.fetch_add(1, Ordering::SeqCst);
    stub.recorded_searches.lock().unwrap().push(params.clone());

    let q = params.get("q").cloned().unwrap_or_default();
    if q.contains("slow") {
        tokio::time::sleep(Duration::from_millis(400)).await;
    }
    if q.contains("missing") {
        return Json(json!({"albums": {"items": []}, "tracks": {"items": []}}));
    }

    let image = json!({"url": stub.image_url("search-hit")});
    if params.get("type").map(String::as_str) == Some("track") {
        Json(json!({"tracks": {"items": [{"album": {"images": [image]}}]}}))
    } else {
        Json(json!({"albums": {"items": [{"images": [image]}]}}))
    }
}

async fn artwork(State(stub): State<Arc<Stub>>, Path(_id): Path<String>) -> impl IntoResponse {
    stub.image_calls.fetch_add(1, Ordering::SeqCst);
    ([(header::CONTENT_TYPE, "image/png")], tiny_png([255, 0, 0, 255]))
}

/// A minimal encoded PNG of one solid color.
pub fn tiny_png(rgba: [u8; 4]) -> Vec<u8> {
    let raw: Vec<u8> = rgba.iter().copied().cycle().take(3 * 3 * 4).collect();
    let img = image::RgbaImage::from_raw(3, 3, raw).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

pub fn template() -> FrameTemplate {
    FrameTemplate::new(
        EmbeddableImage::decode(&tiny_png([0, 0, 255, 255])).unwrap(),
        EmbeddableImage::decode(&tiny_png([0, 0, 0, 0])).unwrap(),
    )
}

/// Pipeline wired entirely against one stub server.
pub fn pipeline_for(addr: SocketAddr) -> Pipeline {
    let base = format!("http://{}", addr);
    let auth = TokenCache::new(base.clone(), "test-client".to_string(), "test-secret".to_string());
    Pipeline::new(auth, SpotifyClient::new(base), template())
}
