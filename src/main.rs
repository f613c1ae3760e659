
use std::net::SocketAddr;
use std::sync::Arc;

use cover_framer::{api, artwork, config, pipeline, spotify};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    config::Config::dotenv_load();
    let config = config::Config::new().expect("Failed to load configuration");
    config::Config::print_env_vars();

    // Decode the fixed frame layers once at startup
    let template = artwork::FrameTemplate::load(&config.base_image_path, &config.overlay_image_path)
        .expect("Failed to load frame template layers");

    let auth = spotify::TokenCache::new(
        config.accounts_url.clone(),
        config.client_id.clone(),
        config.client_secret.clone(),
    );
    let spotify_client = spotify::SpotifyClient::new(config.api_url.clone());

    let state = Arc::new(api::routes::AppState {
        pipeline: pipeline::Pipeline::new(auth, spotify_client, template),
    });

    let app = api::routes::router(state);

    // Run our application with safe parsing
    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", host_str);
        std::net::IpAddr::from([127, 0, 0, 1])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_PORT '{}', falling back to 8190", port_str);
        8190
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("listening on {}", socket_address);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
