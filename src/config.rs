//! Env-driven configuration for the service and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binary. Defaults are provided for convenience during development,
//! except for the Spotify client credentials which must be present. The
//! client credentials are opaque secrets and are never printed.
use std::env;
use dotenv;

pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub accounts_url: String,
    pub api_url: String,
    pub base_image_path: String,
    pub overlay_image_path: String,
    pub api_host: String,
    pub api_port: String,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> Result<Self, env::VarError> {
        Ok(Config {
            client_id: env::var("SPOTIFY_CLIENT_ID")?,
            client_secret: env::var("SPOTIFY_CLIENT_SECRET")?,
            accounts_url: env::var("SPOTIFY_ACCOUNTS_URL")
                .unwrap_or_else(|_| "https://accounts.spotify.com".to_string()),
            api_url: env::var("SPOTIFY_API_URL")
                .unwrap_or_else(|_| "https://api.spotify.com/v1".to_string()),
            base_image_path: env::var("BASE_IMAGE_PATH")
                .unwrap_or_else(|_| "./assets/base.png".to_string()),
            overlay_image_path: env::var("OVERLAY_IMAGE_PATH")
                .unwrap_or_else(|_| "./assets/overlay.png".to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT").unwrap_or_else(|_| "8190".to_string()),
        })
    }

    pub fn print_env_vars() {
        println!("SPOTIFY_CLIENT_ID: {}", if env::var("SPOTIFY_CLIENT_ID").is_ok() { "<set>" } else { "<unset>" });
        println!("SPOTIFY_CLIENT_SECRET: {}", if env::var("SPOTIFY_CLIENT_SECRET").is_ok() { "<set>" } else { "<unset>" });
        println!("SPOTIFY_ACCOUNTS_URL: {}", env::var("SPOTIFY_ACCOUNTS_URL").unwrap_or_else(|_| "<unset>".to_string()));
        println!("SPOTIFY_API_URL: {}", env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "<unset>".to_string()));
        println!("BASE_IMAGE_PATH: {}", env::var("BASE_IMAGE_PATH").unwrap_or_else(|_| "<unset>".to_string()));
        println!("OVERLAY_IMAGE_PATH: {}", env::var("OVERLAY_IMAGE_PATH").unwrap_or_else(|_| "<unset>".to_string()));
        println!("API_HOST: {}", env::var("API_HOST").unwrap_or_else(|_| "<unset>".to_string()));
        println!("API_PORT: {}", env::var("API_PORT").unwrap_or_else(|_| "<unset>".to_string()));
    }
}
