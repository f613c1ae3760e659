use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cover_framer::artwork::{FrameTemplate, ARTIFACT_FILENAME};
use cover_framer::pipeline::{Pipeline, SearchRequest};
use cover_framer::resolve::{classify, SearchMode};
use cover_framer::spotify::{SpotifyClient, TokenCache};
use cover_framer::Config;

#[derive(Parser, Debug)]
#[command(name = "coverctl", about = "CLI for the Cover Framer pipeline", version)]
struct Cli {
    /// Override SPOTIFY_API_URL
    #[arg(global = true, long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a framed cover and write the PNG to disk
    Generate {
        /// Album/track name or a Spotify catalog URL
        input: String,
        /// Search by track instead of album
        #[arg(long)]
        track: bool,
        /// Output path (defaults to ./Nanacita.png)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Show how an input string classifies (free-text query vs. reference)
    Classify {
        input: String,
        /// Classify with track mode instead of album mode
        #[arg(long)]
        track: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();

    let mut conf = Config::new().expect("Failed to load config");
    if let Some(url) = cli.api_url {
        conf.api_url = url;
    }

    match cli.command {
        Commands::Generate { input, track, out } => {
            let mode = if track { SearchMode::Track } else { SearchMode::Album };

            let template = FrameTemplate::load(&conf.base_image_path, &conf.overlay_image_path)
                .map_err(|e| {
                    eprintln!("Error: {}", e);
                    e
                })?;
            let auth = TokenCache::new(
                conf.accounts_url.clone(),
                conf.client_id.clone(),
                conf.client_secret.clone(),
            );
            let pipeline = Pipeline::new(auth, SpotifyClient::new(conf.api_url.clone()), template);

            let request = SearchRequest { raw_input: input, mode };
            match pipeline.run(&request).await {
                Ok(Some(artifact)) => {
                    let path = out.unwrap_or_else(|| PathBuf::from(ARTIFACT_FILENAME));
                    tokio::fs::write(&path, artifact.png_bytes()?).await?;
                    println!("{}", path.display());
                    Ok(())
                }
                Ok(None) => {
                    eprintln!("Nothing to do: input is blank");
                    std::process::exit(2);
                }
                Err(e) => {
                    eprintln!("nothing found ({})", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Classify { input, track } => {
            let mode = if track { SearchMode::Track } else { SearchMode::Album };
            println!("{:?}", classify(&input, mode));
            Ok(())
        }
    }
}
