//! Hookscrape binary - theorytab crawler and clip exporter.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

mod audio;
mod cache;
mod clips;
mod crawl;
mod fetch;
mod pages;

use cache::Cache;

/// Crawl hooktheory theorytab listings, cache raw pages and section XML,
/// and normalize cached sections into clip records.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Cache directory for raw HTML, section XML, and audio
    #[arg(long, env = "HOOKSCRAPE_CACHE")]
    cache: Option<PathBuf>,

    /// Redownload items that are already cached
    #[arg(long)]
    fresh: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Walk artist, song, and section listings and cache every section XML
    Crawl {
        /// Initial characters to explore
        #[arg(long, default_value = "abcdefghijklmnopqrstuvwxyz0123456789")]
        characters: String,
    },
    /// Parse every cached section XML and export clips as JSON lines
    Clips {
        /// Output path, `-` for stdout
        #[arg(long, default_value = "clips.jsonl")]
        out: PathBuf,
    },
    /// Parse a single theorytab file and print its clips as JSON
    Parse { file: PathBuf },
    /// Download backing audio for a clips file via yt-dlp
    Audio {
        /// Clips file produced by `clips`
        #[arg(default_value = "clips.jsonl")]
        clips: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let cache = Cache::new(cli.cache, cli.fresh)?;
    info!(cache = %cache.root().display(), "hookscrape starting");

    match cli.command {
        Commands::Crawl { characters } => crawl::run(&cache, &characters).await?,
        Commands::Clips { out } => clips::export(&cache, &out)?,
        Commands::Parse { file } => clips::parse_one(&file)?,
        Commands::Audio { clips } => audio::run(&cache, &clips).await?,
    }

    Ok(())
}
