//! CLI for the ytmp3 download client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use ytmp3_core::config;
use ytmp3_core::coordinator::Coordinator;
use ytmp3_core::store::Store;

use commands::{
    run_download, run_favorites, run_history, run_playlist, run_search, FavoritesCommand,
};

/// Top-level CLI for the ytmp3 download client.
#[derive(Debug, Parser)]
#[command(name = "ytmp3")]
#[command(about = "ytmp3: YouTube-to-MP3 download client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download one or more YouTube URLs (or search queries) as MP3.
    Download {
        /// YouTube URLs or free-text searches. A single input shows live
        /// progress; several run concurrently through the download queue.
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Audio quality preset (kbps), overriding the configured default.
        #[arg(long)]
        quality: Option<String>,
    },

    /// Search YouTube and list the results.
    Search {
        /// Free-text query.
        query: String,
    },

    /// Show a playlist's videos, optionally downloading them as a zip.
    Playlist {
        /// Playlist URL (Mix/Radio lists are not supported).
        url: String,

        /// Download the whole playlist as a zip archive.
        #[arg(long)]
        download: bool,
    },

    /// Show the download history (most recent first).
    History,

    /// Manage favorite videos.
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        if let CliCommand::Download {
            quality: Some(q), ..
        } = &cli.command
        {
            cfg.quality = q.clone();
        }

        let store = Store::open_default()?;
        let coordinator = Arc::new(Coordinator::from_config(&cfg, store.clone())?);

        match cli.command {
            CliCommand::Download { inputs, .. } => {
                run_download(coordinator, &inputs, cfg.max_active).await?
            }
            CliCommand::Search { query } => run_search(&coordinator, &query).await?,
            CliCommand::Playlist { url, download } => {
                run_playlist(&coordinator, &url, download).await?
            }
            CliCommand::History => run_history(&store)?,
            CliCommand::Favorites { command } => run_favorites(&store, command)?,
        }

        Ok(())
    }
}
