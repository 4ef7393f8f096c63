//! `ytmp3 favorites` – list and edit favorite videos.

use anyhow::{bail, Result};
use clap::Subcommand;
use ytmp3_core::store::Store;

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List favorites, newest first.
    List,
    /// Mark a video from the history as favorite, by video id.
    Add {
        /// Video id (shown by `ytmp3 history`).
        id: String,
    },
    /// Remove a favorite by video id.
    Remove {
        /// Video id.
        id: String,
    },
}

pub fn run_favorites(store: &Store, command: FavoritesCommand) -> Result<()> {
    match command {
        FavoritesCommand::List => {
            let favorites = store.favorites();
            if favorites.is_empty() {
                println!("Sin favoritos");
                return Ok(());
            }
            for (i, video) in favorites.iter().enumerate() {
                println!("{:>2}. {}  [{}]", i + 1, video.title, video.channel);
                println!("    {}", video.url);
            }
        }
        FavoritesCommand::Add { id } => {
            let Some(entry) = store.history().into_iter().find(|e| e.video.id == id) else {
                bail!("el id {id} no está en el historial");
            };
            if store.add_favorite(&entry.video)? {
                println!("Añadido a favoritos: {}", entry.video.title);
            } else {
                println!("Ya estaba en favoritos: {}", entry.video.title);
            }
        }
        FavoritesCommand::Remove { id } => {
            if store.remove_favorite(&id)? {
                println!("Eliminado de favoritos");
            } else {
                bail!("el id {id} no está en favoritos");
            }
        }
    }
    Ok(())
}
