//! `ytmp3 history` – show the download history, newest first.

use anyhow::Result;
use ytmp3_core::store::Store;

pub fn run_history(store: &Store) -> Result<()> {
    let entries = store.history();
    if entries.is_empty() {
        println!("Historial vacío");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        let favorite = if store.is_favorite(&entry.video.id) {
            " ★"
        } else {
            ""
        };
        println!("{:>2}. {}{}", i + 1, entry.video.title, favorite);
        println!("    {} ({})", entry.video.url, entry.video.id);
    }
    Ok(())
}
