//! Local persisted state: download history, favorites, preferences.
//!
//! Everything is stored as JSON blobs under fixed keys in the XDG state
//! directory, read back with a defensive fallback to the empty default when
//! a file is missing or corrupt. Persistence here is best effort: a failed
//! write must never block a download.

mod favorites;
mod history;
mod kv;

pub use history::{HistoryEntry, HISTORY_CAP};
pub use kv::KvStore;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::Video;

const HISTORY_KEY: &str = "history";
const FAVORITES_KEY: &str = "favorites";
const PREFS_KEY: &str = "prefs";

/// UI preferences persisted across runs. Opaque to the core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Typed facade over the key/value store.
#[derive(Debug, Clone)]
pub struct Store {
    kv: KvStore,
}

impl Store {
    /// Open the store under `~/.local/state/ytmp3/`.
    pub fn open_default() -> Result<Self> {
        let dir = xdg::BaseDirectories::with_prefix("ytmp3")?
            .get_state_home()
            .join("ytmp3");
        Self::open_at(&dir)
    }

    /// Open the store under an explicit directory (tests).
    pub fn open_at(dir: &Path) -> Result<Self> {
        Ok(Self {
            kv: KvStore::open(dir)?,
        })
    }

    /// Download history, newest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.kv.get(HISTORY_KEY)
    }

    /// Record a completed download. De-duplicates by video id (an existing
    /// entry moves to the front) and caps the list at [`HISTORY_CAP`].
    pub fn add_to_history(&self, video: &Video) -> Result<()> {
        let mut entries = self.history();
        history::push_front_deduped(&mut entries, video);
        self.kv.set(HISTORY_KEY, &entries)
    }

    /// Favorites, newest first. Unbounded, de-duplicated by id.
    pub fn favorites(&self) -> Vec<Video> {
        self.kv.get(FAVORITES_KEY)
    }

    pub fn is_favorite(&self, video_id: &str) -> bool {
        self.favorites().iter().any(|v| v.id == video_id)
    }

    /// Add a favorite; returns false if it was already present.
    pub fn add_favorite(&self, video: &Video) -> Result<bool> {
        let mut favorites = self.favorites();
        if !favorites::insert(&mut favorites, video) {
            return Ok(false);
        }
        self.kv.set(FAVORITES_KEY, &favorites)?;
        Ok(true)
    }

    /// Remove a favorite by id; returns false if it was not present.
    pub fn remove_favorite(&self, video_id: &str) -> Result<bool> {
        let mut favorites = self.favorites();
        let before = favorites.len();
        favorites.retain(|v| v.id != video_id);
        if favorites.len() == before {
            return Ok(false);
        }
        self.kv.set(FAVORITES_KEY, &favorites)?;
        Ok(true)
    }

    /// Toggle a favorite; returns true when the video is now a favorite.
    pub fn toggle_favorite(&self, video: &Video) -> Result<bool> {
        if self.is_favorite(&video.id) {
            self.remove_favorite(&video.id)?;
            Ok(false)
        } else {
            self.add_favorite(video)?;
            Ok(true)
        }
    }

    pub fn prefs(&self) -> Prefs {
        self.kv.get(PREFS_KEY)
    }

    pub fn save_prefs(&self, prefs: &Prefs) -> Result<()> {
        self.kv.set(PREFS_KEY, prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn video(id: &str) -> Video {
        Video {
            id: id.to_string(),
            title: format!("Title {id}"),
            url: format!("https://youtu.be/{id}"),
            thumbnail: String::new(),
            channel: "Channel".to_string(),
            duration: Some(180),
        }
    }

    #[test]
    fn history_caps_and_dedupes() {
        let dir = tempdir().unwrap();
        let store = Store::open_at(dir.path()).unwrap();

        for i in 0..60 {
            store.add_to_history(&video(&format!("v{i}"))).unwrap();
        }
        let entries = store.history();
        assert_eq!(entries.len(), HISTORY_CAP);
        // Newest first.
        assert_eq!(entries[0].video.id, "v59");
        assert_eq!(entries.last().unwrap().video.id, "v10");

        // Re-adding an existing id moves it to the front, no duplicate.
        store.add_to_history(&video("v30")).unwrap();
        let entries = store.history();
        assert_eq!(entries.len(), HISTORY_CAP);
        assert_eq!(entries[0].video.id, "v30");
        assert_eq!(
            entries.iter().filter(|e| e.video.id == "v30").count(),
            1
        );
    }

    #[test]
    fn history_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = Store::open_at(dir.path()).unwrap();
            store.add_to_history(&video("a")).unwrap();
        }
        let store = Store::open_at(dir.path()).unwrap();
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn corrupt_history_falls_back_to_empty() {
        let dir = tempdir().unwrap();
        let store = Store::open_at(dir.path()).unwrap();
        store.add_to_history(&video("a")).unwrap();
        std::fs::write(dir.path().join("history.json"), b"{ not json").unwrap();
        assert!(store.history().is_empty());
    }

    #[test]
    fn favorites_toggle_and_dedupe() {
        let dir = tempdir().unwrap();
        let store = Store::open_at(dir.path()).unwrap();

        assert!(store.add_favorite(&video("a")).unwrap());
        assert!(!store.add_favorite(&video("a")).unwrap());
        assert!(store.is_favorite("a"));
        assert_eq!(store.favorites().len(), 1);

        assert!(!store.toggle_favorite(&video("a")).unwrap());
        assert!(!store.is_favorite("a"));
        assert!(store.toggle_favorite(&video("a")).unwrap());
        assert!(store.is_favorite("a"));
    }

    #[test]
    fn prefs_roundtrip() {
        let dir = tempdir().unwrap();
        let store = Store::open_at(dir.path()).unwrap();
        assert!(store.prefs().theme.is_none());
        store
            .save_prefs(&Prefs {
                theme: Some("dark".to_string()),
                language: Some("es".to_string()),
            })
            .unwrap();
        let prefs = store.prefs();
        assert_eq!(prefs.theme.as_deref(), Some("dark"));
        assert_eq!(prefs.language.as_deref(), Some("es"));
    }
}
