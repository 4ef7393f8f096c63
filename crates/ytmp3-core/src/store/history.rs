//! Download history entries and list maintenance.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::Video;

/// Maximum number of history entries kept (most recent first).
pub const HISTORY_CAP: usize = 50;

/// One completed download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub video: Video,
    /// Unix timestamp (seconds) of completion.
    pub downloaded_at: u64,
}

/// Insert at the front, dropping any older entry with the same video id,
/// then truncate to the cap.
pub(super) fn push_front_deduped(entries: &mut Vec<HistoryEntry>, video: &Video) {
    entries.retain(|e| e.video.id != video.id);
    entries.insert(
        0,
        HistoryEntry {
            video: video.clone(),
            downloaded_at: unix_now(),
        },
    );
    entries.truncate(HISTORY_CAP);
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
