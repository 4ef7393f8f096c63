//! Wire types for the backend API.

use serde::{Deserialize, Serialize};

/// One video entry as returned by search and playlist-info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub channel: String,
    /// Duration in seconds; absent for some playlist entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

/// What a job downloads: one video, or several packed into a zip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Single,
    Batch,
}

/// Successful start response, normalized: batch responses carry no `total`,
/// so the client fills it in from the request.
#[derive(Debug, Clone)]
pub struct StartedJob {
    pub job_id: String,
    pub kind: JobKind,
    /// Expected item count; 0 when the backend could not determine it.
    pub total: u64,
}

/// Raw progress payload from `GET /api/progress/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressReport {
    pub status: String,
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub message: String,
}

/// Playlist metadata from `POST /api/playlist-info`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistInfo {
    pub videos: Vec<Video>,
    #[serde(default)]
    pub total: u64,
}

/// Finished download artifact: raw bytes plus the server-suggested filename
/// (from Content-Disposition), if any.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub suggested_filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StartDownloadBody {
    pub download_id: String,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct StartBatchBody {
    pub download_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchBody {
    pub results: Vec<Video>,
}

/// Optional JSON body carried by non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
