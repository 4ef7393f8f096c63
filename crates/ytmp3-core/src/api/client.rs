//! The backend API client.

use anyhow::Result;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::filename::parse_attachment_filename;
use crate::messages;

use super::error::ApiError;
use super::types::{
    Artifact, ErrorBody, JobKind, PlaylistInfo, ProgressReport, SearchBody, StartBatchBody,
    StartDownloadBody, StartedJob, Video,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Async client for the download backend's REST API.
///
/// Cheap to clone; all methods take `&self`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for the given base URL (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url
    }

    /// `POST /api/search` — free-text YouTube search.
    pub async fn search(&self, query: &str) -> Result<Vec<Video>, ApiError> {
        let body: SearchBody = self
            .post_json(
                "/api/search",
                &serde_json::json!({ "query": query }),
                messages::SEARCH_FAILED,
            )
            .await?;
        Ok(body.results)
    }

    /// `POST /api/playlist-info` — resolve a playlist URL into its videos.
    pub async fn playlist_info(&self, url: &str) -> Result<PlaylistInfo, ApiError> {
        self.post_json(
            "/api/playlist-info",
            &serde_json::json!({ "url": url }),
            messages::PLAYLIST_FAILED,
        )
        .await
    }

    /// `POST /api/start-download` — start a single-URL job.
    pub async fn start_download(&self, url: &str, quality: &str) -> Result<StartedJob, ApiError> {
        let body: StartDownloadBody = self
            .post_json(
                "/api/start-download",
                &serde_json::json!({ "url": url, "quality": quality }),
                messages::START_FAILED,
            )
            .await?;
        Ok(StartedJob {
            job_id: body.download_id,
            kind: JobKind::Single,
            total: body.total,
        })
    }

    /// `POST /api/start-batch-download` — start a multi-video (zip) job.
    /// The response carries no total, so it is filled in client-side.
    pub async fn start_batch_download(
        &self,
        videos: &[Video],
        quality: &str,
    ) -> Result<StartedJob, ApiError> {
        let body: StartBatchBody = self
            .post_json(
                "/api/start-batch-download",
                &serde_json::json!({ "videos": videos, "quality": quality }),
                messages::START_FAILED,
            )
            .await?;
        Ok(StartedJob {
            job_id: body.download_id,
            kind: JobKind::Batch,
            total: videos.len() as u64,
        })
    }

    /// `GET /api/progress/{id}` — one poll tick.
    ///
    /// The body is decoded regardless of HTTP status: the backend answers an
    /// expired id with 404 plus a JSON body (`status: "unknown"`), and the
    /// poller wants that payload, not an error.
    pub async fn fetch_progress(&self, job_id: &str) -> Result<ProgressReport, ApiError> {
        let url = self.endpoint(&format!("/api/progress/{job_id}"));
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiError::transport)?;
        resp.json().await.map_err(ApiError::transport)
    }

    /// `GET /api/download/{id}` — retrieve the finished artifact.
    pub async fn fetch_artifact(&self, job_id: &str) -> Result<Artifact, ApiError> {
        let url = self.endpoint(&format!("/api/download/{job_id}"));
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiError::transport)?;

        if !resp.status().is_success() {
            return Err(backend_error(resp, messages::FETCH_FAILED).await);
        }

        let suggested_filename = resp
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_attachment_filename);
        let bytes = resp.bytes().await.map_err(ApiError::transport)?;
        Ok(Artifact {
            bytes: bytes.to_vec(),
            suggested_filename,
        })
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let resp = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(ApiError::transport)?;

        if !resp.status().is_success() {
            return Err(backend_error(resp, fallback).await);
        }
        resp.json().await.map_err(ApiError::transport)
    }
}

/// Map a non-2xx response to a Backend error, preferring the JSON body's
/// `error` field over the generic fallback.
async fn backend_error(resp: reqwest::Response, fallback: &str) -> ApiError {
    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Backend { message }
}
