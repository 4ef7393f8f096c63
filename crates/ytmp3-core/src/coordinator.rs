//! Job lifecycle coordination: start → poll → fetch → save → record.
//!
//! Two operating modes share the same sequence and differ only in where
//! progress is surfaced. Foreground jobs drive a single exclusive indicator
//! (an mpsc sink rendered by the CLI); background jobs report into the
//! visual queue and never touch the indicator.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::api::{ApiClient, ApiError, JobKind, StartedJob, Video};
use crate::config::ClientConfig;
use crate::control::JobControl;
use crate::filename::default_filename;
use crate::messages;
use crate::poller::{poll_to_completion, PollError, PollSettings};
use crate::progress::{ProgressUpdate, DONE_PERCENT, PRE_FETCH_PERCENT, STARTING_PERCENT};
use crate::queue::{QueueJob, QueueManager};
use crate::store::Store;
use crate::urls;

/// What to download: one URL, or a batch of videos packed into a zip.
#[derive(Debug, Clone)]
pub enum JobRequest {
    Single {
        url: String,
        /// Known metadata (from search/playlist results); used for history.
        /// When absent, an entry is synthesized from the URL and filename.
        video: Option<Video>,
    },
    Batch {
        videos: Vec<Video>,
        /// Display title for the queue (e.g. the playlist name).
        title: String,
    },
}

impl JobRequest {
    pub fn kind(&self) -> JobKind {
        match self {
            JobRequest::Single { .. } => JobKind::Single,
            JobRequest::Batch { .. } => JobKind::Batch,
        }
    }

    /// Title shown in the queue while the job runs.
    pub fn display_title(&self) -> String {
        match self {
            JobRequest::Single { video: Some(v), .. } => v.title.clone(),
            JobRequest::Single { url, .. } => url.clone(),
            JobRequest::Batch { title, .. } => title.clone(),
        }
    }
}

/// Terminal failure of one job, with the user-facing message as `Display`.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// The job could not be initiated.
    #[error("{0}")]
    Start(String),
    /// The backend reported a failure while the job ran.
    #[error("{0}")]
    Poll(String),
    /// No terminal state within the polling ceiling.
    #[error("{}", messages::TIMEOUT)]
    Timeout,
    /// The finished artifact could not be retrieved.
    #[error("{0}")]
    Fetch(String),
    /// The server was unreachable.
    #[error("{}", messages::NETWORK)]
    Network,
    /// YouTube auto-generated Mix playlists cannot be downloaded; backend
    /// limitation surfaced with a fixed explanation, never retried.
    #[error("{}", messages::MIX_PLAYLIST)]
    MixPlaylist,
    /// The caller cancelled the job.
    #[error("{}", messages::CANCELLED)]
    Cancelled,
    /// The artifact could not be written to disk.
    #[error("no se pudo guardar el archivo: {0}")]
    Storage(String),
}

/// Successful end of a job.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub job_id: String,
    pub filename: String,
    pub path: PathBuf,
}

/// Drives jobs end-to-end against one backend.
#[derive(Debug)]
pub struct Coordinator {
    api: ApiClient,
    store: Store,
    control: Arc<JobControl>,
    poll: PollSettings,
    download_dir: PathBuf,
    quality: String,
    /// The shared foreground indicator is exclusive; this gate enforces it.
    foreground_gate: tokio::sync::Mutex<()>,
}

impl Coordinator {
    pub fn new(
        api: ApiClient,
        store: Store,
        download_dir: PathBuf,
        quality: String,
        poll: PollSettings,
    ) -> Self {
        Self {
            api,
            store,
            control: Arc::new(JobControl::new()),
            poll,
            download_dir,
            quality,
            foreground_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Build a coordinator from loaded configuration.
    pub fn from_config(cfg: &ClientConfig, store: Store) -> anyhow::Result<Self> {
        let api = ApiClient::new(&cfg.api_base_url)?;
        let download_dir = match &cfg.download_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(Self::new(
            api,
            store,
            download_dir,
            cfg.quality.clone(),
            cfg.poll_settings(),
        ))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Cancellation registry; request_cancel here stops a running job.
    pub fn control(&self) -> &Arc<JobControl> {
        &self.control
    }

    /// Run a job in foreground mode, streaming updates to the shared
    /// indicator. Only one foreground job runs at a time.
    pub async fn run_foreground(
        &self,
        req: &JobRequest,
        progress: &mpsc::Sender<ProgressUpdate>,
    ) -> Result<JobOutcome, JobError> {
        let _exclusive = self.foreground_gate.lock().await;

        send(progress, STARTING_PERCENT, messages::CONNECTING);
        let started = self.start_job(req).await?;

        let prep = if started.total > 1 {
            messages::preparing_batch(started.total)
        } else {
            messages::DOWNLOADING.to_string()
        };
        send(progress, 10.0, &prep);

        self.drive(&started, |percent, message| {
            send(progress, percent, message);
        })
        .await?;

        send(progress, PRE_FETCH_PERCENT, messages::FETCHING_FILE);
        let outcome = self.finish(req, &started).await?;
        send(progress, DONE_PERCENT, messages::COMPLETED);
        Ok(outcome)
    }

    /// Run a job in background mode, reporting into the queue. The entry is
    /// added on start, updated per tick, completed through the queue's dwell
    /// sequence on success, and removed immediately on error.
    pub async fn run_background(
        &self,
        req: &JobRequest,
        queue: &QueueManager,
    ) -> Result<JobOutcome, JobError> {
        let started = self.start_job(req).await?;
        let job_id = started.job_id.clone();
        queue.add(QueueJob {
            id: job_id.clone(),
            title: req.display_title(),
        });

        let polled = self
            .drive(&started, |percent, message| {
                queue.update(&job_id, percent, message);
            })
            .await;
        if let Err(e) = polled {
            // Failed jobs leave the queue immediately.
            queue.remove(&job_id);
            spawn_hide(queue);
            return Err(e);
        }

        queue.update(&job_id, PRE_FETCH_PERCENT, messages::FETCHING_FILE);
        match self.finish(req, &started).await {
            Ok(outcome) => {
                let queue = queue.clone();
                let id = job_id.clone();
                tokio::spawn(async move { queue.complete(&id).await });
                Ok(outcome)
            }
            Err(e) => {
                queue.remove(&job_id);
                spawn_hide(queue);
                Err(e)
            }
        }
    }

    async fn start_job(&self, req: &JobRequest) -> Result<StartedJob, JobError> {
        let result = match req {
            JobRequest::Single { url, .. } => self.api.start_download(url, &self.quality).await,
            JobRequest::Batch { videos, .. } => {
                self.api.start_batch_download(videos, &self.quality).await
            }
        };
        result.map_err(map_start_error)
    }

    /// Poll the started job to a terminal state under a cancel token.
    async fn drive(
        &self,
        started: &StartedJob,
        on_progress: impl FnMut(f64, &str),
    ) -> Result<(), JobError> {
        let token = self.control.register(&started.job_id);
        let polled = poll_to_completion(
            &self.api,
            &started.job_id,
            started.total,
            Some(&token),
            self.poll,
            on_progress,
        )
        .await;
        self.control.unregister(&started.job_id);
        polled.map(|_| ()).map_err(map_poll_error)
    }

    /// Fetch the artifact, save it to disk, and record history.
    async fn finish(&self, req: &JobRequest, started: &StartedJob) -> Result<JobOutcome, JobError> {
        let artifact = self
            .api
            .fetch_artifact(&started.job_id)
            .await
            .map_err(map_fetch_error)?;

        let filename = artifact
            .suggested_filename
            .unwrap_or_else(|| default_filename(started.kind).to_string());
        let path = save_artifact(&self.download_dir, &filename, &artifact.bytes)
            .map_err(|e| JobError::Storage(e.to_string()))?;

        self.record_history(req, &filename);
        Ok(JobOutcome {
            job_id: started.job_id.clone(),
            filename,
            path,
        })
    }

    /// History is best effort: failures are logged, never fatal. Single jobs
    /// record one entry; batch jobs record each constituent video.
    fn record_history(&self, req: &JobRequest, filename: &str) {
        let result = match req {
            JobRequest::Single {
                video: Some(video), ..
            } => self.store.add_to_history(video),
            JobRequest::Single { url, video: None } => {
                let title = filename
                    .rsplit_once('.')
                    .map(|(stem, _)| stem)
                    .unwrap_or(filename);
                let video = Video {
                    id: urls::video_id(url).unwrap_or_else(|| url.clone()),
                    title: title.to_string(),
                    url: url.clone(),
                    thumbnail: String::new(),
                    channel: String::new(),
                    duration: None,
                };
                self.store.add_to_history(&video)
            }
            JobRequest::Batch { videos, .. } => videos
                .iter()
                .try_for_each(|v| self.store.add_to_history(v)),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to record download history");
        }
    }
}

/// Two-phase save: write into a temp file in the target directory, then
/// persist under the final name. A failed write never leaves a partial
/// artifact at the final path.
fn save_artifact(dir: &Path, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    let path = dir.join(filename);
    tmp.persist(&path).map_err(|e| e.error)?;
    Ok(path)
}

fn send(progress: &mpsc::Sender<ProgressUpdate>, percent: f64, message: &str) {
    let _ = progress.try_send(ProgressUpdate {
        percent,
        message: message.to_string(),
    });
}

fn spawn_hide(queue: &QueueManager) {
    let queue = queue.clone();
    tokio::spawn(async move { queue.hide_when_idle().await });
}

fn map_start_error(e: ApiError) -> JobError {
    match e {
        ApiError::Backend { message } if message == messages::MIX_PLAYLIST_SENTINEL => {
            JobError::MixPlaylist
        }
        ApiError::Backend { message } => JobError::Start(message),
        ApiError::Transport { kind, .. } if kind.is_network() => JobError::Network,
        ApiError::Transport { .. } => JobError::Start(messages::START_FAILED.to_string()),
    }
}

fn map_poll_error(e: PollError) -> JobError {
    match e {
        PollError::Backend { message } if message == messages::MIX_PLAYLIST_SENTINEL => {
            JobError::MixPlaylist
        }
        PollError::Backend { message } => JobError::Poll(message),
        PollError::Timeout => JobError::Timeout,
        PollError::Cancelled => JobError::Cancelled,
    }
}

fn map_fetch_error(e: ApiError) -> JobError {
    match e {
        ApiError::Backend { message } => JobError::Fetch(message),
        ApiError::Transport { kind, .. } if kind.is_network() => JobError::Network,
        ApiError::Transport { .. } => JobError::Fetch(messages::FETCH_FAILED.to_string()),
    }
}
