//! HTTP client for the backend download API.
//!
//! Thin wrapper over the REST endpoints: search, playlist info, start
//! single/batch downloads, progress polling, artifact retrieval. Transport
//! failures are classified into typed kinds so callers branch on kind rather
//! than on error-message text.

mod client;
mod error;
mod transport;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use transport::TransportKind;
pub use types::{Artifact, JobKind, PlaylistInfo, ProgressReport, StartedJob, Video};
