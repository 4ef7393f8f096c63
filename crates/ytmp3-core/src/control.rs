//! Job cancellation: shared cancel tokens per running job.
//!
//! Each running job registers a token here; any holder of the registry can
//! request cancellation by job id. The poller checks the token every tick and
//! ends the job with a `Cancelled` outcome, distinct from a backend error.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Cancellation token for one job. Set once, never cleared.
pub type CancelToken = Arc<AtomicBool>;

/// Registry of job id -> cancel token for all in-flight jobs.
#[derive(Debug, Default)]
pub struct JobControl {
    jobs: RwLock<HashMap<String, CancelToken>>,
}

impl JobControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a running job; returns the token the poller should watch.
    pub fn register(&self, job_id: &str) -> CancelToken {
        let token = Arc::new(AtomicBool::new(false));
        self.jobs
            .write()
            .unwrap()
            .insert(job_id.to_string(), Arc::clone(&token));
        token
    }

    /// Unregister a finished job (success, failure, or cancellation).
    pub fn unregister(&self, job_id: &str) {
        self.jobs.write().unwrap().remove(job_id);
    }

    /// Request cancellation of a job. No-op for unknown ids.
    pub fn request_cancel(&self, job_id: &str) {
        if let Some(token) = self.jobs.read().unwrap().get(job_id) {
            token.store(true, Ordering::Relaxed);
        }
    }

    /// True if the job is registered and cancellation was requested.
    pub fn is_cancelled(&self, job_id: &str) -> bool {
        self.jobs
            .read()
            .unwrap()
            .get(job_id)
            .is_some_and(|t| t.load(Ordering::Relaxed))
    }
}
