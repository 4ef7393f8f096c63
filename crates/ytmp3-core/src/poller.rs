//! Per-job progress polling loop.
//!
//! Drives the `Starting -> Downloading -> {Complete | Error}` state machine
//! by hitting the progress endpoint at a fixed cadence. Transport failures
//! during a tick are swallowed and retried on the next tick; the loop ends
//! only on a terminal status, cancellation, or the wall-clock ceiling.

use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::api::{ApiClient, ProgressReport};
use crate::control::CancelToken;
use crate::messages;
use crate::progress::{downloading_percent, JobStatus, PRE_FETCH_PERCENT, STARTING_PERCENT};

/// Poll cadence and ceiling. Defaults match the production contract
/// (1 s ticks, 30 min ceiling); tests shrink both.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            timeout: Duration::from_secs(30 * 60),
        }
    }
}

/// Terminal failure of a polling loop.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The backend reported `status: "error"`; message passed through.
    #[error("{message}")]
    Backend { message: String },

    /// No terminal status within the wall-clock ceiling. The backend can
    /// hang indefinitely on encoding or search, and the client must not
    /// leak an endless timer.
    #[error("{}", messages::TIMEOUT)]
    Timeout,

    /// The caller requested cancellation via the job's token.
    #[error("{}", messages::CANCELLED)]
    Cancelled,
}

/// Poll `job_id` until it reaches a terminal state.
///
/// `on_progress` receives every normalized percent/message pair:
/// 5 while starting, `min(10 + (current/total)*80, 90)` while downloading
/// (flat 50 when `total` is unknown), and a final 95 on completion.
/// Returns the completing report on success.
pub async fn poll_to_completion(
    api: &ApiClient,
    job_id: &str,
    total: u64,
    cancel: Option<&CancelToken>,
    settings: PollSettings,
    mut on_progress: impl FnMut(f64, &str),
) -> Result<ProgressReport, PollError> {
    let loop_fut = async {
        let mut ticker = tokio::time::interval(settings.interval);
        loop {
            ticker.tick().await;

            if let Some(token) = cancel {
                if token.load(Ordering::Relaxed) {
                    return Err(PollError::Cancelled);
                }
            }

            let report = match api.fetch_progress(job_id).await {
                Ok(report) => report,
                Err(e) => {
                    // Transient network blips must not abort the job.
                    tracing::debug!(job_id, error = %e, "poll tick failed, retrying");
                    continue;
                }
            };

            match JobStatus::parse(&report.status) {
                JobStatus::Starting => on_progress(STARTING_PERCENT, &report.message),
                JobStatus::Downloading => {
                    on_progress(downloading_percent(report.current, total), &report.message)
                }
                JobStatus::Complete => {
                    on_progress(PRE_FETCH_PERCENT, &report.message);
                    return Ok(report);
                }
                JobStatus::Error => {
                    return Err(PollError::Backend {
                        message: report.message,
                    })
                }
                // Expired or not-yet-visible id; the next tick may resolve it.
                JobStatus::Unknown => {}
            }
        }
    };

    match tokio::time::timeout(settings.timeout, loop_fut).await {
        Ok(outcome) => outcome,
        Err(_) => Err(PollError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cadence_and_ceiling() {
        let s = PollSettings::default();
        assert_eq!(s.interval, Duration::from_millis(1000));
        assert_eq!(s.timeout, Duration::from_secs(1800));
    }
}
