//! Progress projection: backend item counts mapped into UI percent bands.
//!
//! Real backend progress is confined to the 10–90 band so the framing the
//! client adds (connecting, fetching the artifact) stays visually distinct:
//! 0–10 is "starting", 10–90 is "downloading", 90–100 is "finishing".

/// Percent reported while the backend is still in its `starting` phase.
pub const STARTING_PERCENT: f64 = 5.0;
/// Percent reported when the backend reports `complete`, before the artifact
/// fetch begins.
pub const PRE_FETCH_PERCENT: f64 = 95.0;
/// Percent reported once the artifact is saved to disk.
pub const DONE_PERCENT: f64 = 100.0;
/// Flat midpoint used when the backend never told us a total.
pub const UNKNOWN_TOTAL_PERCENT: f64 = 50.0;

/// Lifecycle phase reported by the backend progress endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Starting,
    Downloading,
    Complete,
    Error,
    /// Anything else (e.g. the backend's "unknown" for an expired id).
    /// Ignored by the poller; the next tick may see a real status.
    Unknown,
}

impl JobStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "starting" => JobStatus::Starting,
            "downloading" => JobStatus::Downloading,
            "complete" => JobStatus::Complete,
            "error" => JobStatus::Error,
            _ => JobStatus::Unknown,
        }
    }
}

/// Percent for the downloading phase: `min(10 + (current/total)*80, 90)`
/// when the total is known, otherwise a flat 50.
pub fn downloading_percent(current: u64, total: u64) -> f64 {
    if total == 0 {
        return UNKNOWN_TOTAL_PERCENT;
    }
    (10.0 + (current as f64 / total as f64) * 80.0).min(90.0)
}

/// One normalized progress report for a job.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub percent: f64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downloading_band_bounds() {
        // For any current in [0, total] the percent stays within [10, 90].
        for total in 1..=20u64 {
            for current in 0..=total {
                let p = downloading_percent(current, total);
                assert!((10.0..=90.0).contains(&p), "{current}/{total} -> {p}");
            }
        }
    }

    #[test]
    fn downloading_endpoints() {
        assert!((downloading_percent(0, 1) - 10.0).abs() < 1e-9);
        assert!((downloading_percent(1, 1) - 90.0).abs() < 1e-9);
        assert!((downloading_percent(3, 3) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_total_is_flat_fifty() {
        assert!((downloading_percent(0, 0) - 50.0).abs() < 1e-9);
        assert!((downloading_percent(7, 0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn batch_percents_non_decreasing() {
        let mut last = 0.0;
        for current in 0..=3u64 {
            let p = downloading_percent(current, 3);
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn status_parsing() {
        assert_eq!(JobStatus::parse("starting"), JobStatus::Starting);
        assert_eq!(JobStatus::parse("downloading"), JobStatus::Downloading);
        assert_eq!(JobStatus::parse("complete"), JobStatus::Complete);
        assert_eq!(JobStatus::parse("error"), JobStatus::Error);
        assert_eq!(JobStatus::parse("unknown"), JobStatus::Unknown);
        assert_eq!(JobStatus::parse(""), JobStatus::Unknown);
    }
}
