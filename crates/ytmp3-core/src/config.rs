use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::poller::PollSettings;

/// Global configuration loaded from `~/.config/ytmp3/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the download backend.
    pub api_base_url: String,
    /// Audio quality passed to start requests (kbps preset).
    pub quality: String,
    /// Where artifacts are saved; defaults to the current directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Progress poll cadence in milliseconds.
    pub poll_interval_ms: u64,
    /// Wall-clock ceiling on a single job's polling, in seconds.
    pub poll_timeout_secs: u64,
    /// Bound on simultaneously displayed queue slots.
    pub max_active: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            quality: "192".to_string(),
            download_dir: None,
            poll_interval_ms: 1000,
            poll_timeout_secs: 30 * 60,
            max_active: crate::queue::MAX_ACTIVE,
        }
    }
}

impl ClientConfig {
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_secs(self.poll_timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytmp3")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClientConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ClientConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ClientConfig = toml::from_str(&data)?;
    Ok(cfg)
}
