//! `ytmp3 playlist <url>` – inspect a playlist, optionally download it.

use anyhow::{bail, Result};
use ytmp3_core::coordinator::{Coordinator, JobRequest};
use ytmp3_core::messages;
use ytmp3_core::urls;

use super::download::run_with_progress;
use super::search::format_duration;

pub async fn run_playlist(coordinator: &Coordinator, url: &str, download: bool) -> Result<()> {
    // Mix/Radio lists are rejected client-side; the backend would only
    // answer with the same sentinel after a round trip.
    if urls::is_mix_playlist_url(url) {
        bail!("{}", messages::MIX_PLAYLIST);
    }
    if !urls::is_playlist_url(url) {
        bail!("la URL no contiene una playlist de YouTube");
    }

    let info = coordinator.api().playlist_info(url).await?;
    println!("{} canciones:", info.videos.len());
    for (i, video) in info.videos.iter().enumerate() {
        let duration = video.duration.map(format_duration).unwrap_or_default();
        println!("{:>3}. {}  [{}] {}", i + 1, video.title, video.channel, duration);
    }

    if !download {
        return Ok(());
    }
    if info.videos.is_empty() {
        bail!("la playlist está vacía");
    }

    let req = JobRequest::Batch {
        videos: info.videos,
        title: url.to_string(),
    };
    let outcome = run_with_progress(coordinator, &req).await?;
    println!("Guardado en {}", outcome.path.display());
    Ok(())
}
