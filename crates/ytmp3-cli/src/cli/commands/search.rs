//! `ytmp3 search <query>` – list YouTube results for a query.

use anyhow::Result;
use ytmp3_core::coordinator::Coordinator;

pub async fn run_search(coordinator: &Coordinator, query: &str) -> Result<()> {
    let results = coordinator.api().search(query).await?;
    if results.is_empty() {
        println!("Sin resultados para: {query}");
        return Ok(());
    }
    for (i, video) in results.iter().enumerate() {
        let duration = video
            .duration
            .map(format_duration)
            .unwrap_or_default();
        println!(
            "{:>2}. {}  [{}] {}",
            i + 1,
            video.title,
            video.channel,
            duration
        );
        println!("    {}", video.url);
    }
    Ok(())
}

/// `mm:ss` rendering of a duration in seconds.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
