//! YouTube URL validation and input classification.
//!
//! Mirrors the backend's accepted hosts. Mix/Radio playlists (`list=RD...`)
//! are YouTube-generated and not downloadable, so they are excluded here
//! before a job is ever started.

use url::Url;

const YOUTUBE_HOSTS: [&str; 5] = [
    "youtube.com",
    "www.youtube.com",
    "music.youtube.com",
    "youtu.be",
    "www.youtu.be",
];

/// How a raw input line should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A YouTube URL, downloadable directly.
    Url,
    /// A free-text search query (at least 2 characters).
    Search,
    /// Neither a YouTube URL nor a usable query.
    Invalid,
}

/// Classify trimmed user input as URL, search query, or invalid.
pub fn classify_input(input: &str) -> InputKind {
    let trimmed = input.trim();
    if is_youtube_url(trimmed) {
        InputKind::Url
    } else if trimmed.chars().count() >= 2 {
        InputKind::Search
    } else {
        InputKind::Invalid
    }
}

/// True for an http(s) URL on a known YouTube host with a non-empty path.
pub fn is_youtube_url(input: &str) -> bool {
    let Ok(url) = Url::parse(input.trim()) else {
        return false;
    };
    if url.scheme() != "http" && url.scheme() != "https" {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };
    if !YOUTUBE_HOSTS.iter().any(|h| host.eq_ignore_ascii_case(h)) {
        return false;
    }
    url.path().len() > 1 || url.query().is_some()
}

/// True when the URL carries a downloadable playlist context (`list=` param).
/// Mix/Radio lists (`RD` prefix) are rejected; see [`is_mix_playlist_url`].
pub fn is_playlist_url(input: &str) -> bool {
    match playlist_id(input) {
        Some(id) => !id.starts_with("RD"),
        None => false,
    }
}

/// True for a YouTube Mix/Radio playlist URL (auto-generated, unsupported).
pub fn is_mix_playlist_url(input: &str) -> bool {
    matches!(playlist_id(input), Some(id) if id.starts_with("RD"))
}

/// Extract the video id from a watch/youtu.be URL, if any.
pub fn video_id(input: &str) -> Option<String> {
    if !is_youtube_url(input) {
        return None;
    }
    let url = Url::parse(input.trim()).ok()?;
    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
        if !v.is_empty() {
            return Some(v.into_owned());
        }
    }
    // youtu.be short links carry the id as the path.
    if url.host_str().is_some_and(|h| h.ends_with("youtu.be")) {
        let id = url.path().trim_start_matches('/');
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }
    None
}

/// Extract the `list` query parameter from a YouTube URL, if any.
pub fn playlist_id(input: &str) -> Option<String> {
    if !is_youtube_url(input) {
        return None;
    }
    let url = Url::parse(input.trim()).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == "list")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
