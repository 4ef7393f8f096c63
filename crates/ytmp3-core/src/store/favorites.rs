//! Favorites list maintenance (unbounded, de-duplicated by id).

use crate::api::Video;

/// Insert at the front unless already present. Returns true if inserted.
pub(super) fn insert(favorites: &mut Vec<Video>, video: &Video) -> bool {
    if favorites.iter().any(|v| v.id == video.id) {
        return false;
    }
    favorites.insert(0, video.clone());
    true
}
