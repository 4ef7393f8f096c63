mod download;
mod favorites;
mod history;
mod playlist;
mod search;

pub use download::run_download;
pub use favorites::{run_favorites, FavoritesCommand};
pub use history::run_history;
pub use playlist::run_playlist;
pub use search::run_search;
