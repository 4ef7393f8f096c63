//! User-facing status and error strings.
//!
//! The backend passes its own progress messages through verbatim; everything
//! the client adds on top lives here so the CLI and the coordinator agree on
//! wording. Strings are Spanish, matching the backend's own messages.

/// Backend sentinel for YouTube auto-generated Mix/Radio playlists.
/// Recognized exactly, never shown to the user as-is.
pub const MIX_PLAYLIST_SENTINEL: &str = "MIX_PLAYLIST_ERROR";

pub const CONNECTING: &str = "Conectando con YouTube...";
pub const STARTING: &str = "Iniciando descarga...";
pub const DOWNLOADING: &str = "Descargando...";
pub const FETCHING_FILE: &str = "Descargando archivo...";
pub const COMPLETED: &str = "¡Descarga completada!";

pub const START_FAILED: &str = "Error al iniciar la descarga";
pub const FETCH_FAILED: &str = "Error al descargar el archivo";
pub const SEARCH_FAILED: &str = "Error al buscar";
pub const PLAYLIST_FAILED: &str = "Error al obtener la playlist";
pub const TIMEOUT: &str = "La descarga tardó demasiado";
pub const CANCELLED: &str = "Descarga cancelada";
pub const NETWORK: &str =
    "No se puede conectar al servidor. Asegúrate de que está ejecutándose";
pub const MIX_PLAYLIST: &str =
    "Las listas Mix de YouTube se generan automáticamente y no se pueden descargar. Prueba con una playlist normal";

/// Progress line shown right after a batch job starts.
pub fn preparing_batch(total: u64) -> String {
    format!("Preparando descarga de {total} canciones...")
}
