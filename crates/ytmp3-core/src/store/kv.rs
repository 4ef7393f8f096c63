//! JSON-blob key/value store: one file per key under a state directory.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed key/value store. Values are opaque JSON blobs; reads that
/// fail for any reason (missing file, corrupt JSON) return the default.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read and decode a key, falling back to `T::default()` on any failure.
    pub fn get<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.path_for(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(_) => return T::default(),
        };
        match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt store entry, using default");
                T::default()
            }
        }
    }

    /// Encode and write a key.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let data = serde_json::to_string(value)?;
        fs::write(self.path_for(key), data)?;
        Ok(())
    }
}
