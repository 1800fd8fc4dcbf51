use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Default per-value size limit, matching what browsers give local storage
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage quota exceeded: {size} bytes (limit {limit})")]
    QuotaExceeded { size: usize, limit: usize },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, CacheError>;

/// String key/value store holding serialized blobs.
///
/// Implementations only move strings around; versioning and record
/// semantics live in [`super::CardCache`].
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing is stored
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

fn check_quota(value: &str, quota: Option<usize>) -> Result<()> {
    match quota {
        Some(limit) if value.len() > limit => Err(CacheError::QuotaExceeded {
            size: value.len(),
            limit,
        }),
        _ => Ok(()),
    }
}

/// Stores each key as `<dir>/<key>.json`
pub struct FileBackend {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileBackend {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            quota: Some(DEFAULT_QUOTA_BYTES),
        }
    }

    /// Override the per-value size limit (`None` disables it)
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    /// Get the default storage directory
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("flashtastic").join("storage"))
            .ok_or(CacheError::DataDirNotFound)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.contains('/')
            || key.contains('\\')
            || key.starts_with('.')
        {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        check_quota(value, self.quota)?;
        fs::create_dir_all(&self.dir)?;

        // Sibling temp file, then rename over the blob
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        check_quota(value, self.quota)?;
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_backend() -> (FileBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("storage"));
        (backend, temp_dir)
    }

    #[test]
    fn test_file_backend_write_read_remove() {
        let (backend, _temp) = create_test_backend();

        assert_eq!(backend.read("blob").unwrap(), None);

        backend.write("blob", "{\"a\":1}").unwrap();
        assert_eq!(backend.read("blob").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(backend.dir().join("blob.json").exists());
        assert!(!backend.dir().join("blob.json.tmp").exists());

        backend.write("blob", "{}").unwrap();
        assert_eq!(backend.read("blob").unwrap().as_deref(), Some("{}"));

        backend.remove("blob").unwrap();
        assert_eq!(backend.read("blob").unwrap(), None);

        // Removing again is fine
        backend.remove("blob").unwrap();
    }

    #[test]
    fn test_file_backend_rejects_path_keys() {
        let (backend, _temp) = create_test_backend();
        assert!(matches!(backend.read("../escape"), Err(CacheError::InvalidKey(_))));
        assert!(matches!(backend.write("", "x"), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_file_backend_quota() {
        let (backend, _temp) = create_test_backend();
        let backend = backend.with_quota(Some(4));

        let err = backend.write("blob", "too long").unwrap_err();
        assert!(matches!(err, CacheError::QuotaExceeded { size: 8, limit: 4 }));
        assert_eq!(backend.read("blob").unwrap(), None);
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let (backend, _temp) = create_test_backend();
        // A directory in the blob's place makes the rename fail
        fs::create_dir_all(backend.dir().join("blob.json")).unwrap();

        assert!(backend.write("blob", "{}").is_err());
        assert!(!backend.dir().join("blob.json.tmp").exists());
        assert!(backend.dir().join("blob.json").is_dir());
    }

    #[test]
    fn test_memory_backend_clones_share_entries() {
        let backend = MemoryBackend::new();
        let other = backend.clone();

        backend.write("k", "v").unwrap();
        assert_eq!(other.read("k").unwrap().as_deref(), Some("v"));

        other.remove("k").unwrap();
        assert_eq!(backend.read("k").unwrap(), None);
    }
}
