//! Persisted client-side key/value storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use pharmacy_core::error::AppError;
use pharmacy_core::result::AppResult;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the one-shot flash message.
pub const FLASH_KEY: &str = "flash_message";

/// String key/value storage that survives restarts.
pub trait ClientStorage: Send + Sync + std::fmt::Debug {
    /// Read a value.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Storage backed by one JSON file.
///
/// Every write replaces the whole file through a temporary sibling and a
/// rename, so a crash never leaves a half-written file behind. The cached
/// map only changes once the file has been replaced, so a failed write
/// leaves memory and disk agreeing.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the file at `path`, starting empty if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::with_source(
                    pharmacy_core::ErrorKind::Storage,
                    format!("Corrupt client storage at {}", path.display()),
                    e,
                )
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened client storage");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ClientStorage for FileStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}

/// Process-local storage for tests and one-off sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let first = FileStorage::open(&path).unwrap();
        first.set(TOKEN_KEY, "abc").unwrap();
        first.set(FLASH_KEY, "login_success").unwrap();
        drop(first);

        let second = FileStorage::open(&path).unwrap();
        assert_eq!(second.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        second.remove(TOKEN_KEY).unwrap();
        let third = FileStorage::open(&path).unwrap();
        assert_eq!(third.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(third.get(FLASH_KEY).unwrap().as_deref(), Some("login_success"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        storage.remove(TOKEN_KEY).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert_eq!(err.kind, pharmacy_core::ErrorKind::Storage);
    }

    #[test]
    fn test_failed_write_keeps_memory_and_disk_in_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = FileStorage::open(&path).unwrap();
        storage.set(TOKEN_KEY, "abc").unwrap();

        // A directory where the temporary file goes makes every write fail.
        fs::create_dir(path.with_extension("json.tmp")).unwrap();

        let err = storage.remove(TOKEN_KEY).unwrap_err();
        assert_eq!(err.kind, pharmacy_core::ErrorKind::Storage);
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        assert!(storage.set(FLASH_KEY, "login_success").is_err());
        assert_eq!(storage.get(FLASH_KEY).unwrap(), None);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get(FLASH_KEY).unwrap(), None);
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "t").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("t"));
        storage.remove(TOKEN_KEY).unwrap();
        assert!(storage.get(TOKEN_KEY).unwrap().is_none());
    }
}
