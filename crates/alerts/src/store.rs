//! Snapshot file storage.
//!
//! One JSON record lives at the configured path. Writes go to a sibling
//! temporary file that is synced and then renamed over the target.

use stake_core::Snapshot;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("State file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result of reading the state file.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredSnapshot {
    /// No file yet: first run
    Absent,
    Present(Snapshot),
    /// File exists but does not decode; carries the decode error
    Corrupt(String),
}

/// File-backed store for the single persisted snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Read the persisted snapshot.
    pub async fn load(&self) -> Result<StoredSnapshot, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredSnapshot::Absent),
            Err(e) => return Err(self.io_error(&self.path, e)),
        };

        match serde_json::from_slice::<Snapshot>(&raw) {
            Ok(snapshot) => Ok(StoredSnapshot::Present(snapshot)),
            Err(e) => Ok(StoredSnapshot::Corrupt(e.to_string())),
        }
    }

    /// Replace the persisted snapshot.
    ///
    /// The temporary file is removed again if any step after creating it fails.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let body = serde_json::to_vec(snapshot)?;
        let temp = self.temp_path();

        if let Err(e) = self.write_and_replace(&temp, &body).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(
                        path = %temp.display(),
                        error = %cleanup,
                        "Failed to remove temporary state file"
                    );
                }
            }
            return Err(e);
        }

        debug!(path = %self.path.display(), bytes = body.len(), "Snapshot saved");
        Ok(())
    }

    async fn write_and_replace(&self, temp: &Path, body: &[u8]) -> Result<(), StoreError> {
        let mut file = tokio::fs::File::create(temp)
            .await
            .map_err(|e| self.io_error(temp, e))?;
        file.write_all(body)
            .await
            .map_err(|e| self.io_error(temp, e))?;
        file.sync_all().await.map_err(|e| self.io_error(temp, e))?;
        drop(file);

        tokio::fs::rename(temp, &self.path)
            .await
            .map_err(|e| self.io_error(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use stake_core::Amount;

    fn sample() -> Snapshot {
        Snapshot::new(
            Amount::from_f64(1520.004),
            Amount::from_f64(4.5),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        )
        .with_initial_balance_from_current()
    }

    #[tokio::test]
    async fn test_load_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("qtum_monitor.log"));
        assert_eq!(store.load().await.unwrap(), StoredSnapshot::Absent);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("qtum_monitor.log"));

        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), StoredSnapshot::Present(sample()));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("state.json"));
        store.save(&sample()).await.unwrap();

        let next = Snapshot::new(
            Amount::from_coins(1),
            Amount::from_coins(2),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        );
        store.save(&next).await.unwrap();
        assert_eq!(store.load().await.unwrap(), StoredSnapshot::Present(next));
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qtum_monitor.log");
        std::fs::write(&path, b"{\"balance\": 12.0, \"stak").unwrap();

        let store = SnapshotStore::new(&path);
        assert!(matches!(store.load().await.unwrap(), StoredSnapshot::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("missing").join("state.json"));
        let err = store.save(&sample()).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[tokio::test]
    async fn test_failed_save_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the state file makes the final rename fail
        let path = dir.path().join("qtum_monitor.log");
        std::fs::create_dir(&path).unwrap();

        let store = SnapshotStore::new(&path);
        let err = store.save(&sample()).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!store.temp_path().exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let store = SnapshotStore::new("/usr/local/qtum_monitor.log");
        assert_eq!(store.temp_path(), PathBuf::from("/usr/local/qtum_monitor.log.tmp"));
    }
}
