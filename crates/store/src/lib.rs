#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Durable savings accounting for remod
//!
//! Accumulated time savings live in a single JSON file, `~/.remod` by
//! default. Reads tolerate a missing file and report a zero total;
//! writes go through a temporary file and an atomic rename so a
//! crashed run never leaves a torn record behind.

use remod_errors::{Error, StoreError};
use remod_types::SavingsRecord;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File name of the default store under the home directory
const DEFAULT_STORE_FILE: &str = ".remod";

/// Savings store manager
#[derive(Clone, Debug)]
pub struct MetricStore {
    path: PathBuf,
}

impl MetricStore {
    /// Create a store backed by the given file
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Resolve the default store path under the user's home directory
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let home = dirs::home_dir().ok_or(StoreError::HomeDirectoryNotFound)?;
        Ok(home.join(DEFAULT_STORE_FILE))
    }

    /// Open the store at its default location
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn open_default() -> Result<Self, Error> {
        Ok(Self::new(Self::default_path()?))
    }

    /// The file this store reads and writes
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the savings record
    ///
    /// A missing file is not an error; it reads as a zero record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<SavingsRecord, Error> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SavingsRecord::default());
            }
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                }
                .into());
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            StoreError::ParseFailed {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Save the savings record
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    pub async fn save(&self, record: &SavingsRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::WriteFailed {
                    path: self.path.display().to_string(),
                    message: format!("failed to create parent dir: {e}"),
                })?;
        }

        let json = serde_json::to_string(record)?;

        // Write to temporary file first
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json)
            .await
            .map_err(|e| StoreError::WriteFailed {
                path: temp_path.display().to_string(),
                message: e.to_string(),
            })?;

        // Atomic rename
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| StoreError::WriteFailed {
                path: self.path.display().to_string(),
                message: format!("failed to rename into place: {e}"),
            })?;

        Ok(())
    }

    /// Read the lifetime total in milliseconds
    ///
    /// # Errors
    ///
    /// Returns an error if the store file exists but cannot be read or parsed.
    pub async fn total_saved_ms(&self) -> Result<u64, Error> {
        Ok(self.load().await?.total_time_saved_ms)
    }

    /// Add to the lifetime total and return the new value
    ///
    /// The total saturates rather than wrapping on overflow.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub async fn add_saved_ms(&self, delta_ms: u64) -> Result<u64, Error> {
        let mut record = self.load().await?;
        record.total_time_saved_ms = record.total_time_saved_ms.saturating_add(delta_ms);
        self.save(&record).await?;
        Ok(record.total_time_saved_ms)
    }

    /// Check if the store file exists
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path).await.is_ok()
    }

    /// Remove the store file, resetting the total to zero
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    pub async fn clear(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::ClearFailed {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_store_operations() {
        let temp = tempdir().unwrap();
        let store = MetricStore::new(temp.path().join("store.json"));

        // Initially absent; reads as zero
        assert!(!store.exists().await);
        assert_eq!(store.total_saved_ms().await.unwrap(), 0);

        // Accumulate
        assert_eq!(store.add_saved_ms(1_500).await.unwrap(), 1_500);
        assert_eq!(store.add_saved_ms(2_500).await.unwrap(), 4_000);
        assert!(store.exists().await);
        assert_eq!(store.total_saved_ms().await.unwrap(), 4_000);

        // Clear resets to zero
        store.clear().await.unwrap();
        assert!(!store.exists().await);
        assert_eq!(store.total_saved_ms().await.unwrap(), 0);

        // Clearing an absent store is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_total_saturates_on_overflow() {
        let temp = tempdir().unwrap();
        let store = MetricStore::new(temp.path().join("store.json"));

        store.add_saved_ms(u64::MAX - 10).await.unwrap();
        assert_eq!(store.add_saved_ms(100).await.unwrap(), u64::MAX);
    }

    #[tokio::test]
    async fn test_corrupt_store_surfaces_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("store.json");
        tokio::fs::write(&path, "not json at all").await.unwrap();

        let store = MetricStore::new(&path);
        let err = store.total_saved_ms().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Store(remod_errors::StoreError::ParseFailed { .. })
        ));

        // The corrupt file is left for the user to inspect or clear
        assert!(store.exists().await);
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let temp = tempdir().unwrap();
        let store = MetricStore::new(temp.path().join("nested/dir/store.json"));

        store.add_saved_ms(42).await.unwrap();
        assert_eq!(store.total_saved_ms().await.unwrap(), 42);
    }
}
