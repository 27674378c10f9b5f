//! JSON array record store
//!
//! Completed conversations append to a JSON array file, one file per agent
//! type, written with two-space indentation. The whole array is read and
//! rewritten on every append; there is no partial-write protection, and a
//! file that fails to parse is logged and treated as empty rather than
//! surfaced as an error.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::PersistenceError;

/// Store for finalized conversation records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the persisted collection; absent or unparsable files read as empty
    async fn load(&self) -> Result<Vec<Value>, PersistenceError>;

    /// Append one entry and rewrite the collection
    async fn append(&self, entry: Value) -> Result<(), PersistenceError>;
}

/// File-backed implementation of [`RecordStore`]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_collection(&self) -> Result<Vec<Value>, PersistenceError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Record file is not a valid JSON array, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Value>, PersistenceError> {
        self.read_collection()
    }

    async fn append(&self, entry: Value) -> Result<(), PersistenceError> {
        let mut entries = self.read_collection()?;
        entries.push(entry);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let rendered = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, rendered)?;

        tracing::info!(
            path = %self.path.display(),
            count = entries.len(),
            "Appended record"
        );
        Ok(())
    }
}
