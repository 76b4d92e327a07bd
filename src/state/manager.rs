//! Checkpoint store implementation
//!
//! Provides file-based checkpoint persistence with atomic writes.

use super::types::{Checkpoint, CheckpointFile};
use crate::error::{Error, Result};
use crate::pagination::DriveSummary;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Persists continuation checkpoints per operation
#[derive(Debug)]
pub struct CheckpointStore {
    /// Path to the checkpoint file
    path: PathBuf,
    /// Current contents (cached)
    file: Arc<RwLock<CheckpointFile>>,
    /// Whether to save on every update
    auto_save: bool,
}

impl CheckpointStore {
    /// Create an empty store backed by `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Arc::new(RwLock::new(CheckpointFile::new())),
            auto_save: true,
        }
    }

    /// Create a store that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            file: Arc::new(RwLock::new(CheckpointFile::new())),
            auto_save: false,
        }
    }

    /// Open the store at `path`, loading existing checkpoints if present
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self::new(path);
        store.load().await?;
        Ok(store)
    }

    /// Reload checkpoints from the file
    pub async fn load(&self) -> Result<()> {
        if self.is_in_memory() || !self.path.exists() {
            return Ok(());
        }

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::state(format!("Failed to read checkpoint file: {e}")))?;

        let loaded: CheckpointFile = serde_json::from_str(&contents)
            .map_err(|e| Error::state(format!("Failed to parse checkpoint file: {e}")))?;

        *self.file.write().await = loaded;
        Ok(())
    }

    /// Write checkpoints to the file
    pub async fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let contents = {
            let file = self.file.read().await;
            serde_json::to_string_pretty(&*file)
                .map_err(|e| Error::state(format!("Failed to serialize checkpoints: {e}")))?
        };

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::state(format!("Failed to write checkpoint file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::state(format!("Failed to rename checkpoint file: {e}")))?;

        Ok(())
    }

    /// Checkpoint stored for an operation
    pub async fn get(&self, operation: &str) -> Option<Checkpoint> {
        self.file.read().await.get(operation).cloned()
    }

    /// Token to resume an operation from
    pub async fn resume_token(&self, operation: &str) -> Option<String> {
        self.get(operation).await.map(|checkpoint| checkpoint.token)
    }

    /// Store a checkpoint for an operation
    pub async fn set(&self, operation: &str, checkpoint: Checkpoint) -> Result<()> {
        self.file.write().await.set(operation, checkpoint);

        if self.auto_save {
            self.save().await?;
        }
        Ok(())
    }

    /// Remove an operation's checkpoint
    pub async fn clear(&self, operation: &str) -> Result<()> {
        let removed = self.file.write().await.remove(operation);

        if removed && self.auto_save {
            self.save().await?;
        }
        Ok(())
    }

    /// Record how a run ended
    ///
    /// A run that stopped with a continuation token stores it; a run that
    /// reached the end of the result set clears the operation's entry.
    pub async fn record(&self, operation: &str, summary: &DriveSummary) -> Result<()> {
        match &summary.next_token {
            Some(token) => {
                debug!(operation, token = %token, "saving checkpoint");
                self.set(operation, Checkpoint::new(token.clone(), summary.items))
                    .await
            }
            None => {
                debug!(operation, "result set exhausted, clearing checkpoint");
                self.clear(operation).await
            }
        }
    }

    /// Snapshot of every stored checkpoint
    pub async fn snapshot(&self) -> CheckpointFile {
        self.file.read().await.clone()
    }

    /// Get the checkpoint file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

impl Clone for CheckpointStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            file: Arc::clone(&self.file),
            auto_save: self.auto_save,
        }
    }
}
