//! Checkpoint types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a paginated run left off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Continuation token to resume from
    pub token: String,
    /// Items the run retrieved before stopping
    pub items: u64,
    /// When the checkpoint was written
    pub updated_at: DateTime<Utc>,
}

impl Checkpoint {
    /// Create a checkpoint stamped with the current time
    pub fn new(token: impl Into<String>, items: u64) -> Self {
        Self {
            token: token.into(),
            items,
            updated_at: Utc::now(),
        }
    }
}

/// Contents of a checkpoint file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointFile {
    /// Checkpoints keyed by operation name
    #[serde(default)]
    pub checkpoints: BTreeMap<String, Checkpoint>,
}

impl CheckpointFile {
    /// Create an empty file
    pub fn new() -> Self {
        Self::default()
    }

    /// Checkpoint for an operation
    pub fn get(&self, operation: &str) -> Option<&Checkpoint> {
        self.checkpoints.get(operation)
    }

    /// Store a checkpoint, replacing any previous one
    pub fn set(&mut self, operation: impl Into<String>, checkpoint: Checkpoint) {
        self.checkpoints.insert(operation.into(), checkpoint);
    }

    /// Remove an operation's checkpoint, returning whether one existed
    pub fn remove(&mut self, operation: &str) -> bool {
        self.checkpoints.remove(operation).is_some()
    }

    /// Whether no checkpoints are stored
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
