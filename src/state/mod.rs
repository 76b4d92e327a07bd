//! Continuation checkpoints
//!
//! A run that stops before the end of its result set (budget spent, a
//! single page requested, a swallowed later-page failure) leaves a
//! continuation token behind. The checkpoint store keeps that token per
//! operation so a later run can pick up where the last one stopped.
//!
//! - `Checkpoint` - token, item count and timestamp for one operation
//! - `CheckpointStore` - JSON file persistence with atomic writes

mod manager;
mod types;

pub use manager::CheckpointStore;
pub use types::{Checkpoint, CheckpointFile};
