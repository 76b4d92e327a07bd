// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # batch-pager
//!
//! Token-paginated list retrieval for AWS Batch.
//!
//! ## Features
//!
//! - **Token Chaining**: Each request carries the previous page's continuation token
//! - **Item Budgets**: Cap total items; the page-size hint follows the remaining budget
//! - **Partial Results**: A budgeted run keeps what it has when a later page fails
//! - **Streaming**: Pages reach the sink as soon as they are fetched
//! - **Cancellation**: Stops before the next fetch and aborts an in-flight one
//! - **Checkpoints**: Resume a listing where the last run stopped
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use batch_pager::batch::{BatchClient, ListJobs, ListJobsFilter};
//! use batch_pager::config::Settings;
//! use batch_pager::pagination::PaginationOptions;
//!
//! #[tokio::main]
//! async fn main() -> batch_pager::Result<()> {
//!     let settings = Settings::default().with_region(Some("eu-west-1".into()));
//!     let client = BatchClient::with_config(settings.http_client_config()?)?;
//!
//!     let (jobs, summary) = client
//!         .paginate::<ListJobs>(
//!             ListJobsFilter::queue("nightly"),
//!             PaginationOptions::new().max_items(500),
//!         )
//!         .collect()
//!         .await?;
//!
//!     println!("{} jobs, resume token {:?}", jobs.len(), summary.next_token);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        CLI / Runner                          │
//! │  settings → client → driver → sink (stdout)   checkpoints    │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────────┬─────────────┴──────────┬──────────────────────┐
//! │   Pagination  │        Batch           │        HTTP          │
//! ├───────────────┼────────────────────────┼──────────────────────┤
//! │ Driver        │ ListJobs               │ POST JSON            │
//! │ Budget        │ DescribeJobQueues ...  │ Retry / Backoff      │
//! │ Cancel        │ OperationFetcher       │ Rate Limit           │
//! │ Emit Sink     │ Item models            │ AWS error decoding   │
//! └───────────────┴────────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with retry and rate limiting
pub mod http;

/// Token-continuation pagination
pub mod pagination;

/// AWS Batch list operations
pub mod batch;

/// Continuation checkpoints
pub mod state;

/// Runtime settings
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use batch::{BatchClient, BatchListOperation};
pub use pagination::{PageFetcher, PaginationDriver, PaginationOptions};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
