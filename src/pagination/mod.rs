//! Pagination module
//!
//! Token-continuation list retrieval, shared by every list operation.
//!
//! # Overview
//!
//! - `PageFetcher` - one remote call: request with token and size hint in,
//!   page with items and next token out
//! - `PaginationDriver` - the loop: token chaining, item budget, single-page
//!   mode, partial-result policy, cancellation
//! - `EmitSink` - receives each page as it arrives

mod cancel;
mod driver;
mod fetcher;
mod sink;
mod types;

pub use cancel::CancelSignal;
pub use driver::PaginationDriver;
pub use fetcher::PageFetcher;
pub use sink::{CollectSink, EmitMode, EmitSink, JsonLinesSink};
pub use types::{
    DriveSummary, DriverPhase, ListPage, ListRequest, PageSizeRange, PaginationOptions,
    PaginationState, StopReason,
};
