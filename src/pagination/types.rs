//! Pagination types
//!
//! Requests, pages, page-size bounds and the per-run loop state shared by
//! the fetcher and the driver.

use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use tracing::trace;

// ============================================================================
// Requests and Pages
// ============================================================================

/// One page request: the operation's filter plus paging controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest<F> {
    /// Operation-specific selector fields
    pub filter: F,
    /// Token returned by the previous page, absent for the first page
    pub continuation_token: Option<String>,
    /// Maximum number of items the service should return
    pub page_size_hint: Option<u32>,
}

impl<F> ListRequest<F> {
    /// Create a first-page request with no size hint
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            continuation_token: None,
            page_size_hint: None,
        }
    }

    /// Set the continuation token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.continuation_token = Some(token.into());
        self
    }

    /// Set the page size hint
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size_hint = Some(size);
        self
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    /// Items in service order
    pub items: Vec<T>,
    /// Token for the next page; absent on the last page
    pub next_token: Option<String>,
}

impl<T> ListPage<T> {
    /// Create a page. An empty token is treated as absent.
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self {
            items,
            next_token: next_token.none_if_empty(),
        }
    }

    /// Create a final page
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// Number of items in the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the service reported more pages
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}

// ============================================================================
// Page Size Bounds
// ============================================================================

/// Inclusive range of page sizes an operation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeRange {
    min: u32,
    max: u32,
}

impl PageSizeRange {
    /// Create a range. `min` must be at least 1 and not above `max`.
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min == 0 || min > max {
            return Err(Error::InvalidPageSize {
                value: u64::from(min),
                min: 1,
                max,
            });
        }
        Ok(Self { min, max })
    }

    /// Range `1..=max`
    pub const fn up_to(max: u32) -> Self {
        Self {
            min: 1,
            max: if max == 0 { 1 } else { max },
        }
    }

    /// Smallest accepted page size
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Largest accepted page size
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Whether `value` is an accepted page size
    pub fn contains(&self, value: u64) -> bool {
        value >= u64::from(self.min) && value <= u64::from(self.max)
    }

    /// Clamp a remaining budget into the accepted range
    pub fn clamp(&self, value: u64) -> u32 {
        let clamped = value.clamp(u64::from(self.min), u64::from(self.max));
        u32::try_from(clamped).unwrap_or(self.max)
    }

    /// Check an explicit page size without adjusting it
    pub fn validate(&self, value: u64) -> Result<u32> {
        if self.contains(value) {
            Ok(self.clamp(value))
        } else {
            Err(Error::InvalidPageSize {
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for PageSizeRange {
    fn default() -> Self {
        Self::up_to(100)
    }
}

impl std::fmt::Display for PageSizeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

// ============================================================================
// Run Options
// ============================================================================

/// Caller controls for one paginated run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Token to start from instead of the first page
    pub starting_token: Option<String>,
    /// Cap on total items across pages; absent means unbounded
    pub max_items: Option<u64>,
    /// Fetch exactly one page and stop
    pub user_controlling: bool,
}

impl PaginationOptions {
    /// Create default options (auto-iterate, unbounded)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting token
    #[must_use]
    pub fn starting_token(mut self, token: impl Into<String>) -> Self {
        self.starting_token = Some(token.into()).none_if_empty();
        self
    }

    /// Set the item budget
    #[must_use]
    pub fn max_items(mut self, max: u64) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Fetch a single page only
    #[must_use]
    pub fn single_page(mut self) -> Self {
        self.user_controlling = true;
        self
    }

    /// Reject a zero budget
    pub fn validate(&self) -> Result<()> {
        match self.max_items {
            Some(0) => Err(Error::InvalidBudget { value: 0 }),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Driver State
// ============================================================================

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The service returned no continuation token
    Exhausted,
    /// The item budget dropped below one
    BudgetExhausted,
    /// The caller asked for a single page
    SinglePage,
    /// A later page failed after part of the budget was consumed
    PartialResultOnError,
    /// A page fetch failed and the error was returned
    Failed,
    /// The cancel signal fired
    Cancelled,
}

impl StopReason {
    /// Whether the run ended without returning an error
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed | Self::Cancelled)
    }
}

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// No fetch issued yet
    Idle,
    /// A page fetch is in flight
    Fetching,
    /// A page has been handed to the caller
    Emitting,
    /// Terminal
    Stopped(StopReason),
}

/// Loop state for one run, owned by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Token for the next fetch
    pub current_token: Option<String>,
    /// Items still allowed; absent means unbounded
    pub remaining_budget: Option<u64>,
    /// Items received so far
    pub items_retrieved: u64,
    /// Pages received so far
    pub pages_fetched: u64,
    /// Stop after the first page
    pub user_controlling: bool,
    /// Current lifecycle phase
    pub phase: DriverPhase,
}

impl PaginationState {
    /// Create the initial state for a run
    pub fn new(options: &PaginationOptions) -> Self {
        Self {
            current_token: options.starting_token.clone().none_if_empty(),
            remaining_budget: options.max_items,
            items_retrieved: 0,
            pages_fetched: 0,
            user_controlling: options.user_controlling,
            phase: DriverPhase::Idle,
        }
    }

    /// Page size hint for the next fetch
    ///
    /// Only a budgeted run sends a hint; the remaining budget is clamped
    /// into what the operation accepts.
    pub fn next_page_size(&self, range: PageSizeRange) -> Option<u32> {
        self.remaining_budget.map(|remaining| range.clamp(remaining))
    }

    /// Account for a received page
    pub fn record_page<T>(&mut self, page: &ListPage<T>) {
        let count = page.len() as u64;
        self.current_token = page.next_token.clone();
        self.items_retrieved += count;
        self.pages_fetched += 1;
        if let Some(remaining) = self.remaining_budget.as_mut() {
            *remaining = remaining.saturating_sub(count);
        }
    }

    /// Stop reason after the latest page, or `None` to keep going
    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.user_controlling {
            Some(StopReason::SinglePage)
        } else if self.current_token.is_none() {
            Some(StopReason::Exhausted)
        } else if self.remaining_budget.is_some_and(|remaining| remaining < 1) {
            Some(StopReason::BudgetExhausted)
        } else {
            None
        }
    }

    /// Whether a fetch failure must be returned to the caller
    ///
    /// Failures propagate when nothing has been retrieved yet or when the
    /// run has no budget. A budgeted run that already received items ends
    /// quietly with what it has.
    pub fn must_propagate_failure(&self) -> bool {
        self.items_retrieved == 0 || self.remaining_budget.is_none()
    }

    /// Move to a new phase
    pub fn transition(&mut self, phase: DriverPhase) {
        trace!(from = ?self.phase, to = ?phase, "pagination phase");
        self.phase = phase;
    }

    /// Move to `Stopped`
    pub fn stop(&mut self, reason: StopReason) {
        self.transition(DriverPhase::Stopped(reason));
    }

    /// Stop reason if the run has ended
    pub fn stopped(&self) -> Option<StopReason> {
        match self.phase {
            DriverPhase::Stopped(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Outcome of a run driven into a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveSummary {
    /// Pages received
    pub pages: u64,
    /// Items received
    pub items: u64,
    /// Token to resume from, absent when the result set was exhausted
    pub next_token: Option<String>,
    /// Why the run ended
    pub stop_reason: StopReason,
}
