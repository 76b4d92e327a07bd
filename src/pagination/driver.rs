//! Pagination driver
//!
//! Runs the token-continuation loop over a `PageFetcher`: one fetch at a
//! time, each request carrying the previous page's token, until the
//! service stops returning tokens, the item budget is spent, or the caller
//! asked for a single page.
//!
//! Failure policy: a failed fetch is returned to the caller when nothing
//! has been retrieved yet or when the run has no budget. A budgeted run
//! that already received items stops quietly instead and keeps what was
//! emitted (`StopReason::PartialResultOnError`). Cancellation is always
//! returned.

use super::cancel::CancelSignal;
use super::fetcher::PageFetcher;
use super::sink::{CollectSink, EmitSink};
use super::types::{
    DriveSummary, DriverPhase, ListPage, ListRequest, PageSizeRange, PaginationOptions,
    PaginationState, StopReason,
};
use crate::error::{Error, Result};
use futures::stream::{self, Stream, TryStreamExt};
use tracing::{debug, info, warn};

/// Drives a paginated list operation
pub struct PaginationDriver<P: PageFetcher> {
    fetcher: P,
    filter: P::Filter,
    options: PaginationOptions,
    cancel: Option<CancelSignal>,
}

impl<P: PageFetcher> PaginationDriver<P> {
    /// Create a driver that auto-iterates with no budget
    pub fn new(fetcher: P, filter: P::Filter) -> Self {
        Self {
            fetcher,
            filter,
            options: PaginationOptions::default(),
            cancel: None,
        }
    }

    /// Set the run options
    #[must_use]
    pub fn with_options(mut self, options: PaginationOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach a cancel signal
    #[must_use]
    pub fn with_cancel(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    /// Get the run options
    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    /// Lazy stream of pages
    ///
    /// Nothing is fetched until the stream is polled. Invalid options
    /// surface as the first item.
    pub fn pages(self) -> impl Stream<Item = Result<ListPage<P::Item>>> {
        stream::unfold(self.into_run(), |mut run| async move {
            run.step().await.map(|result| (result, run))
        })
    }

    /// Lazy stream of individual items, page by page
    pub fn items(self) -> impl Stream<Item = Result<P::Item>> {
        self.pages()
            .map_ok(|page| stream::iter(page.items.into_iter().map(Ok::<_, Error>)))
            .try_flatten()
    }

    /// Run to completion, handing each page to `sink` as it arrives
    pub async fn drive_into<S>(self, sink: &mut S) -> Result<DriveSummary>
    where
        S: EmitSink<P::Item> + ?Sized,
    {
        let (summary, outcome) = self.drive_with_summary(sink).await;
        outcome.map(|()| summary)
    }

    /// Like `drive_into`, but the summary survives a failed run
    ///
    /// On error the summary's `next_token` is the token of the first page
    /// the sink did not receive, so a later run can resume there.
    pub async fn drive_with_summary<S>(self, sink: &mut S) -> (DriveSummary, Result<()>)
    where
        S: EmitSink<P::Item> + ?Sized,
    {
        let mut run = self.into_run();
        let outcome = loop {
            let token_before = run.state.current_token.clone();
            let counts_before = (run.state.pages_fetched, run.state.items_retrieved);
            let page = match run.step().await {
                None => break Ok(()),
                Some(Ok(page)) => page,
                Some(Err(err)) => break Err(err),
            };
            if let Err(err) = sink.emit(page) {
                // The page never reached the caller; resume from it
                run.state.current_token = token_before;
                (run.state.pages_fetched, run.state.items_retrieved) = counts_before;
                run.state.stop(StopReason::Failed);
                break Err(err);
            }
        };

        let summary = run.summary();
        match &outcome {
            Ok(()) => info!(
                operation = run.fetcher.operation_name(),
                pages = summary.pages,
                items = summary.items,
                stop_reason = ?summary.stop_reason,
                "pagination finished"
            ),
            Err(err) => warn!(
                operation = run.fetcher.operation_name(),
                pages = summary.pages,
                items = summary.items,
                stop_reason = ?summary.stop_reason,
                error = %err,
                "pagination failed"
            ),
        }
        (summary, outcome)
    }

    /// Run to completion and gather every item in memory
    pub async fn collect(self) -> Result<(Vec<P::Item>, DriveSummary)> {
        let mut sink = CollectSink::new();
        let summary = self.drive_into(&mut sink).await?;
        Ok((sink.into_items(), summary))
    }

    fn into_run(self) -> Run<P> {
        let range = self.fetcher.page_size_range();
        Run {
            state: PaginationState::new(&self.options),
            invalid: self.options.validate().err(),
            fetcher: self.fetcher,
            filter: self.filter,
            range,
            cancel: self.cancel,
        }
    }
}

/// State carried from one fetch to the next
struct Run<P: PageFetcher> {
    fetcher: P,
    filter: P::Filter,
    range: PageSizeRange,
    cancel: Option<CancelSignal>,
    state: PaginationState,
    invalid: Option<Error>,
}

impl<P: PageFetcher> Run<P> {
    /// Fetch the next page, or `None` once the run has stopped
    async fn step(&mut self) -> Option<Result<ListPage<P::Item>>> {
        if self.state.stopped().is_some() {
            return None;
        }

        if let Some(err) = self.invalid.take() {
            self.state.stop(StopReason::Failed);
            return Some(Err(err));
        }

        if self.cancel.as_ref().is_some_and(CancelSignal::is_cancelled) {
            self.state.stop(StopReason::Cancelled);
            return Some(Err(Error::Cancelled));
        }

        let request = ListRequest {
            filter: self.filter.clone(),
            continuation_token: self.state.current_token.clone(),
            page_size_hint: self.state.next_page_size(self.range),
        };

        self.state.transition(DriverPhase::Fetching);
        let result = match &self.cancel {
            Some(signal) => {
                tokio::select! {
                    biased;
                    () = signal.cancelled() => Err(Error::Cancelled),
                    result = self.fetcher.fetch_page(&request) => result,
                }
            }
            None => self.fetcher.fetch_page(&request).await,
        };

        match result {
            Ok(page) => {
                self.state.record_page(&page);
                debug!(
                    operation = self.fetcher.operation_name(),
                    page = self.state.pages_fetched,
                    items = page.len(),
                    has_more = page.has_more(),
                    "fetched page"
                );
                self.state.transition(DriverPhase::Emitting);
                if let Some(reason) = self.state.stop_reason() {
                    self.state.stop(reason);
                }
                Some(Ok(page))
            }
            Err(Error::Cancelled) => {
                self.state.stop(StopReason::Cancelled);
                Some(Err(Error::Cancelled))
            }
            Err(err) if self.state.must_propagate_failure() => {
                self.state.stop(StopReason::Failed);
                Some(Err(err))
            }
            Err(err) => {
                // Budgeted run with items already emitted: keep the partial
                // result and end without an error.
                warn!(
                    operation = self.fetcher.operation_name(),
                    items = self.state.items_retrieved,
                    error = %err,
                    "page fetch failed after partial result, stopping"
                );
                self.state.stop(StopReason::PartialResultOnError);
                None
            }
        }
    }

    fn summary(&self) -> DriveSummary {
        DriveSummary {
            pages: self.state.pages_fetched,
            items: self.state.items_retrieved,
            next_token: self.state.current_token.clone(),
            stop_reason: self.state.stopped().unwrap_or(StopReason::Exhausted),
        }
    }
}
