//! Emit sinks
//!
//! A sink receives each page as soon as it is fetched, so only one page is
//! held in memory at a time.

use super::types::ListPage;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Receives pages as they arrive
pub trait EmitSink<T> {
    /// Accept one page
    fn emit(&mut self, page: ListPage<T>) -> Result<()>;
}

// ============================================================================
// Collect Sink
// ============================================================================

/// Keeps every page in memory
#[derive(Debug, Clone)]
pub struct CollectSink<T> {
    pages: Vec<ListPage<T>>,
}

impl<T> CollectSink<T> {
    /// Create an empty sink
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Pages received, in order
    pub fn pages(&self) -> &[ListPage<T>] {
        &self.pages
    }

    /// Total items received
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(ListPage::len).sum()
    }

    /// Concatenate the items of all pages
    pub fn into_items(self) -> Vec<T> {
        self.pages.into_iter().flat_map(|page| page.items).collect()
    }
}

impl<T> Default for CollectSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EmitSink<T> for CollectSink<T> {
    fn emit(&mut self, page: ListPage<T>) -> Result<()> {
        self.pages.push(page);
        Ok(())
    }
}

// ============================================================================
// JSON Lines Sink
// ============================================================================

/// What a JSON sink writes per page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// One line per item
    #[default]
    Items,
    /// One line per page, including its continuation token
    Pages,
}

/// Writes pages or items as JSON to any writer, flushing per page
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    mode: EmitMode,
    pretty: bool,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink writing one compact JSON document per line
    pub fn new(writer: W, mode: EmitMode) -> Self {
        Self {
            writer,
            mode,
            pretty: false,
            written: 0,
        }
    }

    /// Pretty-print each document
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Number of JSON documents written
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_value<V: Serialize>(&mut self, value: &V) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}

impl<T: Serialize, W: Write> EmitSink<T> for JsonLinesSink<W> {
    fn emit(&mut self, page: ListPage<T>) -> Result<()> {
        match self.mode {
            EmitMode::Items => {
                for item in &page.items {
                    self.write_value(item)?;
                }
            }
            EmitMode::Pages => self.write_value(&page)?,
        }
        self.writer.flush()?;
        Ok(())
    }
}
