//! Page fetcher trait
//!
//! A fetcher turns one `ListRequest` into one `ListPage`. It does no
//! retrying of its own; that belongs to the transport underneath.

use super::types::{ListPage, ListRequest, PageSizeRange};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// One remote list call
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Operation-specific selector fields
    type Filter: Clone + Send + Sync;
    /// Item type returned in each page
    type Item: Send;

    /// Operation name, used in logs and errors
    fn operation_name(&self) -> &str;

    /// Page sizes the operation accepts
    fn page_size_range(&self) -> PageSizeRange {
        PageSizeRange::default()
    }

    /// Fetch a single page
    async fn fetch_page(&self, request: &ListRequest<Self::Filter>)
        -> Result<ListPage<Self::Item>>;
}

#[async_trait]
impl<P: PageFetcher + ?Sized> PageFetcher for Arc<P> {
    type Filter = P::Filter;
    type Item = P::Item;

    fn operation_name(&self) -> &str {
        (**self).operation_name()
    }

    fn page_size_range(&self) -> PageSizeRange {
        (**self).page_size_range()
    }

    async fn fetch_page(
        &self,
        request: &ListRequest<Self::Filter>,
    ) -> Result<ListPage<Self::Item>> {
        (**self).fetch_page(request).await
    }
}
