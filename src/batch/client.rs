//! AWS Batch client
//!
//! `OperationFetcher` is the page fetcher for one operation: it serializes
//! the filter, adds `nextToken` and `maxResults` only when they have a
//! value, posts the body and splits the response into items and the next
//! token.

use super::operations::BatchListOperation;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{
    ListPage, ListRequest, PageFetcher, PageSizeRange, PaginationDriver, PaginationOptions,
};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

const NEXT_TOKEN: &str = "nextToken";
const MAX_RESULTS: &str = "maxResults";

/// Client for the paginated AWS Batch operations
#[derive(Debug, Clone)]
pub struct BatchClient {
    http: Arc<HttpClient>,
}

impl BatchClient {
    /// Wrap an existing HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    /// Build from HTTP client configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::with_config(config)?))
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Page fetcher for an operation
    pub fn fetcher<O: BatchListOperation>(&self) -> OperationFetcher<O> {
        OperationFetcher {
            http: Arc::clone(&self.http),
            _operation: PhantomData,
        }
    }

    /// Pagination driver for an operation
    pub fn paginate<O: BatchListOperation>(
        &self,
        filter: O::Filter,
        options: PaginationOptions,
    ) -> PaginationDriver<OperationFetcher<O>> {
        PaginationDriver::new(self.fetcher::<O>(), filter).with_options(options)
    }

    /// Fetch exactly one page
    pub async fn fetch_page<O: BatchListOperation>(
        &self,
        request: &ListRequest<O::Filter>,
    ) -> Result<ListPage<O::Item>> {
        self.fetcher::<O>().fetch_page(request).await
    }
}

/// Fetches pages of one AWS Batch operation
pub struct OperationFetcher<O> {
    http: Arc<HttpClient>,
    _operation: PhantomData<fn() -> O>,
}

impl<O> Clone for OperationFetcher<O> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            _operation: PhantomData,
        }
    }
}

impl<O: BatchListOperation> std::fmt::Debug for OperationFetcher<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationFetcher")
            .field("operation", &O::NAME)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<O: BatchListOperation> PageFetcher for OperationFetcher<O> {
    type Filter = O::Filter;
    type Item = O::Item;

    fn operation_name(&self) -> &str {
        O::NAME
    }

    fn page_size_range(&self) -> PageSizeRange {
        O::page_size_range()
    }

    async fn fetch_page(&self, request: &ListRequest<O::Filter>) -> Result<ListPage<O::Item>> {
        let body = request_body::<O>(request)?;
        trace!(operation = O::NAME, body = %body, "request body");

        let response = self
            .http
            .post_json(O::NAME, O::PATH, body, RequestConfig::default())
            .await?;
        parse_page::<O>(response)
    }
}

/// Build the JSON body for one page request
///
/// Unset filter fields, token and size are omitted rather than sent as null.
pub fn request_body<O: BatchListOperation>(request: &ListRequest<O::Filter>) -> Result<JsonValue> {
    let mut body = serde_json::to_value(&request.filter)?;
    let object = body.as_object_mut().ok_or_else(|| {
        Error::Other(format!("{} filter must serialize to a JSON object", O::NAME))
    })?;

    if let Some(token) = &request.continuation_token {
        object.insert(NEXT_TOKEN.to_string(), JsonValue::String(token.clone()));
    }
    if let Some(size) = request.page_size_hint {
        let size = O::page_size_range().validate(u64::from(size))?;
        object.insert(MAX_RESULTS.to_string(), JsonValue::from(size));
    }

    Ok(body)
}

/// Split a response into its items and continuation token
///
/// A missing item list is an empty page. An empty token means the end.
pub fn parse_page<O: BatchListOperation>(mut response: JsonValue) -> Result<ListPage<O::Item>> {
    let items = match response.get_mut(O::ITEMS_KEY).map(JsonValue::take) {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(list) => serde_json::from_value(list)?,
    };

    let next_token = response
        .get(NEXT_TOKEN)
        .and_then(JsonValue::as_str)
        .map(String::from);

    Ok(ListPage::new(items, next_token))
}
