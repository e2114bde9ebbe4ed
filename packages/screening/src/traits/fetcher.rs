//! Page fetch trait for evidence retrieval.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ToolResult;

/// A fetched, cleaned page excerpt.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub url: String,
    /// Plain text, markup stripped, truncated to the fetcher's cap.
    pub content: String,
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            fetched_at: Utc::now(),
        }
    }
}

/// Fetch a URL into cleaned plain text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch and clean one page.
    ///
    /// Must reject non-http(s) URLs immediately, without a network call.
    async fn fetch(&self, url: &str) -> ToolResult<FetchedPage>;
}
