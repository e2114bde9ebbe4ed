//! Web search trait for evidence discovery.
//!
//! Abstracts over search providers so the verification stage only sees
//! ranked `{title, url}` hits. Implementations enforce their own result
//! caps; the stage enforces the call budget.

use async_trait::async_trait;
use url::Url;

use crate::error::ToolResult;

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub url: Url,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: Url) -> Self {
        Self {
            title: title.into(),
            url,
        }
    }

    /// Create from a URL string, dropping unparseable input.
    pub fn from_url(title: &str, url: &str) -> Option<Self> {
        Url::parse(url).ok().map(|u| Self::new(title, u))
    }
}

/// Search the web for evidence URLs.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Run a query, returning at most `limit` hits.
    ///
    /// Must decode indirection wrappers to the real destination URL and
    /// must never return non-http(s) hits.
    async fn search(&self, query: &str, limit: usize) -> ToolResult<Vec<SearchHit>>;
}
