//! HTTP page fetcher with markup stripping and a size cap.

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::{ToolError, ToolResult};
use crate::traits::fetcher::{FetchedPage, PageFetcher};

const USER_AGENT: &str = "dealgate/0.1 (+research; verification)";

fn script_style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script.*?</script>|<style.*?</style>").expect("static regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<.*?>").expect("static regex"))
}

/// Strip markup and collapse whitespace into citable plain text.
pub fn clean_html(html: &str, max_chars: usize) -> String {
    let without_blocks = script_style_re().replace_all(html, " ");
    let without_tags = tag_re().replace_all(&without_blocks, " ");
    let collapsed = without_tags.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect()
}

/// Fetches a single URL into a cleaned text excerpt.
pub struct HttpFetcher {
    client: reqwest::Client,
    max_chars: usize,
    timeout: Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            max_chars: 8000,
            timeout: Duration::from_secs(20),
        }
    }

    /// Set the excerpt size cap.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> ToolResult<FetchedPage> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ToolError::InvalidUrl {
                url: url.to_string(),
            });
        }

        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ToolError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                return Err(ToolError::RateLimited);
            }
            return Err(ToolError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ToolError::from_reqwest(url, e))?;

        Ok(FetchedPage::new(url, clean_html(&body, self.max_chars)))
    }
}
