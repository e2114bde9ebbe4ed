//! DuckDuckGo HTML search implementation.
//!
//! Uses the HTML endpoint rather than an API key. Result links arrive
//! wrapped in a redirect indirection (`/l/?uddg=<target>`); they are
//! decoded to the real destination before being returned, never followed
//! literally.

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

use crate::error::{ToolError, ToolResult};
use crate::traits::searcher::{SearchHit, WebSearcher};

const DDG_HTML: &str = "https://html.duckduckgo.com/html";
const USER_AGENT: &str = "dealgate/0.1 (+research; verification)";

fn result_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<a[^>]*class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)
            .expect("static regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<.*?>").expect("static regex"))
}

/// Decode a DuckDuckGo redirect wrapper to its destination URL.
///
/// Links look like `https://duckduckgo.com/l/?kh=-1&uddg=<urlencoded>`;
/// anything else passes through unchanged.
pub fn decode_wrapped_link(raw: &str) -> String {
    // Wrapper hrefs are sometimes scheme-relative
    let candidate = if raw.starts_with("//") {
        format!("https:{}", raw)
    } else {
        raw.to_string()
    };
    if let Ok(parsed) = Url::parse(&candidate) {
        let is_wrapper = parsed
            .host_str()
            .map(|h| h.ends_with("duckduckgo.com"))
            .unwrap_or(false)
            && parsed.path().starts_with("/l/");
        if is_wrapper {
            if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
                return target.into_owned();
            }
        }
    }
    candidate
}

/// Search via the DuckDuckGo HTML endpoint.
pub struct DuckDuckGoSearcher {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl Default for DuckDuckGoSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DuckDuckGoSearcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DDG_HTML.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Override the endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse result anchors out of the HTML body.
    fn parse_results(body: &str, limit: usize) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        for capture in result_link_re().captures_iter(body) {
            let destination = decode_wrapped_link(&capture[1]);
            if !destination.starts_with("http://") && !destination.starts_with("https://") {
                continue;
            }
            let Ok(url) = Url::parse(&destination) else {
                continue;
            };
            let title = tag_re().replace_all(&capture[2], "");
            let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
            let title: String = title.chars().take(120).collect();
            hits.push(SearchHit::new(title, url));
            if hits.len() >= limit {
                break;
            }
        }
        hits
    }
}

#[async_trait]
impl WebSearcher for DuckDuckGoSearcher {
    async fn search(&self, query: &str, limit: usize) -> ToolResult<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(ToolError::EmptyQuery);
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query.trim()), ("kl", "us-en")])
            .header("User-Agent", USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ToolError::from_reqwest(&self.endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                return Err(ToolError::RateLimited);
            }
            return Err(ToolError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ToolError::from_reqwest(&self.endpoint, e))?;

        Ok(Self::parse_results(&body, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_uddg_wrapper_to_destination() {
        let wrapped =
            "https://duckduckgo.com/l/?kh=-1&uddg=https%3A%2F%2Fpress.example%2Fseries-a";
        assert_eq!(decode_wrapped_link(wrapped), "https://press.example/series-a");
    }

    #[test]
    fn scheme_relative_wrapper_also_decodes() {
        let wrapped = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fregistry.example%2Ffiling";
        assert_eq!(decode_wrapped_link(wrapped), "https://registry.example/filing");
    }

    #[test]
    fn plain_links_pass_through() {
        assert_eq!(
            decode_wrapped_link("https://news.example/story"),
            "https://news.example/story"
        );
    }

    #[test]
    fn parses_and_caps_results() {
        let body = r#"
            <a class="result__a" href="https://duckduckgo.com/l/?uddg=https%3A%2F%2Fa.example%2F1">First <b>hit</b></a>
            <a class="result__a" href="https://b.example/2">Second hit</a>
            <a class="result__a" href="javascript:alert(1)">Bad scheme</a>
            <a class="result__a" href="https://c.example/3">Third hit</a>
        "#;
        let hits = DuckDuckGoSearcher::parse_results(body, 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url.as_str(), "https://a.example/1");
        assert_eq!(hits[0].title, "First hit");
        assert_eq!(hits[1].url.as_str(), "https://b.example/2");
    }

    #[tokio::test]
    async fn empty_query_rejected_without_network() {
        let searcher = DuckDuckGoSearcher::new().with_endpoint("http://127.0.0.1:1");
        let err = searcher.search("   ", 5).await.unwrap_err();
        assert!(matches!(err, ToolError::EmptyQuery));
    }
}
