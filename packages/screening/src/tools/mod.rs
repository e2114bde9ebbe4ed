//! Concrete evidence-tool implementations.

pub mod duckduckgo;
pub mod http_fetch;

pub use duckduckgo::{decode_wrapped_link, DuckDuckGoSearcher};
pub use http_fetch::{clean_html, HttpFetcher};
