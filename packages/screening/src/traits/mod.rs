//! Core trait abstractions: the LLM seam and the evidence tools.

pub mod analyst;
pub mod fetcher;
pub mod searcher;

pub use analyst::{Analyst, EvidenceJudgement};
pub use fetcher::{FetchedPage, PageFetcher};
pub use searcher::{SearchHit, WebSearcher};
