//! Analyst trait - the language-model seam of the pipeline.
//!
//! The stages own all contracts and policies; the analyst only supplies
//! the judgement calls a model is good at. Implementations wrap specific
//! providers and handle prompting and response shapes. Tests use
//! `testing::MockAnalyst`.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::ingest::FounderHint;
use crate::traits::fetcher::FetchedPage;
use crate::types::{ClaimCandidate, Confidence, ExtractionBundle, Finding, SourceTier, Verdict};

/// The analyst's read of one piece of fetched evidence against a claim.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvidenceJudgement {
    pub verdict: Verdict,
    pub source_tier: SourceTier,
    pub confidence: Confidence,
    /// Supporting quote; the stage cleans and caps it.
    pub snippet: String,
    /// Publication or filing date when the source states one.
    pub date: Option<NaiveDate>,
}

/// LLM-backed capabilities consumed by the pipeline stages.
#[async_trait]
pub trait Analyst: Send + Sync {
    /// Produce the raw extraction output for the merged document text.
    ///
    /// Returns raw JSON; the extraction stage parses it against the
    /// strict bundle schema and fails the stage when it does not conform.
    async fn extract_bundle(&self, merged_text: &str, hint: &FounderHint) -> Result<String>;

    /// Propose high-impact claims to verify.
    ///
    /// Each candidate must carry a `basis` quote from the bundle; the
    /// verification stage drops candidates it cannot trace.
    async fn select_claims(&self, bundle: &ExtractionBundle) -> Result<Vec<ClaimCandidate>>;

    /// Judge fetched evidence against a claim.
    async fn judge_evidence(
        &self,
        claim: &ClaimCandidate,
        page: &FetchedPage,
    ) -> Result<EvidenceJudgement>;

    /// Draft the verification memo (150-220 words, findings referenced
    /// by bracketed index). The stage validates the contract.
    async fn compose_memo(&self, findings: &[Finding]) -> Result<String>;
}
