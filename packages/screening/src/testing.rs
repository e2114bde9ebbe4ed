//! Testing utilities including mock implementations.
//!
//! These make the pipeline fully deterministic without model or network
//! calls: scripted analyst judgements, canned search results, and canned
//! pages, all with call recording for assertions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Result, ToolError, ToolResult};
use crate::ingest::FounderHint;
use crate::traits::{
    Analyst, EvidenceJudgement, FetchedPage, PageFetcher, SearchHit, WebSearcher,
};
use crate::types::{
    ClaimCandidate, ClaimCategory, Confidence, ExtractionBundle, Finding, SourceTier, Verdict,
};

/// An extraction bundle with verifiable content, shared across tests.
pub fn bundle_with_claims() -> ExtractionBundle {
    let mut bundle = ExtractionBundle::default();
    bundle.founder_profile.name = Some("Ada Hart".into());
    bundle.founder_profile.company = Some("Voltwise".into());
    bundle.signals.traction = Some("Founded 2021, 40 pilot sites across three utilities".into());
    bundle.evidence = vec![
        "Founded 2021".into(),
        "Series A closed March 2023".into(),
    ];
    bundle
}

/// A claim candidate whose basis is traceable in `bundle_with_claims`.
pub fn candidate(
    claim: impl Into<String>,
    category: ClaimCategory,
    query: impl Into<String>,
) -> ClaimCandidate {
    ClaimCandidate::new(claim, category, query, "Founded 2021")
}

/// A memo that satisfies the word-count and index-reference contract for
/// `findings_len` findings.
pub fn memo_for(findings_len: usize) -> String {
    let refs: Vec<String> = (0..findings_len).map(|i| format!("[{}]", i)).collect();
    let mut memo = format!(
        "Verification memo covering findings {} across the selected claims.",
        refs.join(" ")
    );
    while memo.split_whitespace().count() < 150 {
        memo.push_str(" The evidence base, source tiers, and confidence grades are reflected in the findings above.");
    }
    memo
}

/// Record of a call made to the mock analyst.
#[derive(Debug, Clone)]
pub enum MockAnalystCall {
    ExtractBundle { text_len: usize },
    SelectClaims,
    JudgeEvidence { url: String },
    ComposeMemo { findings: usize },
}

/// A scripted analyst.
///
/// Returns a canned extraction bundle, claim list, per-URL judgements,
/// and memo. Unknown URLs judge as unsupported/unknown/low.
#[derive(Default)]
pub struct MockAnalyst {
    raw_bundle: RwLock<Option<String>>,
    claims: RwLock<Vec<ClaimCandidate>>,
    judgements: RwLock<HashMap<String, EvidenceJudgement>>,
    memo: RwLock<Option<String>>,
    calls: Arc<RwLock<Vec<MockAnalystCall>>>,
}

impl MockAnalyst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the raw extraction output (valid or deliberately broken).
    pub fn with_raw_bundle(self, raw: impl Into<String>) -> Self {
        *self.raw_bundle.write().unwrap() = Some(raw.into());
        self
    }

    /// Script the claim candidates.
    pub fn with_claims(self, claims: Vec<ClaimCandidate>) -> Self {
        *self.claims.write().unwrap() = claims;
        self
    }

    /// Script the judgement for evidence fetched from `url`.
    pub fn with_judgement(
        self,
        url: impl Into<String>,
        verdict: Verdict,
        source_tier: SourceTier,
        confidence: Confidence,
    ) -> Self {
        self.judgements.write().unwrap().insert(
            url.into(),
            EvidenceJudgement {
                verdict,
                source_tier,
                confidence,
                snippet: "relevant excerpt from the source".into(),
                date: None,
            },
        );
        self
    }

    /// Script the memo verbatim.
    pub fn with_memo(self, memo: impl Into<String>) -> Self {
        *self.memo.write().unwrap() = Some(memo.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockAnalystCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Analyst for MockAnalyst {
    async fn extract_bundle(&self, merged_text: &str, _hint: &FounderHint) -> Result<String> {
        self.calls.write().unwrap().push(MockAnalystCall::ExtractBundle {
            text_len: merged_text.len(),
        });
        Ok(self
            .raw_bundle
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| {
                serde_json::to_string(&bundle_with_claims()).expect("bundle serializes")
            }))
    }

    async fn select_claims(&self, _bundle: &ExtractionBundle) -> Result<Vec<ClaimCandidate>> {
        self.calls.write().unwrap().push(MockAnalystCall::SelectClaims);
        Ok(self.claims.read().unwrap().clone())
    }

    async fn judge_evidence(
        &self,
        _claim: &ClaimCandidate,
        page: &FetchedPage,
    ) -> Result<EvidenceJudgement> {
        self.calls.write().unwrap().push(MockAnalystCall::JudgeEvidence {
            url: page.url.clone(),
        });
        Ok(self
            .judgements
            .read()
            .unwrap()
            .get(&page.url)
            .cloned()
            .unwrap_or(EvidenceJudgement {
                verdict: Verdict::Unsupported,
                source_tier: SourceTier::Unknown,
                confidence: Confidence::Low,
                snippet: String::new(),
                date: None,
            }))
    }

    async fn compose_memo(&self, findings: &[Finding]) -> Result<String> {
        self.calls.write().unwrap().push(MockAnalystCall::ComposeMemo {
            findings: findings.len(),
        });
        Ok(self
            .memo
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| memo_for(findings.len())))
    }
}

/// A canned web searcher keyed by exact query.
#[derive(Default)]
pub struct MockSearcher {
    results: RwLock<HashMap<String, Vec<SearchHit>>>,
    failing: RwLock<Vec<String>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add URL results for a query.
    pub fn with_urls(self, query: &str, urls: &[&str]) -> Self {
        let hits: Vec<SearchHit> = urls
            .iter()
            .filter_map(|u| SearchHit::from_url("result", u))
            .collect();
        self.results.write().unwrap().insert(query.to_string(), hits);
        self
    }

    /// Mark a query as failing at the tool level.
    pub fn fail_query(self, query: &str) -> Self {
        self.failing.write().unwrap().push(query.to_string());
        self
    }

    /// Queries issued so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockSearcher {
    async fn search(&self, query: &str, limit: usize) -> ToolResult<Vec<SearchHit>> {
        self.calls.write().unwrap().push(query.to_string());
        if self.failing.read().unwrap().contains(&query.to_string()) {
            return Err(ToolError::Network("mock search outage".into()));
        }
        let mut hits = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        hits.truncate(limit);
        Ok(hits)
    }
}

/// A canned page fetcher keyed by URL.
#[derive(Default)]
pub struct MockFetcher {
    pages: RwLock<HashMap<String, String>>,
    timeouts: RwLock<Vec<String>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page body for a URL.
    pub fn with_page(self, url: &str, content: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.to_string(), content.to_string());
        self
    }

    /// Mark a URL as timing out.
    pub fn timeout_url(self, url: &str) -> Self {
        self.timeouts.write().unwrap().push(url.to_string());
        self
    }

    /// URLs fetched (or attempted) so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> ToolResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());
        if self.timeouts.read().unwrap().contains(&url.to_string()) {
            return Err(ToolError::Timeout {
                url: url.to_string(),
            });
        }
        self.pages
            .read()
            .unwrap()
            .get(url)
            .map(|content| FetchedPage::new(url, content.clone()))
            .ok_or_else(|| ToolError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// A scripted document reader keyed by file name.
#[derive(Default)]
pub struct MockReader {
    documents: RwLock<HashMap<String, String>>,
    unreadable: RwLock<Vec<String>>,
}

impl MockReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the text for a file name.
    pub fn with_document(self, name: &str, text: &str) -> Self {
        self.documents
            .write()
            .unwrap()
            .insert(name.to_string(), text.to_string());
        self
    }

    /// Mark a file name as unreadable.
    pub fn unreadable(self, name: &str) -> Self {
        self.unreadable.write().unwrap().push(name.to_string());
        self
    }
}

#[async_trait]
impl crate::ingest::DocumentReader for MockReader {
    async fn read(
        &self,
        path: &std::path::Path,
    ) -> std::result::Result<crate::ingest::ParsedDocument, crate::error::IngestError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.unreadable.read().unwrap().contains(&name) {
            return Err(crate::error::IngestError::UnreadableDocument {
                file: name,
                reason: "scripted unreadable".into(),
            });
        }
        let text = self
            .documents
            .read()
            .unwrap()
            .get(&name)
            .cloned()
            .unwrap_or_default();
        Ok(crate::ingest::ParsedDocument {
            file: name,
            pages: 1,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_analyst_defaults_are_schema_valid() {
        let analyst = MockAnalyst::new();
        let raw = analyst
            .extract_bundle("deck text", &FounderHint::default())
            .await
            .unwrap();
        assert!(ExtractionBundle::from_json(&raw).is_ok());
        assert!(matches!(
            analyst.calls()[0],
            MockAnalystCall::ExtractBundle { .. }
        ));
    }

    #[tokio::test]
    async fn mock_searcher_caps_and_records() {
        let searcher = MockSearcher::new().with_urls(
            "q",
            &["https://a.example", "https://b.example", "https://c.example"],
        );
        let hits = searcher.search("q", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(searcher.calls(), vec!["q"]);
    }

    #[tokio::test]
    async fn mock_fetcher_scripts_timeouts() {
        let fetcher = MockFetcher::new()
            .with_page("https://ok.example", "body")
            .timeout_url("https://slow.example");
        assert!(fetcher.fetch("https://ok.example").await.is_ok());
        assert!(matches!(
            fetcher.fetch("https://slow.example").await,
            Err(ToolError::Timeout { .. })
        ));
        assert!(matches!(
            fetcher.fetch("https://missing.example").await,
            Err(ToolError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn generated_memo_is_in_contract() {
        let memo = memo_for(3);
        assert!(crate::types::finding::validate_memo(&memo, 3).is_ok());
    }
}
