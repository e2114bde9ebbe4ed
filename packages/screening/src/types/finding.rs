//! Verification findings - the structured output of the A2 stage.
//!
//! The interesting logic lives in the assembly invariants: which findings
//! qualify as contradictions, citation ordering, and memo bounds.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{SchemaViolation, Stage};
use crate::types::claim::ClaimCategory;

/// Verdict on a verified claim. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// At least one reputable source clearly backs the claim
    Supported,
    /// At least one reputable source clearly conflicts with the claim
    Contradicted,
    /// No reputable source found within budget; never guessed
    Unsupported,
    /// A tool-level failure prevented any determination
    Unclear,
}

/// Trust classification of an evidence source, ordered by trust descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTier {
    Official,
    Regulatory,
    MajorPress,
    SelfPublished,
    Unknown,
}

impl SourceTier {
    /// Trust rank: lower is more trusted.
    pub fn trust_rank(&self) -> u8 {
        match self {
            SourceTier::Official => 0,
            SourceTier::Regulatory => 1,
            SourceTier::MajorPress => 2,
            SourceTier::SelfPublished => 3,
            SourceTier::Unknown => 4,
        }
    }

    /// Official, regulatory, and major-press sources count as reputable.
    pub fn is_reputable(&self) -> bool {
        matches!(
            self,
            SourceTier::Official | SourceTier::Regulatory | SourceTier::MajorPress
        )
    }

    /// Weak sources cannot carry a contradiction on their own.
    pub fn is_weak(&self) -> bool {
        !self.is_reputable()
    }
}

impl std::fmt::Display for SourceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceTier::Official => "official",
            SourceTier::Regulatory => "regulatory",
            SourceTier::MajorPress => "major_press",
            SourceTier::SelfPublished => "self_published",
            SourceTier::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Evidence confidence grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        };
        write!(f, "{}", name)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Verdict::Supported => "supported",
            Verdict::Contradicted => "contradicted",
            Verdict::Unsupported => "unsupported",
            Verdict::Unclear => "unclear",
        };
        write!(f, "{}", name)
    }
}

/// Maximum snippet length in characters.
pub const SNIPPET_MAX_CHARS: usize = 240;

/// One verified-claim record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub claim: String,
    pub category: ClaimCategory,
    pub verdict: Verdict,
    pub evidence_url: Option<String>,
    pub evidence_snippet: String,
    pub source_tier: SourceTier,
    pub confidence: Confidence,
    pub date: Option<NaiveDate>,
}

impl Finding {
    /// A finding that never produced usable evidence.
    pub fn without_evidence(claim: impl Into<String>, category: ClaimCategory, verdict: Verdict) -> Self {
        Self {
            claim: claim.into(),
            category,
            verdict,
            evidence_url: None,
            evidence_snippet: String::new(),
            source_tier: SourceTier::Unknown,
            confidence: Confidence::Low,
            date: None,
        }
    }

    /// A hard contradiction: reputable tier and high confidence.
    ///
    /// Only these may appear in the `contradictions` list and trigger
    /// discard rule (a).
    pub fn is_hard_contradiction(&self) -> bool {
        self.verdict == Verdict::Contradicted
            && self.source_tier.is_reputable()
            && self.confidence == Confidence::High
    }

    /// Strong evidence for early-stop accounting.
    pub fn is_strong(&self) -> bool {
        self.source_tier.is_reputable() && self.confidence == Confidence::High
    }

    /// Findings the screening stage must turn into diligence questions.
    pub fn needs_follow_up(&self) -> bool {
        matches!(self.verdict, Verdict::Unsupported | Verdict::Unclear)
    }
}

/// The A2 output bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationBundle {
    pub findings: Vec<Finding>,
    pub contradictions: Vec<String>,
    pub memo: String,
    pub citations: Vec<String>,
}

/// Memo word-count bounds.
pub const MEMO_MIN_WORDS: usize = 150;
pub const MEMO_MAX_WORDS: usize = 220;

impl VerificationBundle {
    /// Assemble a bundle from findings and a memo, deriving the
    /// `contradictions` and `citations` lists per their invariants.
    ///
    /// Fails with a `SchemaViolation` when the memo is out of contract.
    pub fn assemble(
        findings: Vec<Finding>,
        memo: String,
    ) -> std::result::Result<Self, SchemaViolation> {
        validate_memo(&memo, findings.len())?;
        let contradictions = collect_contradictions(&findings);
        let citations = collect_citations(&findings);
        Ok(Self {
            findings,
            contradictions,
            memo,
            citations,
        })
    }
}

/// Contradiction entries: only hard contradictions qualify, referenced by
/// finding index.
pub fn collect_contradictions(findings: &[Finding]) -> Vec<String> {
    findings
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_hard_contradiction())
        .map(|(i, f)| format!("[{}] {} - {}", i, f.claim, f.evidence_snippet))
        .collect()
}

/// Citations in first-appearance order of `evidence_url` across findings.
/// Duplicates collapse to their first appearance.
pub fn collect_citations(findings: &[Finding]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut citations = Vec::new();
    for finding in findings {
        if let Some(url) = &finding.evidence_url {
            if seen.insert(url.clone()) {
                citations.push(url.clone());
            }
        }
    }
    citations
}

/// Validate the memo contract: 150-220 words, and when findings exist at
/// least one in-range bracketed index reference.
pub fn validate_memo(
    memo: &str,
    findings_len: usize,
) -> std::result::Result<(), SchemaViolation> {
    let words = memo.split_whitespace().count();
    if !(MEMO_MIN_WORDS..=MEMO_MAX_WORDS).contains(&words) {
        return Err(SchemaViolation::new(
            Stage::Verification,
            format!("memo is {} words, expected {}-{}", words, MEMO_MIN_WORDS, MEMO_MAX_WORDS),
        ));
    }
    if findings_len == 0 {
        return Ok(());
    }
    let index_ref = Regex::new(r"\[(\d+)\]").expect("static regex");
    let mut any = false;
    for capture in index_ref.captures_iter(memo) {
        any = true;
        let idx: usize = capture[1].parse().unwrap_or(usize::MAX);
        if idx >= findings_len {
            return Err(SchemaViolation::new(
                Stage::Verification,
                format!("memo references finding [{}], only {} exist", idx, findings_len),
            ));
        }
    }
    if !any {
        return Err(SchemaViolation::new(
            Stage::Verification,
            "memo does not reference any finding by index",
        ));
    }
    Ok(())
}

/// Collapse whitespace and truncate to the snippet cap on a character
/// boundary.
pub fn clean_snippet(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(SNIPPET_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(verdict: Verdict, tier: SourceTier, confidence: Confidence, url: &str) -> Finding {
        Finding {
            claim: "Series A closed March 2023".into(),
            category: ClaimCategory::FundingRound,
            verdict,
            evidence_url: if url.is_empty() { None } else { Some(url.into()) },
            evidence_snippet: "the round closed in April 2023".into(),
            source_tier: tier,
            confidence,
            date: None,
        }
    }

    fn memo_of(words: usize, suffix: &str) -> String {
        let mut memo = vec!["evidence"; words];
        memo.push(suffix);
        memo.join(" ")
    }

    #[test]
    fn tier_trust_order_is_descending() {
        assert!(SourceTier::Official.trust_rank() < SourceTier::Regulatory.trust_rank());
        assert!(SourceTier::Regulatory.trust_rank() < SourceTier::MajorPress.trust_rank());
        assert!(SourceTier::MajorPress.trust_rank() < SourceTier::SelfPublished.trust_rank());
        assert!(SourceTier::SelfPublished.trust_rank() < SourceTier::Unknown.trust_rank());
    }

    #[test]
    fn only_hard_contradictions_collected() {
        let findings = vec![
            finding(Verdict::Contradicted, SourceTier::MajorPress, Confidence::High, "https://a"),
            finding(Verdict::Contradicted, SourceTier::SelfPublished, Confidence::High, "https://b"),
            finding(Verdict::Contradicted, SourceTier::Official, Confidence::Medium, "https://c"),
            finding(Verdict::Supported, SourceTier::Official, Confidence::High, "https://d"),
        ];
        let contradictions = collect_contradictions(&findings);
        assert_eq!(contradictions.len(), 1);
        assert!(contradictions[0].starts_with("[0]"));
    }

    #[test]
    fn citations_preserve_first_appearance_order() {
        let findings = vec![
            finding(Verdict::Supported, SourceTier::Official, Confidence::High, "https://b.example"),
            finding(Verdict::Supported, SourceTier::MajorPress, Confidence::High, "https://a.example"),
            finding(Verdict::Contradicted, SourceTier::MajorPress, Confidence::High, "https://b.example"),
            finding(Verdict::Unsupported, SourceTier::Unknown, Confidence::Low, ""),
        ];
        let citations = collect_citations(&findings);
        assert_eq!(citations, vec!["https://b.example", "https://a.example"]);
    }

    #[test]
    fn memo_word_bounds_enforced() {
        assert!(validate_memo(&memo_of(120, "[0]"), 1).is_err());
        assert!(validate_memo(&memo_of(260, "[0]"), 1).is_err());
        assert!(validate_memo(&memo_of(170, "[0]"), 1).is_ok());
    }

    #[test]
    fn memo_must_reference_findings_in_range() {
        assert!(validate_memo(&memo_of(170, "no refs at all"), 2).is_err());
        assert!(validate_memo(&memo_of(170, "[5]"), 2).is_err());
        assert!(validate_memo(&memo_of(170, "see [1]"), 2).is_ok());
        // no findings: references not required
        assert!(validate_memo(&memo_of(170, "nothing to verify"), 0).is_ok());
    }

    #[test]
    fn snippet_is_cleaned_and_capped() {
        let long = format!("  lots\n\nof   whitespace {}", "x".repeat(400));
        let snippet = clean_snippet(&long);
        assert!(snippet.starts_with("lots of whitespace"));
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS);
    }

    #[test]
    fn assemble_derives_invariant_lists() {
        let findings = vec![
            finding(Verdict::Contradicted, SourceTier::MajorPress, Confidence::High, "https://press.example/a"),
            finding(Verdict::Unsupported, SourceTier::Unknown, Confidence::Low, ""),
        ];
        let bundle = VerificationBundle::assemble(findings, memo_of(170, "[0] and [1]")).unwrap();
        assert_eq!(bundle.contradictions.len(), 1);
        assert_eq!(bundle.citations, vec!["https://press.example/a"]);
    }
}
