//! Configuration for the verification budget and the screening policy.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::claim::ClaimCategory;
use crate::types::finding::{Confidence, Finding, Verdict};

/// Hard resource caps and stopping rules for the verification stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Total tool invocations (search + fetch) per run.
    pub max_total_calls: u32,

    /// Tool invocations per claim. Exceeding this without resolution
    /// forces the claim to `unsupported`.
    pub max_calls_per_claim: u32,

    /// Stop investigating once this many strong findings exist.
    pub early_stop_strong: usize,

    /// At most this many claims are checked per run.
    pub max_claims: usize,

    /// Result cap passed to the search tool.
    pub search_result_cap: usize,

    /// Character cap on fetched page excerpts.
    pub fetch_max_chars: usize,

    /// Per-call timeout for fetches.
    pub fetch_timeout: Duration,

    /// Per-call timeout for searches.
    pub search_timeout: Duration,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_total_calls: 10,
            max_calls_per_claim: 2,
            early_stop_strong: 3,
            max_claims: 7,
            search_result_cap: 5,
            fetch_max_chars: 8000,
            fetch_timeout: Duration::from_secs(20),
            search_timeout: Duration::from_secs(15),
        }
    }
}

impl VerificationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total call budget.
    pub fn with_max_total_calls(mut self, max: u32) -> Self {
        self.max_total_calls = max;
        self
    }

    /// Set the per-claim call cap.
    pub fn with_max_calls_per_claim(mut self, max: u32) -> Self {
        self.max_calls_per_claim = max;
        self
    }

    /// Set the early-stop threshold.
    pub fn with_early_stop(mut self, strong_findings: usize) -> Self {
        self.early_stop_strong = strong_findings;
        self
    }

    /// Set the claim cap.
    pub fn with_max_claims(mut self, max: usize) -> Self {
        self.max_claims = max;
        self
    }
}

/// The screening stage's decision policy.
///
/// Rule (a) discards on a single hard contradiction in a core-fact
/// category. Rule (b) discards on repeated critical inconsistencies; what
/// counts as "critical" is an explicit, configurable predicate rather than
/// an inferred one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningPolicy {
    /// Claim categories whose hard contradiction alone forces a discard.
    pub core_fact_categories: HashSet<ClaimCategory>,

    /// Claim categories eligible to count as critical inconsistencies.
    pub critical_categories: HashSet<ClaimCategory>,

    /// Minimum confidence for a critical inconsistency.
    pub critical_min_confidence: Confidence,

    /// How many distinct critical inconsistencies force a discard.
    pub critical_min_count: usize,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self {
            core_fact_categories: [
                ClaimCategory::FundingRound,
                ClaimCategory::IpOwnership,
                ClaimCategory::AuditedFinancials,
                ClaimCategory::Partnership,
            ]
            .into_iter()
            .collect(),
            critical_categories: [
                ClaimCategory::FundingRound,
                ClaimCategory::AuditedFinancials,
            ]
            .into_iter()
            .collect(),
            critical_min_confidence: Confidence::Medium,
            critical_min_count: 2,
        }
    }
}

impl ScreeningPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark extra categories as core facts.
    pub fn with_core_fact(mut self, category: ClaimCategory) -> Self {
        self.core_fact_categories.insert(category);
        self
    }

    /// Override the critical-inconsistency threshold.
    pub fn with_critical_min_count(mut self, count: usize) -> Self {
        self.critical_min_count = count;
        self
    }

    /// Whether a contradiction in this category alone can force a discard.
    pub fn is_core_fact(&self, category: ClaimCategory) -> bool {
        self.core_fact_categories.contains(&category)
    }

    /// Discard rule (a): hard contradiction on a core fact.
    pub fn is_disqualifying_contradiction(&self, finding: &Finding) -> bool {
        finding.is_hard_contradiction() && self.is_core_fact(finding.category)
    }

    /// Discard rule (b) predicate: a corroborated critical inconsistency
    /// across funding/financial claims.
    pub fn is_critical_inconsistency(&self, finding: &Finding) -> bool {
        finding.verdict == Verdict::Contradicted
            && finding.source_tier.is_reputable()
            && finding.confidence >= self.critical_min_confidence
            && self.critical_categories.contains(&finding.category)
    }
}
