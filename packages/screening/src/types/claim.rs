//! Claim candidates - what the verification stage decides to check.

use serde::{Deserialize, Serialize};

/// Impact category of a claim.
///
/// The first five are the selection priorities for verification; the last
/// three exist so screening can recognize core-fact claims that force a
/// discard when contradicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    FoundingYear,
    FundingRound,
    Partnership,
    Traction,
    MarketSize,
    IpOwnership,
    AuditedFinancials,
    Other,
}

impl ClaimCategory {
    /// Selection priority: lower sorts first.
    pub fn priority(&self) -> u8 {
        match self {
            ClaimCategory::FoundingYear => 0,
            ClaimCategory::FundingRound => 1,
            ClaimCategory::Partnership => 2,
            ClaimCategory::Traction => 3,
            ClaimCategory::MarketSize => 4,
            ClaimCategory::AuditedFinancials => 5,
            ClaimCategory::IpOwnership => 6,
            ClaimCategory::Other => 7,
        }
    }
}

/// A claim the analyst proposes to verify.
///
/// `basis` is the quote from the extraction bundle the claim was derived
/// from; candidates whose basis cannot be found in the bundle are dropped
/// (claims are never invented).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimCandidate {
    /// The claim, stated as a checkable sentence
    pub claim: String,

    /// Impact category used for prioritization and decision policy
    pub category: ClaimCategory,

    /// Search query to check the claim
    pub query: String,

    /// Verbatim-or-near-verbatim bundle text the claim rests on
    pub basis: String,
}

impl ClaimCandidate {
    pub fn new(
        claim: impl Into<String>,
        category: ClaimCategory,
        query: impl Into<String>,
        basis: impl Into<String>,
    ) -> Self {
        Self {
            claim: claim.into(),
            category,
            query: query.into(),
            basis: basis.into(),
        }
    }
}
