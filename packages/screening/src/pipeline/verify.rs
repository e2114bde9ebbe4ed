//! A2 - verification stage.
//!
//! Selects a bounded set of high-impact claims from the extraction
//! bundle and checks them against the web under hard resource caps.
//! The caps, verdict rules, and tie-breaks are enforced here, not left
//! to the analyst.

use crate::budget::{ToolBudget, ToolKind};
use crate::error::{Result, SchemaViolation, Stage};
use crate::traits::{Analyst, EvidenceJudgement, FetchedPage, PageFetcher, WebSearcher};
use crate::types::finding::clean_snippet;
use crate::types::{
    ClaimCandidate, ExtractionBundle, Finding, Verdict, VerificationBundle, VerificationConfig,
};

/// Run the verification stage over an extraction bundle.
///
/// Individual tool failures degrade the affected claim's verdict; the
/// stage itself only fails when it cannot produce schema-valid output.
pub async fn run_verification(
    analyst: &dyn Analyst,
    searcher: &dyn WebSearcher,
    fetcher: &dyn PageFetcher,
    bundle: &ExtractionBundle,
    config: &VerificationConfig,
) -> Result<VerificationBundle> {
    let claims = select_claims(analyst, bundle, config).await?;
    let budget = ToolBudget::new(config.max_total_calls, config.max_calls_per_claim);

    let mut findings: Vec<Finding> = Vec::with_capacity(claims.len());
    for (idx, claim) in claims.iter().enumerate() {
        let strong = findings.iter().filter(|f| f.is_strong()).count();
        if strong >= config.early_stop_strong {
            tracing::info!(
                strong,
                skipped = claims.len() - idx,
                "early stop: enough strong findings"
            );
            break;
        }
        let finding = check_claim(analyst, searcher, fetcher, &budget, idx, claim, config).await?;
        tracing::debug!(
            claim = %finding.claim,
            verdict = %finding.verdict,
            calls = budget.claim_used(idx),
            "claim resolved"
        );
        findings.push(finding);
    }
    tracing::info!(
        findings = findings.len(),
        tool_calls = budget.total_used(),
        "verification complete"
    );

    let memo = analyst.compose_memo(&findings).await?;
    Ok(VerificationBundle::assemble(findings, memo)?)
}

/// Validate and order the analyst's claim candidates.
///
/// Untraceable candidates are dropped; survivors are sorted by impact
/// priority (stable, so bundle order breaks ties) and clamped to the
/// claim cap. No traceable candidates at all is a stage failure.
async fn select_claims(
    analyst: &dyn Analyst,
    bundle: &ExtractionBundle,
    config: &VerificationConfig,
) -> Result<Vec<ClaimCandidate>> {
    let mut candidates = analyst.select_claims(bundle).await?;
    let proposed = candidates.len();
    candidates.retain(|c| bundle.contains_text(&c.basis));
    if candidates.len() < proposed {
        tracing::warn!(
            dropped = proposed - candidates.len(),
            "dropped claim candidates with no basis in the extraction bundle"
        );
    }
    if candidates.is_empty() {
        return Err(SchemaViolation::new(
            Stage::Verification,
            "no traceable claim candidates selected",
        )
        .into());
    }
    candidates.sort_by_key(|c| c.category.priority());
    candidates.truncate(config.max_claims);
    Ok(candidates)
}

/// Check one claim within the shared budget.
async fn check_claim(
    analyst: &dyn Analyst,
    searcher: &dyn WebSearcher,
    fetcher: &dyn PageFetcher,
    budget: &ToolBudget,
    idx: usize,
    claim: &ClaimCandidate,
    config: &VerificationConfig,
) -> Result<Finding> {
    // The same exact query is never issued twice within a run.
    if !budget.register_query(&claim.query) {
        tracing::debug!(query = %claim.query, "duplicate query, resolving unsupported");
        return Ok(Finding::without_evidence(
            &claim.claim,
            claim.category,
            Verdict::Unsupported,
        ));
    }

    if !budget.try_charge(idx, ToolKind::Search).is_granted() {
        return Ok(Finding::without_evidence(
            &claim.claim,
            claim.category,
            Verdict::Unsupported,
        ));
    }
    let hits = match searcher.search(&claim.query, config.search_result_cap).await {
        Ok(hits) => hits,
        Err(err) => {
            tracing::warn!(query = %claim.query, error = %err, "search failed");
            return Ok(Finding::without_evidence(
                &claim.claim,
                claim.category,
                Verdict::Unclear,
            ));
        }
    };
    if hits.is_empty() {
        return Ok(Finding::without_evidence(
            &claim.claim,
            claim.category,
            Verdict::Unsupported,
        ));
    }

    let mut tool_failure = false;
    for hit in &hits {
        if !budget.try_charge(idx, ToolKind::Fetch).is_granted() {
            // Budget exhausted without resolution forces unsupported,
            // regardless of how the earlier attempts failed.
            return Ok(Finding::without_evidence(
                &claim.claim,
                claim.category,
                Verdict::Unsupported,
            ));
        }
        match fetcher.fetch(hit.url.as_str()).await {
            Ok(page) => {
                let judgement = analyst.judge_evidence(claim, &page).await?;
                return Ok(build_finding(claim, &page, judgement));
            }
            Err(err) => {
                tracing::warn!(url = %hit.url, error = %err, "fetch failed");
                tool_failure = true;
            }
        }
    }

    // Candidates exhausted while budget still had room.
    let verdict = if tool_failure {
        Verdict::Unclear
    } else {
        Verdict::Unsupported
    };
    Ok(Finding::without_evidence(&claim.claim, claim.category, verdict))
}

/// Apply the evidence-quality tie-breaks and build the finding.
fn build_finding(claim: &ClaimCandidate, page: &FetchedPage, judgement: EvidenceJudgement) -> Finding {
    // A weak source alone can never carry a contradiction.
    let verdict = if judgement.verdict == Verdict::Contradicted && judgement.source_tier.is_weak() {
        tracing::debug!(claim = %claim.claim, "weak-source contradiction downgraded to unsupported");
        Verdict::Unsupported
    } else {
        judgement.verdict
    };
    Finding {
        claim: claim.claim.clone(),
        category: claim.category,
        verdict,
        evidence_url: Some(page.url.clone()),
        evidence_snippet: clean_snippet(&judgement.snippet),
        source_tier: judgement.source_tier,
        confidence: judgement.confidence,
        date: judgement.date,
    }
}
