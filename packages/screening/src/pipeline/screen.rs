//! A3 - screening stage.
//!
//! A deterministic decision function over the extraction and
//! verification bundles. Pure computation: no tool calls, no suspension,
//! and nothing in the output that is not present in the inputs.

use crate::error::Result;
use crate::types::{
    Decision, ExtractionBundle, Finding, ScreeningDecision, ScreeningPolicy, VerificationBundle,
};

/// Fallback diligence questions used to pad up to the minimum count.
/// Generic topics, but each still demands a concrete artifact.
const DILIGENCE_BANK: [&str; 6] = [
    "Please share the current cap table, including option pool and any outstanding SAFEs or notes.",
    "Please provide monthly revenue and churn figures for the trailing twelve months, exported from your billing system.",
    "Please share the three largest customer contracts or signed order forms, redacted as needed.",
    "Please provide your hiring plan and current org chart with start dates.",
    "Please share the detailed use-of-funds plan for this round.",
    "Please provide bank statements or a treasury report supporting the stated runway.",
];

/// Run the screening stage.
pub fn run_screening(
    extraction: &ExtractionBundle,
    verification: &VerificationBundle,
    policy: &ScreeningPolicy,
) -> Result<ScreeningDecision> {
    let findings = &verification.findings;

    // Rule (a): one hard contradiction on a core fact.
    let rule_a: Vec<usize> = findings
        .iter()
        .enumerate()
        .filter(|(_, f)| policy.is_disqualifying_contradiction(f))
        .map(|(i, _)| i)
        .collect();

    // Rule (b): repeated critical inconsistencies, distinct by claim.
    let mut seen_claims = std::collections::HashSet::new();
    let rule_b: Vec<usize> = findings
        .iter()
        .enumerate()
        .filter(|(_, f)| policy.is_critical_inconsistency(f))
        .filter(|(_, f)| seen_claims.insert(f.claim.clone()))
        .map(|(i, _)| i)
        .collect();

    let discard = !rule_a.is_empty() || rule_b.len() >= policy.critical_min_count;

    let decision = if discard {
        let mut flagged: Vec<usize> = rule_a.clone();
        if rule_b.len() >= policy.critical_min_count {
            flagged.extend(&rule_b);
        }
        flagged.sort_unstable();
        flagged.dedup();
        let red_flags = flagged.iter().map(|&i| red_flag(i, &findings[i])).collect();

        ScreeningDecision {
            decision: Decision::Discard,
            red_flags,
            questions: Vec::new(),
            investor_email_draft: investor_email(extraction, verification, Decision::Discard, &flagged),
            founder_reject_email_draft: Some(founder_reject_email(extraction)),
        }
    } else {
        ScreeningDecision {
            decision: Decision::Proceed,
            red_flags: Vec::new(),
            questions: build_questions(findings),
            investor_email_draft: investor_email(extraction, verification, Decision::Proceed, &[]),
            founder_reject_email_draft: None,
        }
    };

    decision.validate()?;
    tracing::info!(decision = ?decision.decision, red_flags = decision.red_flags.len(), "screening decided");
    Ok(decision)
}

/// A red flag citing the finding index, tier, and confidence.
fn red_flag(index: usize, finding: &Finding) -> String {
    format!(
        "[{}] {} - contradicted ({}, {} confidence)",
        index, finding.claim, finding.source_tier, finding.confidence
    )
}

/// The concrete artifact a question should request, by claim category.
fn requested_artifact(finding: &Finding) -> &'static str {
    use crate::types::ClaimCategory::*;
    match finding.category {
        FoundingYear => "the certificate of incorporation or the registry filing",
        FundingRound => "the term sheet excerpt or the closing press release link",
        Partnership => "the signed partnership agreement or the joint announcement link",
        Traction => "an export from your analytics or billing dashboard",
        MarketSize => "the market study you relied on, with its methodology",
        AuditedFinancials => "the audited financial statements",
        IpOwnership => "the patent filings or IP assignment records",
        Other => "a document or link that establishes the claim",
    }
}

/// One targeted question per unresolved finding, padded from the bank.
fn build_questions(findings: &[Finding]) -> Vec<String> {
    let mut questions: Vec<String> = findings
        .iter()
        .filter(|f| f.needs_follow_up())
        .map(|f| {
            format!(
                "We could not verify \"{}\" ({}). Please provide {}.",
                f.claim,
                f.verdict,
                requested_artifact(f)
            )
        })
        .collect();

    for filler in DILIGENCE_BANK {
        if questions.len() >= crate::types::decision::QUESTIONS_MIN {
            break;
        }
        questions.push(filler.to_string());
    }
    questions.truncate(crate::types::decision::QUESTIONS_MAX);
    questions
}

/// Short investor-facing summary. Uses only input data.
fn investor_email(
    extraction: &ExtractionBundle,
    verification: &VerificationBundle,
    decision: Decision,
    flagged: &[usize],
) -> String {
    let company = extraction
        .founder_profile
        .company
        .as_deref()
        .unwrap_or("the company");
    let supported = count_verdict(verification, crate::types::Verdict::Supported);
    let contradicted = count_verdict(verification, crate::types::Verdict::Contradicted);
    let unresolved = verification
        .findings
        .iter()
        .filter(|f| f.needs_follow_up())
        .count();

    match decision {
        Decision::Proceed => format!(
            "Subject: Screening summary - {company}\n\n\
             We completed the automated screen of {company}. Of {total} checked claims, \
             {supported} were supported by reputable sources and {unresolved} remain \
             unverified; none of the unverified items block progression. The verification \
             memo and citations are attached. Recommendation: proceed to a first call, \
             using the attached diligence questions to close the open items.",
            company = company,
            total = verification.findings.len(),
            supported = supported,
            unresolved = unresolved,
        ),
        Decision::Discard => format!(
            "Subject: Screening summary - {company}\n\n\
             The automated screen of {company} surfaced {contradicted} contradicted \
             claim(s), including {flags} that meet the discard bar (reputable source, \
             high confidence, core facts). Details with finding indices and citations \
             are in the verification memo. Recommendation: discard at screening; a \
             draft response to the founder is attached for your confirmation.",
            company = company,
            contradicted = contradicted,
            flags = flagged.len(),
        ),
    }
}

fn count_verdict(verification: &VerificationBundle, verdict: crate::types::Verdict) -> usize {
    verification
        .findings
        .iter()
        .filter(|f| f.verdict == verdict)
        .count()
}

/// Polite founder rejection, rendered only on discard.
fn founder_reject_email(extraction: &ExtractionBundle) -> String {
    let name = extraction
        .founder_profile
        .name
        .as_deref()
        .unwrap_or("there");
    let company = extraction
        .founder_profile
        .company
        .as_deref()
        .unwrap_or("your company");
    format!(
        "Hi {name},\n\n\
         Thank you for sharing the materials on {company} and for the time you put \
         into them. After an initial review we will not be moving forward at this \
         stage. Several points we checked against public sources did not line up \
         with the materials, and we were unable to reconcile them at screening \
         depth. If you believe we have misread the record, we would genuinely \
         welcome corrected documentation and will take another look.\n\n\
         We appreciate you thinking of us and wish you every success with the \
         raise.\n\nBest regards"
    )
}
