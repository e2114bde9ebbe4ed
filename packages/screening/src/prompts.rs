//! Prompt templates for LLM-backed analysts.
//!
//! The stages enforce every contract programmatically; these prompts
//! exist to get a model's raw output close enough to parse on the first
//! try.

/// Prompt for the extraction stage.
pub const EXTRACT_PROMPT: &str = r#"Read the merged fundraising documents below and extract a structured bundle.

Output ONLY valid JSON with exactly these keys:
{
  "founder_profile": {"name": null, "email": null, "company": null, "linkedin": null, "location": null},
  "signals": {"market": null, "product": null, "team": null, "traction": null, "business_model": null, "competition": null},
  "metrics": {"revenue": null, "growth_rate": null, "mrr_or_arr": null, "users": null, "cac": null, "ltv": null, "burn": null, "runway": null},
  "risks": [{"category": "...", "detail": "..."}],
  "evidence": ["short verbatim quote from the documents"]
}

Rules:
- Use null for unknown scalars, empty arrays for unknown lists. Never add keys.
- Metrics are numbers or null, never strings.
- Evidence entries are short quotes traceable to the document text.
- Advisory hints (may be wrong): {hints}

Documents:
{merged_text}"#;

/// Prompt for claim selection.
pub const SELECT_CLAIMS_PROMPT: &str = r#"Select 3-7 high-impact claims to verify from this extraction bundle.

Prioritize: founding year, funding/round facts, key partnerships, major traction, market size.

Output a JSON array:
[
  {
    "claim": "checkable sentence",
    "category": "founding_year|funding_round|partnership|traction|market_size|ip_ownership|audited_financials|other",
    "query": "targeted web search query",
    "basis": "verbatim text from the bundle the claim rests on"
  }
]

Rules:
- Every claim must come from content in the bundle; never invent one.
- The basis must be copied verbatim so it can be traced.

Bundle:
{bundle}"#;

/// Prompt for judging fetched evidence against one claim.
pub const JUDGE_EVIDENCE_PROMPT: &str = r#"Judge whether this page supports or contradicts the claim.

Claim: {claim}
Page URL: {url}
Page text:
{content}

Output JSON:
{
  "verdict": "supported|contradicted|unsupported|unclear",
  "source_tier": "official|regulatory|major_press|self_published|unknown",
  "confidence": "high|medium|low",
  "snippet": "the exact passage that backs the verdict, under 240 characters, plain text",
  "date": "YYYY-MM-DD or null"
}

Rules:
- supported: the page clearly backs the claim.
- contradicted: the page clearly conflicts; state the conflict in the snippet.
- unsupported: the page is not probative; do not guess.
- Tier reflects the publisher: company site = official, filings/registries = regulatory,
  recognized outlets = major_press, blogs/social = self_published."#;

/// Prompt for the verification memo.
pub const MEMO_PROMPT: &str = r#"Write a balanced verification memo of 150-220 words over these findings.

Reference findings by bracketed index, e.g. [0], [2]. Be specific about what
was confirmed, what conflicts, and what remains open. No new facts.

Findings:
{findings}"#;

/// Fill the extraction prompt.
pub fn format_extract_prompt(merged_text: &str, hints: &str) -> String {
    EXTRACT_PROMPT
        .replace("{hints}", hints)
        .replace("{merged_text}", merged_text)
}

/// Fill the claim-selection prompt.
pub fn format_select_claims_prompt(bundle_json: &str) -> String {
    SELECT_CLAIMS_PROMPT.replace("{bundle}", bundle_json)
}

/// Fill the evidence-judgement prompt.
pub fn format_judge_prompt(claim: &str, url: &str, content: &str) -> String {
    JUDGE_EVIDENCE_PROMPT
        .replace("{claim}", claim)
        .replace("{url}", url)
        .replace("{content}", content)
}

/// Fill the memo prompt.
pub fn format_memo_prompt(findings_json: &str) -> String {
    MEMO_PROMPT.replace("{findings}", findings_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_filled() {
        let prompt = format_judge_prompt("Founded 2021", "https://r.example", "page body");
        assert!(prompt.contains("Claim: Founded 2021"));
        assert!(prompt.contains("https://r.example"));
        assert!(!prompt.contains("{claim}"));
    }
}
