//! A1 - extraction stage.
//!
//! Consumes the merged document text plus hints and produces a
//! schema-valid `ExtractionBundle`. Malformed analyst output fails the
//! stage; partial output never propagates downstream.

use crate::error::Result;
use crate::ingest::DocumentSet;
use crate::traits::Analyst;
use crate::types::ExtractionBundle;

/// Run the extraction stage over an ingested document set.
pub async fn run_extraction(
    analyst: &dyn Analyst,
    documents: &DocumentSet,
) -> Result<ExtractionBundle> {
    let raw = analyst
        .extract_bundle(&documents.merged_text, &documents.founder_hint)
        .await?;
    let bundle = ExtractionBundle::from_json(&raw)?;
    tracing::info!(
        risks = bundle.risks.len(),
        evidence = bundle.evidence.len(),
        company = bundle.founder_profile.company.as_deref().unwrap_or("?"),
        "extraction bundle produced"
    );
    Ok(bundle)
}
