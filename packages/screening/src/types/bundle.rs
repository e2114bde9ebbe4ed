//! Extraction bundle - the structured output of the A1 stage.
//!
//! The schema is strict: exactly five top-level keys, unknown scalars are
//! explicit nulls, unknown lists are empty. Anything else is a
//! `SchemaViolation` and the stage is considered failed.

use serde::{Deserialize, Serialize};

use crate::error::{SchemaViolation, Stage};

/// Identity facts about the founder.
///
/// Unknown fields are `None` and serialize as explicit `null`s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FounderProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub linkedin: Option<String>,
    pub location: Option<String>,
}

/// Free-text narrative signals, one per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Signals {
    pub market: Option<String>,
    pub product: Option<String>,
    pub team: Option<String>,
    pub traction: Option<String>,
    pub business_model: Option<String>,
    pub competition: Option<String>,
}

/// Numeric-or-null business metrics.
///
/// No unit normalization is guaranteed here; values are carried as the
/// extractor reported them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metrics {
    pub revenue: Option<f64>,
    pub growth_rate: Option<f64>,
    pub mrr_or_arr: Option<f64>,
    pub users: Option<f64>,
    pub cac: Option<f64>,
    pub ltv: Option<f64>,
    pub burn: Option<f64>,
    pub runway: Option<f64>,
}

/// A risk the extractor flagged. Category is free text, not a closed enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Risk {
    pub category: String,
    pub detail: String,
}

/// The A1 output bundle.
///
/// `evidence` entries are short verbatim-or-near-verbatim quotes traceable
/// to the source text. The bundle is immutable once produced; a new run
/// produces entirely new instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionBundle {
    pub founder_profile: FounderProfile,
    pub signals: Signals,
    pub metrics: Metrics,
    pub risks: Vec<Risk>,
    pub evidence: Vec<String>,
}

impl ExtractionBundle {
    /// Parse raw analyst output against the strict schema.
    ///
    /// Extra top-level keys, missing keys, or type mismatches all fail.
    pub fn from_json(json: &str) -> std::result::Result<Self, SchemaViolation> {
        serde_json::from_str(json)
            .map_err(|e| SchemaViolation::new(Stage::Extraction, e.to_string()))
    }

    /// All searchable text of the bundle, flattened.
    ///
    /// Used to check that claim candidates are traceable to extracted
    /// content rather than invented.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let profile = &self.founder_profile;
        for field in [
            &profile.name,
            &profile.email,
            &profile.company,
            &profile.linkedin,
            &profile.location,
        ] {
            if let Some(v) = field {
                parts.push(v.as_str());
            }
        }
        let signals = &self.signals;
        for field in [
            &signals.market,
            &signals.product,
            &signals.team,
            &signals.traction,
            &signals.business_model,
            &signals.competition,
        ] {
            if let Some(v) = field {
                parts.push(v.as_str());
            }
        }
        for risk in &self.risks {
            parts.push(risk.category.as_str());
            parts.push(risk.detail.as_str());
        }
        for quote in &self.evidence {
            parts.push(quote.as_str());
        }
        parts.join("\n")
    }

    /// Whether a quote occurs anywhere in the bundle's text.
    pub fn contains_text(&self, needle: &str) -> bool {
        !needle.trim().is_empty() && self.searchable_text().contains(needle.trim())
    }
}
