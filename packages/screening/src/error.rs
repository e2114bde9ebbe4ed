//! Typed errors for the screening pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// The three pipeline stages, used for error attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// A1 - document extraction
    Extraction,
    /// A2 - claim verification
    Verification,
    /// A3 - screening decision
    Screening,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Extraction => write!(f, "extraction"),
            Stage::Verification => write!(f, "verification"),
            Stage::Screening => write!(f, "screening"),
        }
    }
}

/// Errors that can occur while ingesting documents.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A referenced document path does not exist. Fatal to ingestion.
    #[error("document not found: {path}")]
    NotFound { path: String },

    /// A document (or one of its pages) could not be read as text.
    ///
    /// Non-fatal: the affected unit degrades to empty text. Surfaced by
    /// readers so the ingest layer can decide how to degrade.
    #[error("unreadable document {file}: {reason}")]
    UnreadableDocument { file: String, reason: String },
}

/// Errors at the evidence-tool boundary (search and fetch).
///
/// These never abort the verification stage; they are converted into
/// `unclear`/`unsupported` verdicts for the affected claim.
#[derive(Debug, Error)]
pub enum ToolError {
    /// URL is not http(s). Rejected before any network call.
    #[error("invalid url: {url}")]
    InvalidUrl { url: String },

    /// Empty or whitespace-only search query.
    #[error("empty query")]
    EmptyQuery,

    /// Request exceeded its timeout.
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Rate limited by the remote service.
    #[error("rate limited")]
    RateLimited,

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),
}

impl ToolError {
    /// Classify a reqwest failure into the tool taxonomy.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ToolError::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = err.status() {
            if status.as_u16() == 429 {
                ToolError::RateLimited
            } else {
                ToolError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                }
            }
        } else {
            ToolError::Network(err.to_string())
        }
    }
}

/// A stage produced output that does not conform to its schema.
///
/// Fatal to the pipeline run: malformed output is never propagated
/// downstream.
#[derive(Debug, Error)]
#[error("{stage} stage produced invalid output: {reason}")]
pub struct SchemaViolation {
    pub stage: Stage,
    pub reason: String,
}

impl SchemaViolation {
    pub fn new(stage: Stage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during a screening run.
#[derive(Debug, Error)]
pub enum ScreeningError {
    /// Document ingestion failed
    #[error("ingest failed: {0}")]
    Ingest(#[from] IngestError),

    /// Stage output failed schema validation
    #[error(transparent)]
    Schema(#[from] SchemaViolation),

    /// The analyst (LLM seam) failed outright
    #[error("analyst error: {0}")]
    Analyst(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON parsing error outside a stage schema check
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ScreeningError {
    /// Wrap an arbitrary analyst failure.
    pub fn analyst(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ScreeningError::Analyst(err.into())
    }
}

/// A pipeline run failed at a specific stage.
#[derive(Debug, Error)]
#[error("pipeline failed in {stage} stage: {source}")]
pub struct PipelineError {
    /// Which stage failed
    pub stage: Stage,
    #[source]
    pub source: ScreeningError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: ScreeningError) -> Self {
        Self { stage, source }
    }
}

/// Result type alias for screening operations.
pub type Result<T> = std::result::Result<T, ScreeningError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_names_failing_stage() {
        let err = PipelineError::new(
            Stage::Verification,
            ScreeningError::Schema(SchemaViolation::new(Stage::Verification, "memo too short")),
        );
        let msg = err.to_string();
        assert!(msg.contains("verification"));
        assert!(msg.contains("memo too short"));
    }

    #[test]
    fn not_found_is_distinct_from_unreadable() {
        let missing = IngestError::NotFound {
            path: "/tmp/x.pdf".into(),
        };
        let unreadable = IngestError::UnreadableDocument {
            file: "x.pdf".into(),
            reason: "bad xref".into(),
        };
        assert!(missing.to_string().contains("not found"));
        assert!(unreadable.to_string().contains("unreadable"));
    }
}
