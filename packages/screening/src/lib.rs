//! Deal Screening Pipeline
//!
//! A sequential three-stage pipeline that turns unstructured fundraising
//! documents into a structured proceed/discard screening decision:
//!
//! 1. **Extraction** - merged document text becomes a strict
//!    [`ExtractionBundle`] (founder profile, signals, metrics, risks,
//!    evidence).
//! 2. **Verification** - a bounded set of high-impact claims is checked
//!    against the web under a hard tool budget, producing graded
//!    [`Finding`]s, a memo, and citations.
//! 3. **Screening** - a deterministic decision policy over the findings
//!    yields proceed/discard, diligence questions, and draft emails.
//!
//! # Design Philosophy
//!
//! The contracts and policies are the library: schema validation, budget
//! check-and-charge, verdict tie-breaks, and the discard rules all live
//! in stage code. The language model sits behind the [`Analyst`] trait
//! and only supplies judgement calls; swap in [`testing::MockAnalyst`]
//! and every run is deterministic.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use screening::{Pipeline, PdfReader, DuckDuckGoSearcher, HttpFetcher};
//!
//! let pipeline = Pipeline::new(analyst, Arc::new(DuckDuckGoSearcher::new()),
//!     Arc::new(HttpFetcher::new()), Arc::new(PdfReader::new()));
//! let report = pipeline.run(&paths).await?;
//! println!("{:?}", report.context.screening.decision);
//! ```
//!
//! # Modules
//!
//! - [`types`] - bundle schemas and policy configuration
//! - [`pipeline`] - the three stages and the sequencing state machine
//! - [`budget`] - the verification tool-call budget
//! - [`ingest`] - document ingestion and founder hints
//! - [`traits`] - the Analyst seam and the evidence tools
//! - [`tools`] - concrete search/fetch implementations
//! - [`testing`] - scripted mocks for deterministic runs

pub mod analysts;
pub mod budget;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod prompts;
pub mod testing;
pub mod tools;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    IngestError, PipelineError, Result, SchemaViolation, ScreeningError, Stage, ToolError,
    ToolResult,
};
pub use types::{
    ClaimCandidate, ClaimCategory, Confidence, Decision, ExtractionBundle, Finding,
    FounderProfile, Metrics, Risk, ScreeningDecision, ScreeningPolicy, Signals, SourceTier,
    Verdict, VerificationBundle, VerificationConfig,
};

// Re-export the pipeline surface
pub use pipeline::{
    run_extraction, run_screening, run_verification, DealContext, MeetingNotesStub, Pipeline,
    PipelineReport, PipelineState, WeightingStub, EXTRACTION_KEY, SCREENING_KEY, VERIFICATION_KEY,
};

// Re-export collaborator seams and implementations
pub use budget::{Charge, ToolBudget, ToolKind};
pub use ingest::{ingest, DocumentReader, DocumentSet, FounderHint, ParsedDocument, PdfReader};
pub use tools::{DuckDuckGoSearcher, HttpFetcher};
pub use traits::{Analyst, EvidenceJudgement, FetchedPage, PageFetcher, SearchHit, WebSearcher};

#[cfg(feature = "openai")]
pub use analysts::OpenAiAnalyst;
