//! The screening pipeline - a pure sequencing state machine over the
//! three stages.
//!
//! A1 (extraction) → A2 (verification) → A3 (screening), strictly in
//! order, each stage receiving the previous stage's full output. No
//! stage is retried by the orchestrator and no stage runs twice within
//! one invocation; retry policy, where it exists, lives inside a stage's
//! own tool handling.

pub mod extract;
pub mod screen;
pub mod stubs;
pub mod verify;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Stage};
use crate::ingest::{ingest, DocumentReader};
use crate::traits::{Analyst, PageFetcher, WebSearcher};
use crate::types::{
    ExtractionBundle, ScreeningDecision, ScreeningPolicy, VerificationBundle, VerificationConfig,
};

pub use extract::run_extraction;
pub use screen::run_screening;
pub use stubs::{MeetingNotes, MeetingNotesStub, WeightedRecommendation, WeightingStub};
pub use verify::run_verification;

/// Namespaced result keys, one per stage.
pub const EXTRACTION_KEY: &str = "deal.extraction";
pub const VERIFICATION_KEY: &str = "deal.verification";
pub const SCREENING_KEY: &str = "deal.screening";

/// Orchestrator states. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Ready,
    RunningExtraction,
    RunningVerification,
    RunningScreening,
    Done,
    Failed,
}

impl PipelineState {
    /// Transition taken when the current stage produced valid output.
    pub fn advance(self) -> PipelineState {
        match self {
            PipelineState::Ready => PipelineState::RunningExtraction,
            PipelineState::RunningExtraction => PipelineState::RunningVerification,
            PipelineState::RunningVerification => PipelineState::RunningScreening,
            PipelineState::RunningScreening => PipelineState::Done,
            terminal => terminal,
        }
    }

    /// Transition taken when the current stage failed.
    pub fn fail(self) -> PipelineState {
        match self {
            PipelineState::Done => PipelineState::Done,
            _ => PipelineState::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// The stage a running state is executing.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineState::RunningExtraction => Some(Stage::Extraction),
            PipelineState::RunningVerification => Some(Stage::Verification),
            PipelineState::RunningScreening => Some(Stage::Screening),
            _ => None,
        }
    }
}

/// The aggregate result of one run, owned by the orchestrator.
///
/// Bundles are immutable once produced; no stage owns another stage's
/// output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealContext {
    pub extraction: ExtractionBundle,
    pub verification: VerificationBundle,
    pub screening: ScreeningDecision,
}

impl DealContext {
    /// The run results keyed by stage namespace.
    pub fn keyed_results(&self) -> BTreeMap<String, serde_json::Value> {
        let mut results = BTreeMap::new();
        if let Ok(v) = serde_json::to_value(&self.extraction) {
            results.insert(EXTRACTION_KEY.to_string(), v);
        }
        if let Ok(v) = serde_json::to_value(&self.verification) {
            results.insert(VERIFICATION_KEY.to_string(), v);
        }
        if let Ok(v) = serde_json::to_value(&self.screening) {
            results.insert(SCREENING_KEY.to_string(), v);
        }
        results
    }
}

/// A completed run: terminal state plus the full context.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub state: PipelineState,
    pub context: DealContext,
}

/// The sequential screening pipeline.
///
/// Collaborators are injected behind traits; multiple independent runs
/// may execute concurrently, each with its own budget and bundles.
pub struct Pipeline {
    analyst: Arc<dyn Analyst>,
    searcher: Arc<dyn WebSearcher>,
    fetcher: Arc<dyn PageFetcher>,
    reader: Arc<dyn DocumentReader>,
    verification_config: VerificationConfig,
    policy: ScreeningPolicy,
}

impl Pipeline {
    pub fn new(
        analyst: Arc<dyn Analyst>,
        searcher: Arc<dyn WebSearcher>,
        fetcher: Arc<dyn PageFetcher>,
        reader: Arc<dyn DocumentReader>,
    ) -> Self {
        Self {
            analyst,
            searcher,
            fetcher,
            reader,
            verification_config: VerificationConfig::default(),
            policy: ScreeningPolicy::default(),
        }
    }

    /// Override the verification caps.
    pub fn with_verification_config(mut self, config: VerificationConfig) -> Self {
        self.verification_config = config;
        self
    }

    /// Override the screening policy.
    pub fn with_policy(mut self, policy: ScreeningPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the full pipeline over a set of document paths.
    ///
    /// Returns the terminal report, or the failing stage and its error.
    pub async fn run(&self, paths: &[String]) -> Result<PipelineReport, PipelineError> {
        let mut state = PipelineState::Ready;

        state = state.advance();
        tracing::info!(?state, docs = paths.len(), "pipeline started");
        let documents = match ingest(paths, self.reader.as_ref()).await {
            Ok(docs) => docs,
            Err(err) => return Err(self.fail(&mut state, err.into())),
        };
        let extraction = match run_extraction(self.analyst.as_ref(), &documents).await {
            Ok(bundle) => bundle,
            Err(err) => return Err(self.fail(&mut state, err)),
        };

        state = state.advance();
        tracing::info!(?state, "extraction accepted");
        let verification = match run_verification(
            self.analyst.as_ref(),
            self.searcher.as_ref(),
            self.fetcher.as_ref(),
            &extraction,
            &self.verification_config,
        )
        .await
        {
            Ok(bundle) => bundle,
            Err(err) => return Err(self.fail(&mut state, err)),
        };

        state = state.advance();
        tracing::info!(?state, "verification accepted");
        let screening = match run_screening(&extraction, &verification, &self.policy) {
            Ok(decision) => decision,
            Err(err) => return Err(self.fail(&mut state, err)),
        };

        state = state.advance();
        tracing::info!(?state, "pipeline done");
        Ok(PipelineReport {
            state,
            context: DealContext {
                extraction,
                verification,
                screening,
            },
        })
    }

    fn fail(&self, state: &mut PipelineState, err: crate::error::ScreeningError) -> PipelineError {
        let stage = state.stage().unwrap_or(Stage::Extraction);
        *state = state.fail();
        tracing::error!(?state, %stage, error = %err, "pipeline failed");
        PipelineError::new(stage, err)
    }
}
