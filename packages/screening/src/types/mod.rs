//! Bundle and policy types for the three pipeline stages.

pub mod bundle;
pub mod claim;
pub mod config;
pub mod decision;
pub mod finding;

pub use bundle::{ExtractionBundle, FounderProfile, Metrics, Risk, Signals};
pub use claim::{ClaimCandidate, ClaimCategory};
pub use config::{ScreeningPolicy, VerificationConfig};
pub use decision::{Decision, ScreeningDecision};
pub use finding::{Confidence, Finding, SourceTier, Verdict, VerificationBundle};
