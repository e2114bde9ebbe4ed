//! Stub collaborators for the pipeline's downstream consumers.
//!
//! Meeting transcription and weighted scoring are out of scope; these
//! placeholders accept the upstream context and return fixed-shape
//! output so callers can integrate against the final contract.

use serde::{Deserialize, Serialize};

use crate::pipeline::DealContext;

/// Canned meeting notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingNotes {
    pub notes: String,
}

/// Stub meeting agent. Returns canned notes regardless of input.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeetingNotesStub;

impl MeetingNotesStub {
    pub fn new() -> Self {
        Self
    }

    pub fn notes(&self, _context: &DealContext) -> MeetingNotes {
        MeetingNotes {
            notes: "[stubbed] meeting Q&A notes pending transcription integration".to_string(),
        }
    }
}

/// Canned weighted recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedRecommendation {
    pub weighted_reco: String,
    pub score: f64,
}

/// Stub weighting agent. Returns a canned recommendation.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightingStub;

impl WeightingStub {
    pub fn new() -> Self {
        Self
    }

    pub fn recommend(&self, _context: &DealContext) -> WeightedRecommendation {
        WeightedRecommendation {
            weighted_reco: "[stubbed] proceed".to_string(),
            score: 0.78,
        }
    }
}
