//! Tool-call budget for the verification stage.
//!
//! The budget is a counted resource pool owned by one verification run:
//! a total cap across the stage, a per-claim cap, and an exact-query
//! dedup set. Check-and-charge is atomic relative to claim processing, so
//! a concurrent implementation cannot race two claims past the cap.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// What a charge attempt was for, recorded for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Search,
    Fetch,
}

/// Outcome of a charge attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charge {
    /// The call may proceed; counters were incremented.
    Granted,
    /// The stage-wide cap is exhausted.
    DeniedTotal,
    /// This claim's cap is exhausted.
    DeniedClaim,
}

impl Charge {
    pub fn is_granted(&self) -> bool {
        matches!(self, Charge::Granted)
    }
}

#[derive(Debug, Default)]
struct BudgetState {
    total_used: u32,
    per_claim: HashMap<usize, u32>,
    issued_queries: HashSet<String>,
}

/// Budget counters for a single verification run.
///
/// Owned exclusively by the stage instance for the duration of one run;
/// never shared across runs or stages.
#[derive(Debug)]
pub struct ToolBudget {
    max_total: u32,
    max_per_claim: u32,
    state: Mutex<BudgetState>,
}

impl ToolBudget {
    pub fn new(max_total: u32, max_per_claim: u32) -> Self {
        Self {
            max_total,
            max_per_claim,
            state: Mutex::new(BudgetState::default()),
        }
    }

    /// Atomically check both caps and charge one call for `claim_idx`.
    ///
    /// A denied charge increments nothing.
    pub fn try_charge(&self, claim_idx: usize, kind: ToolKind) -> Charge {
        let mut state = self.state.lock().expect("budget lock poisoned");
        if state.total_used >= self.max_total {
            tracing::debug!(claim = claim_idx, ?kind, "budget denied: total cap reached");
            return Charge::DeniedTotal;
        }
        let claim_used = state.per_claim.get(&claim_idx).copied().unwrap_or(0);
        if claim_used >= self.max_per_claim {
            tracing::debug!(claim = claim_idx, ?kind, "budget denied: per-claim cap reached");
            return Charge::DeniedClaim;
        }
        state.total_used += 1;
        *state.per_claim.entry(claim_idx).or_insert(0) += 1;
        Charge::Granted
    }

    /// Register a search query; returns false when the exact query was
    /// already issued this run.
    pub fn register_query(&self, query: &str) -> bool {
        let mut state = self.state.lock().expect("budget lock poisoned");
        state.issued_queries.insert(query.to_string())
    }

    /// Total calls charged so far.
    pub fn total_used(&self) -> u32 {
        self.state.lock().expect("budget lock poisoned").total_used
    }

    /// Calls charged to one claim.
    pub fn claim_used(&self, claim_idx: usize) -> u32 {
        self.state
            .lock()
            .expect("budget lock poisoned")
            .per_claim
            .get(&claim_idx)
            .copied()
            .unwrap_or(0)
    }
}
