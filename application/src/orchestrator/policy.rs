//! Call policy — per-operation orchestration parameters.

use explainer_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters controlling the fallback call sequence.
///
/// `candidates` is ordered and tried first to last. `retries` is the
/// per-model retry budget on top of the first attempt, so each candidate
/// is attempted at most `retries + 1` times. `backoff_step` scales the
/// linear delay between attempts on the same model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallPolicy {
    pub candidates: Vec<Model>,
    pub retries: u32,
    pub timeout: Duration,
    pub backoff_step: Duration,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            candidates: Model::default_explain_candidates(),
            retries: 2,
            timeout: Duration::from_secs(30),
            backoff_step: Duration::from_millis(500),
        }
    }
}

impl CallPolicy {
    // ==================== Builder Methods ====================

    pub fn with_candidates(mut self, candidates: Vec<Model>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }
}
