use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::planner::constants::{DEFAULT_MAX_CANDIDATES, DEFAULT_SOLVE_TIME_LIMIT};

/// Runtime knobs for a plan build.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Largest pool handed to the optimizer per slot.
    pub max_candidates: usize,
    /// Wall-clock budget for each slot solve.
    pub solve_time_limit: Duration,
    /// Seed for pool sampling. `None` draws fresh entropy per build.
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            solve_time_limit: DEFAULT_SOLVE_TIME_LIMIT,
            seed: None,
        }
    }
}

impl PlannerConfig {
    /// Random source for build number `stream`. Seeded configs give each
    /// stream its own reproducible sequence.
    pub fn rng_for(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_entropy(),
        }
    }
}
