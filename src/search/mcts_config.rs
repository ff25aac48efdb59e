//! Search budget and tuning knobs.

use std::time::Duration;

/// Maximum plies a single random rollout may play before it is scored a draw.
pub const DEFAULT_ROLLOUT_PLY_CAP: usize = 150;

#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Wall-clock budget for one `search` call.
    pub time_limit: Duration,
    /// Stop early after this many iterations, if set.
    pub max_iterations: Option<usize>,
    pub rollout_ply_cap: usize,
    /// UCT exploration weight.
    pub exploration: f64,
    /// Seed for the search RNG; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(1),
            max_iterations: None,
            rollout_ply_cap: DEFAULT_ROLLOUT_PLY_CAP,
            exploration: std::f64::consts::SQRT_2,
            seed: None,
        }
    }
}

impl MctsConfig {
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit,
            ..Self::default()
        }
    }

    /// A fixed-iteration, seeded configuration; the time limit is effectively unbounded.
    pub fn deterministic(iterations: usize, seed: u64) -> Self {
        Self {
            time_limit: Duration::from_secs(3600),
            max_iterations: Some(iterations),
            seed: Some(seed),
            ..Self::default()
        }
    }
}
