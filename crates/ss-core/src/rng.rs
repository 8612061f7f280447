//! Per-agent random streams for stochastic dwell times.
//!
//! Every agent owns a `SmallRng` seeded from the run seed and its id:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The dispatch loop hands the target agent's stream to each listener hook,
//! so the draws one agent makes never depend on how many other agents were
//! dispatched in between.  Replaying a seed replays every duration.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// One agent's deterministic random stream.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A duration in ticks drawn uniformly from `mean ± spread`, never
    /// negative.
    pub fn jitter(&mut self, mean: u64, spread: u64) -> u64 {
        let lo = mean.saturating_sub(spread);
        let hi = mean.saturating_add(spread);
        self.0.gen_range(lo..=hi)
    }
}
