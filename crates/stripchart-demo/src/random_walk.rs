// File: crates/stripchart-demo/src/random_walk.rs
// Summary: Bounded random-walk signal generator used as a synthetic feed.
// Notes:
// - The walk picks a trend for a random number of steps, biased back towards the middle
//   of [min, max], and adds uniform noise on top. Output is clamped to [min, max].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkParams {
    pub min: f32,
    pub max: f32,
    /// Noise amplitude as a fraction of the span.
    pub noise: f32,
    pub volatility: f32,
    /// Weight of a new trend against the previous one, in (0, 1].
    pub jerkiness: f32,
    /// Upper bound on how many steps a trend lasts.
    pub timespan: f32,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self { min: -1.0, max: 1.0, noise: 0.05, volatility: 2.0, jerkiness: 0.6, timespan: 20.0 }
    }
}

impl WalkParams {
    pub fn with_bounds(min: f32, max: f32) -> Self {
        Self { min, max, ..Self::default() }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.min < self.max, "walk min {} must be below max {}", self.min, self.max);
        anyhow::ensure!(
            self.jerkiness > 0.0 && self.jerkiness <= 1.0,
            "walk jerkiness {} outside (0, 1]",
            self.jerkiness
        );
        anyhow::ensure!(self.timespan >= 1.0, "walk timespan {} below 1", self.timespan);
        Ok(())
    }
}

pub struct RandomWalk {
    params: WalkParams,
    rng: StdRng,
    value: f32,
    steps_left: u32,
    trend: f32,
    bias: f32,
}

impl RandomWalk {
    pub fn new(params: WalkParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let value = rng.random_range(params.min..params.max);
        Self { params, rng, value, steps_left: 0, trend: 0.0, bias: 0.0 }
    }

    pub fn params(&self) -> &WalkParams {
        &self.params
    }

    pub fn next_value(&mut self) -> f32 {
        let p = self.params;
        let span = p.max - p.min;
        let mean = (p.max + p.min) * 0.5;

        self.steps_left = self.steps_left.saturating_sub(1);
        if self.steps_left == 0 {
            self.steps_left = 2 + (self.rng.random::<f32>() * p.timespan) as u32;
            let push = span * (p.volatility / p.timespan) * (self.rng.random_range(-1.0f32..1.0) + self.bias);
            self.trend = p.jerkiness * push + (1.0 - p.jerkiness) * self.trend;
        }

        self.value += (self.rng.random::<f32>() - 0.25) * self.trend;
        self.bias = ((mean - self.value) / span) * 0.6;

        let noisy = self.value + span * p.noise * (self.rng.random::<f32>() - 0.5);
        noisy.clamp(p.min, p.max)
    }
}

impl Iterator for RandomWalk {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        Some(self.next_value())
    }
}
