//! RNG trait abstraction for the step engine
//!
//! Allows the engine to work with both:
//! - any `rand::Rng` (seeded Xoshiro in the app, or anything else)
//! - `ScriptedRng`, which replays fixed values for exact-state tests

/// Random number source for shuffling, tie-breaks and Bernoulli trials
pub trait SimRng {
    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }

    /// Uniform index in `0..bound` (`bound` must be non-zero)
    fn gen_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        ((self.gen_f32() * bound as f32) as usize).min(bound.saturating_sub(1))
    }

    /// Fisher-Yates shuffle in place
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.gen_index(i + 1);
            items.swap(i, j);
        }
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> SimRng for T {
    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_index(&mut self, bound: usize) -> usize {
        rand::Rng::gen_range(self, 0..bound)
    }
}

/// Largest f32 strictly below 1.0
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Replays a fixed sequence of values, cycling when exhausted
///
/// Values are clamped into [0.0, 1.0). An empty script always yields 0.0.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, BELOW_ONE) })
                .collect(),
            cursor: 0,
        }
    }

    /// Always yields `value`
    pub fn constant(value: f32) -> Self {
        Self::new([value])
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl SimRng for ScriptedRng {
    fn gen_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
