use bracket_random::prelude::RandomNumberGenerator;

/// Source of every random draw the game makes.
///
/// Battle and encounter code only ever sees `&mut dyn Dice`, so tests can
/// swap in a fixed sequence.
pub trait Dice {
    /// Uniform integer in `min..max`. Returns `min` when the range is empty.
    fn range(&mut self, min: i32, max: i32) -> i32;

    /// Uniform float in `[0, 1)`.
    fn chance(&mut self) -> f64;
}

impl Dice for RandomNumberGenerator {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        RandomNumberGenerator::range(self, min, max)
    }

    fn chance(&mut self) -> f64 {
        self.rand::<f64>()
    }
}

pub fn seeded_dice(seed: Option<u64>) -> RandomNumberGenerator {
    match seed {
        Some(seed) => RandomNumberGenerator::seeded(seed),
        None => RandomNumberGenerator::new(),
    }
}

/// Replays fixed draws. Exhausted queues fall back to `min` / `0.0`.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedDice {
    ranges: std::collections::VecDeque<i32>,
    chances: std::collections::VecDeque<f64>,
    pub range_draws: usize,
    pub chance_draws: usize,
}

#[cfg(test)]
impl ScriptedDice {
    pub fn new(ranges: &[i32], chances: &[f64]) -> Self {
        Self {
            ranges: ranges.iter().copied().collect(),
            chances: chances.iter().copied().collect(),
            range_draws: 0,
            chance_draws: 0,
        }
    }

    pub fn always(chance: f64) -> Self {
        let mut dice = Self::default();
        dice.chances = std::iter::repeat(chance).take(10_000).collect();
        dice
    }
}

#[cfg(test)]
impl Dice for ScriptedDice {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        self.range_draws += 1;
        let value = self.ranges.pop_front().unwrap_or(min);
        value.clamp(min, (max - 1).max(min))
    }

    fn chance(&mut self) -> f64 {
        self.chance_draws += 1;
        self.chances.pop_front().unwrap_or(0.0)
    }
}
