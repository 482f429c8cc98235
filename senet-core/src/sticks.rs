//! Throwing sticks
//!
//! Four two-sided sticks are thrown; the number of marked faces showing
//! gives the step count, with zero marks counting as five.

use std::collections::VecDeque;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Number of sticks in a throw
pub const STICK_COUNT: u8 = 4;

/// Result of one throw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Throw {
    pub steps: u8,
    pub extra_turn: bool,
}

impl Throw {
    /// Map a count of marked sticks (0..=4) to a throw
    pub fn from_marks(marks: u8) -> Self {
        let steps = match marks {
            0 => 5,
            n => n.min(STICK_COUNT),
        };
        Self {
            steps,
            extra_turn: matches!(steps, 1 | 4 | 5),
        }
    }
}

/// Source of independent fair binary draws
pub trait StickSource {
    /// Returns true when the stick lands marked side up
    fn draw(&mut self) -> bool;

    fn throw(&mut self) -> Throw {
        let marks = (0..STICK_COUNT).filter(|_| self.draw()).count() as u8;
        Throw::from_marks(marks)
    }
}

/// Stick source backed by any `rand` generator
#[derive(Clone, Debug)]
pub struct RngSticks<R> {
    rng: R,
}

impl<R: RngCore> RngSticks<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> StickSource for RngSticks<R> {
    fn draw(&mut self) -> bool {
        self.rng.gen::<bool>()
    }
}

/// Replays a fixed sequence of draws, then keeps returning `false`
#[derive(Clone, Debug, Default)]
pub struct ScriptedSticks {
    draws: VecDeque<bool>,
}

impl ScriptedSticks {
    pub fn new(draws: impl IntoIterator<Item = bool>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Queue the four draws that produce `steps` (1..=5)
    pub fn from_steps(steps: impl IntoIterator<Item = u8>) -> Self {
        let draws = steps.into_iter().flat_map(|s| {
            let marks = if s >= 5 { 0 } else { s.min(STICK_COUNT) };
            (0..STICK_COUNT).map(move |i| i < marks)
        });
        Self::new(draws)
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl StickSource for ScriptedSticks {
    fn draw(&mut self) -> bool {
        self.draws.pop_front().unwrap_or(false)
    }
}

impl Board {
    /// Throw the sticks and record the result on the board
    pub fn throw_sticks<S: StickSource + ?Sized>(&mut self, sticks: &mut S) -> Throw {
        let throw = sticks.throw();
        self.last_throw = Some(throw);
        throw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_marks_to_steps() {
        let expected = [(0, 5, true), (1, 1, true), (2, 2, false), (3, 3, false), (4, 4, true)];
        for (marks, steps, extra) in expected {
            let throw = Throw::from_marks(marks);
            assert_eq!(throw.steps, steps, "marks={}", marks);
            assert_eq!(throw.extra_turn, extra, "marks={}", marks);
        }
    }

    #[test]
    fn test_all_sixteen_patterns() {
        // Every ordered outcome of four sticks, weighted equally
        let mut counts = [0u32; 6];
        for pattern in 0u8..16 {
            let draws = (0..4).map(|bit| pattern & (1 << bit) != 0);
            let mut sticks = ScriptedSticks::new(draws);
            let throw = sticks.throw();
            counts[throw.steps as usize] += 1;
        }
        assert_eq!(&counts[1..], &[4, 6, 4, 1, 1]);
    }

    #[test]
    fn test_rng_distribution() {
        let mut sticks = RngSticks::new(ChaCha8Rng::seed_from_u64(7));
        let trials = 32_000;
        let mut counts = [0u32; 6];
        for _ in 0..trials {
            let throw = sticks.throw();
            assert_eq!(throw.extra_turn, matches!(throw.steps, 1 | 4 | 5));
            counts[throw.steps as usize] += 1;
        }
        let expected = [4.0, 6.0, 4.0, 1.0, 1.0];
        for (i, weight) in expected.iter().enumerate() {
            let observed = counts[i + 1] as f64 / trials as f64;
            let target = weight / 16.0;
            assert!(
                (observed - target).abs() < 0.015,
                "steps {}: observed {:.4}, expected {:.4}",
                i + 1,
                observed,
                target
            );
        }
    }

    #[test]
    fn test_scripted_from_steps() {
        let mut sticks = ScriptedSticks::from_steps([3, 5, 1]);
        assert_eq!(sticks.throw().steps, 3);
        assert_eq!(sticks.throw().steps, 5);
        assert_eq!(sticks.throw().steps, 1);
        assert_eq!(sticks.remaining(), 0);
    }

    #[test]
    fn test_throw_recorded_on_board() {
        let mut board = Board::new();
        let mut sticks = ScriptedSticks::from_steps([4]);
        let throw = board.throw_sticks(&mut sticks);
        assert_eq!(throw, Throw { steps: 4, extra_turn: true });
        assert_eq!(board.last_throw(), Some(throw));
    }
}
