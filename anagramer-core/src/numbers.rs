use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const CHOICE_COUNT: usize = 6;
pub const HIGH_NUMBERS: [u32; 4] = [25, 50, 75, 100];

/// The numbers game: six tiles picked one at a time as "high" or "low",
/// then a three digit target to reach.
#[derive(Debug)]
pub struct NumbersGame {
    target: u32,
    choices: [u32; CHOICE_COUNT],
    rng: StdRng,
}

impl NumbersGame {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            target: 0,
            choices: [0; CHOICE_COUNT],
            rng,
        }
    }

    /// Zero until `randomize` succeeds
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Zero marks a tile not chosen yet
    pub fn choices(&self) -> &[u32; CHOICE_COUNT] {
        &self.choices
    }

    pub fn can_start(&self) -> bool {
        self.choices.iter().all(|&n| n != 0)
    }

    /// Draw a target in `100..1000`. Refused until every tile is chosen.
    pub fn randomize(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.target = self.rng.gen_range(100..1000);
        true
    }

    /// Fill an unset tile: `high` draws from 25/50/75/100, otherwise 1 to 9.
    /// Returns the drawn number, or `None` for a bad index or a set tile.
    pub fn choose_number(&mut self, index: usize, high: bool) -> Option<u32> {
        let slot = self.choices.get_mut(index).filter(|slot| **slot == 0)?;
        let drawn = if high {
            *HIGH_NUMBERS.choose(&mut self.rng)?
        } else {
            self.rng.gen_range(1..10)
        };
        *slot = drawn;
        Some(drawn)
    }

    pub fn reset(&mut self) {
        self.target = 0;
        self.choices = [0; CHOICE_COUNT];
    }
}

impl Default for NumbersGame {
    fn default() -> Self {
        Self::new()
    }
}
