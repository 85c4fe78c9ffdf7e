//! Computer opponent move selection

use crate::board::Board;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Picks the computer's reply.
///
/// Implementations only choose; turn order and legality are enforced by
/// [`Game::apply_move`](crate::game::Game::apply_move). Returning a position
/// outside `legal` makes the move fail like any other illegal placement.
pub trait MoveStrategy: Send {
    fn name(&self) -> &'static str;

    /// Choose one of `legal` (never empty) for the current `board`
    fn choose(&mut self, board: &Board, legal: &[usize]) -> Option<usize>;
}

/// Uniform-random choice among the open positions
pub struct RandomStrategy {
    rng: ChaCha8Rng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveStrategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(&mut self, _board: &Board, legal: &[usize]) -> Option<usize> {
        legal.choose(&mut self.rng).copied()
    }
}
