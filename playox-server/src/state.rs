//! Server state management
//!
//! The game registry shared by all request handlers.

use playox_core::{GameRegistry, MoveStrategy, RandomStrategy};

/// Server-wide shared state
pub struct ServerState {
    pub registry: GameRegistry,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            registry: GameRegistry::new(),
        }
    }

    /// Random opponent, seeded when `seed` is given
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self::with_strategy(RandomStrategy::from_seed_option(seed))
    }

    pub fn with_strategy(strategy: impl MoveStrategy + 'static) -> Self {
        Self {
            registry: GameRegistry::with_strategy(strategy),
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
