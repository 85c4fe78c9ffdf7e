//! In-memory game registry
//!
//! Holds every game for the lifetime of the process and assigns identities.
//! `submit_move` is a plain read, compute, write-back sequence: two requests
//! racing on the same game may both apply to the same snapshot and the later
//! write wins. There is no per-game locking.

use crate::error::RegistryError;
use crate::game::Game;
use crate::strategy::{MoveStrategy, RandomStrategy};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError, RwLock};
use uuid::Uuid;

/// Opaque, server-generated game identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Games plus their creation order
#[derive(Default)]
struct Store {
    order: Vec<GameId>,
    games: FxHashMap<GameId, Game>,
}

/// Process-wide game store shared by every request
pub struct GameRegistry {
    store: RwLock<Store>,
    strategy: Mutex<Box<dyn MoveStrategy>>,
}

impl GameRegistry {
    /// Registry with an unseeded random opponent
    pub fn new() -> Self {
        Self::with_strategy(RandomStrategy::new())
    }

    pub fn with_strategy(strategy: impl MoveStrategy + 'static) -> Self {
        Self {
            store: RwLock::new(Store::default()),
            strategy: Mutex::new(Box::new(strategy)),
        }
    }

    /// Register a new empty game
    pub fn create_game(&self) -> Game {
        let game = Game::new(GameId::generate());
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store.order.push(game.id());
        store.games.insert(game.id(), game.clone());

        tracing::info!(game = %game.id(), total = store.order.len(), "game created");
        game
    }

    pub fn get_game(&self, id: &GameId) -> Result<Game, RegistryError> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store
            .games
            .get(id)
            .cloned()
            .ok_or(RegistryError::NotFound(*id))
    }

    /// All games, oldest first
    pub fn list_games(&self) -> Vec<Game> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store
            .order
            .iter()
            .filter_map(|id| store.games.get(id).cloned())
            .collect()
    }

    /// Apply the human's move and the computer's reply, then store the result
    pub fn submit_move(&self, id: &GameId, position: usize) -> Result<Game, RegistryError> {
        let current = self.get_game(id)?;

        let next = {
            let mut strategy = self.strategy.lock().unwrap_or_else(PoisonError::into_inner);
            current.apply_human_turn(position, &mut **strategy)
        };

        let next = match next {
            Ok(game) => game,
            Err(err) => {
                if err.is_invariant_violation() {
                    tracing::error!(game = %id, error = %err, "engine invariant violated");
                } else {
                    tracing::warn!(game = %id, position, error = %err, "move rejected");
                }
                return Err(err.into());
            }
        };

        if next.is_finished() {
            tracing::info!(game = %id, status = ?next.status(), moves = next.moves().len(), "game finished");
        }

        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store.games.insert(*id, next.clone());
        Ok(next)
    }

    pub fn len(&self) -> usize {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
