//! PlayOX Core - Tic-tac-toe engine and game registry
//!
//! This crate provides the game logic behind the PlayOX service:
//! - Board geometry (3x3, row-major positions 0-8, winning triples)
//! - Game state, move validation and win/draw detection
//! - Pluggable computer opponent (uniform-random by default)
//! - In-memory registry assigning identities and storing games

pub mod board;
pub mod error;
pub mod game;
pub mod registry;
pub mod strategy;

// Re-exports for convenient access
pub use board::{Board, Cell, Coord, Mover, BOARD_SIZE, CELL_COUNT, WINNING_TRIPLES};
pub use error::{GameError, RegistryError};
pub use game::{Game, GameStatus, Move};
pub use registry::{GameId, GameRegistry};
pub use strategy::{MoveStrategy, RandomStrategy};
