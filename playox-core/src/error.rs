//! Engine and registry failure kinds

use crate::board::Mover;
use crate::registry::GameId;

/// A rejected engine transition. The game it was attempted on is untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("position {0} is outside the board (expected 0-8)")]
    InvalidPosition(usize),

    #[error("position {position} has already been played by {occupant}")]
    PositionOccupied { position: usize, occupant: Mover },

    #[error("game is finished")]
    GameFinished,

    #[error("it is not the {0}'s turn")]
    WrongTurn(Mover),

    /// Status and turn bookkeeping disagree with the board
    #[error("no legal moves remain on an unfinished board")]
    NoLegalMoves,
}

impl GameError {
    /// True for failures that point at a bug rather than bad client input
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, GameError::NoLegalMoves)
    }
}

/// Registry lookups plus every engine failure, passed through unchanged
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("game {0} not found")]
    NotFound(GameId),

    #[error(transparent)]
    Game(#[from] GameError),
}
