//! Game state and transition rules

use crate::board::{Board, Coord, Mover, CELL_COUNT};
use crate::error::GameError;
use crate::registry::GameId;
use crate::strategy::MoveStrategy;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game status, always derived from the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    HumanWon,
    ComputerWon,
    Draw,
}

impl GameStatus {
    /// Status implied by a board position
    pub fn of_board(board: &Board) -> Self {
        match board.winner() {
            Some(Mover::Human) => GameStatus::HumanWon,
            Some(Mover::Computer) => GameStatus::ComputerWon,
            None if board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// A recorded placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub mover: Mover,
    pub timestamp: NaiveDateTime,
}

impl Move {
    pub fn coord(&self) -> Coord {
        // Only in-range positions are ever recorded
        Coord::of_cell(self.position)
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// One game of tic-tac-toe (clone to mutate)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    created_at: NaiveDateTime,
    board: Board,
    status: GameStatus,
    /// Append-only, alternating human/computer starting with the human
    moves: Vec<Move>,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board, human to move
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            created_at: now(),
            board: Board::new(),
            status: GameStatus::InProgress,
            moves: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn winner(&self) -> Option<Mover> {
        match self.status {
            GameStatus::HumanWon => Some(Mover::Human),
            GameStatus::ComputerWon => Some(Mover::Computer),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whose turn it is by history parity (even = human)
    pub fn turn(&self) -> Mover {
        if self.moves.len() % 2 == 0 {
            Mover::Human
        } else {
            Mover::Computer
        }
    }

    /// Mover expected next, `None` once the game is over
    pub fn next_mover(&self) -> Option<Mover> {
        if self.is_finished() {
            None
        } else {
            Some(self.turn())
        }
    }

    pub fn empty_positions(&self) -> Vec<usize> {
        self.board.empty_positions()
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Apply a move, returning the new state
    pub fn apply_move(&self, position: usize, mover: Mover) -> Result<Self, GameError> {
        let mut next = self.clone();
        next.apply_move_internal(position, mover)?;
        Ok(next)
    }

    fn apply_move_internal(&mut self, position: usize, mover: Mover) -> Result<(), GameError> {
        if position >= CELL_COUNT {
            return Err(GameError::InvalidPosition(position));
        }
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }
        if mover != self.turn() {
            return Err(GameError::WrongTurn(mover));
        }
        if let Some(occupant) = self.board.get(position).and_then(|cell| cell.mover()) {
            return Err(GameError::PositionOccupied { position, occupant });
        }

        self.board.place(position, mover);
        self.moves.push(Move {
            position,
            mover,
            timestamp: now(),
        });
        self.status = GameStatus::of_board(&self.board);

        tracing::debug!(game = %self.id, position, %mover, status = ?self.status, "move applied");
        Ok(())
    }

    /// Ask `strategy` for the computer's reply on this board
    pub fn select_computer_move(&self, strategy: &mut dyn MoveStrategy) -> Result<usize, GameError> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }
        if self.turn() != Mover::Computer {
            return Err(GameError::WrongTurn(Mover::Computer));
        }

        let legal = self.empty_positions();
        if legal.is_empty() {
            tracing::error!(game = %self.id, "in-progress game has a full board");
            return Err(GameError::NoLegalMoves);
        }

        let name = strategy.name();
        strategy.choose(&self.board, &legal).ok_or_else(|| {
            tracing::error!(game = %self.id, strategy = name, "strategy returned no move");
            GameError::NoLegalMoves
        })
    }

    /// Human move, then the computer's reply unless the human move ended the game.
    ///
    /// A rejected human move is returned as-is and the computer never moves.
    pub fn apply_human_turn(
        &self,
        position: usize,
        strategy: &mut dyn MoveStrategy,
    ) -> Result<Self, GameError> {
        let after_human = self.apply_move(position, Mover::Human)?;
        if after_human.is_finished() {
            return Ok(after_human);
        }

        let reply = after_human.select_computer_move(strategy)?;
        after_human.apply_move(reply, Mover::Computer)
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

// ============================================================================
// TESTS
// ============================================================================
