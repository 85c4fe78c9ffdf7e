//! Game API endpoints
//!
//! Create, list and fetch games, and submit moves. Responses use a view
//! of the game with the board as rows of `"X"`, `"O"` or `""`; the flat
//! position array stays internal.

use crate::error::ApiError;
use crate::state::ServerState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDateTime;
use playox_core::{Coord, Game, GameId, GameStatus, Move, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// VIEWS
// ============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct MoveView {
    pub x: u8,
    pub y: u8,
    pub player: &'static str,
    pub timestamp: NaiveDateTime,
}

impl From<&Move> for MoveView {
    fn from(mv: &Move) -> Self {
        let Coord { x, y } = mv.coord();
        Self {
            x,
            y,
            player: mv.mover.symbol(),
            timestamp: mv.timestamp,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GameView {
    pub id: GameId,
    pub created_at: NaiveDateTime,
    pub status: GameStatus,
    pub winner: Option<&'static str>,
    pub finished: bool,
    pub board: [[&'static str; BOARD_SIZE]; BOARD_SIZE],
    pub moves: Vec<MoveView>,
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id(),
            created_at: game.created_at(),
            status: game.status(),
            winner: game.winner().map(|mover| mover.symbol()),
            finished: game.is_finished(),
            board: game.board().rows().map(|row| row.map(|cell| cell.symbol())),
            moves: game.moves().iter().map(MoveView::from).collect(),
        }
    }
}

/// Move request: `x` is the column, `y` the row
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MoveRequest {
    pub x: i64,
    pub y: i64,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// List all games in creation order
pub async fn list_games(State(state): State<Arc<ServerState>>) -> Json<Vec<GameView>> {
    let games = state.registry.list_games();
    Json(games.iter().map(GameView::from).collect())
}

/// Create a new game
pub async fn create_game(State(state): State<Arc<ServerState>>) -> (StatusCode, Json<GameView>) {
    let game = state.registry.create_game();
    (StatusCode::CREATED, Json(GameView::from(&game)))
}

/// Get game state by id
pub async fn get_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game = state.registry.get_game(&parse_id(&id)?)?;
    Ok(Json(GameView::from(&game)))
}

/// List a game's moves chronologically
pub async fn list_moves(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MoveView>>, ApiError> {
    let game = state.registry.get_game(&parse_id(&id)?)?;
    Ok(Json(game.moves().iter().map(MoveView::from).collect()))
}

/// Play the human's move; the computer replies unless the game just ended
pub async fn submit_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameView>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = payload?;
    let coord = Coord::new(req.x, req.y).ok_or(ApiError::InvalidCoordinates { x: req.x, y: req.y })?;

    let game = state.registry.submit_move(&id, coord.index())?;
    Ok(Json(GameView::from(&game)))
}

/// Identifiers that are not UUIDs cannot name a game
fn parse_id(raw: &str) -> Result<GameId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound(raw.to_string()))
}
