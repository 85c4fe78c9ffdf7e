//! Integration tests for playox-server API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use playox_core::{Board, MoveStrategy};
use playox_server::{create_router, ServerConfig, ServerState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Replies with the highest open position so games are predictable
struct LastOpen;

impl MoveStrategy for LastOpen {
    fn name(&self) -> &'static str {
        "last-open"
    }

    fn choose(&mut self, _board: &Board, legal: &[usize]) -> Option<usize> {
        legal.last().copied()
    }
}

fn test_app() -> axum::Router {
    let config = ServerConfig::default();
    let state = Arc::new(ServerState::new());
    create_router(&config, state)
}

fn scripted_app() -> axum::Router {
    let config = ServerConfig::default();
    let state = Arc::new(ServerState::with_strategy(LastOpen));
    create_router(&config, state)
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: &axum::Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method("POST").uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

async fn new_game(app: &axum::Router) -> String {
    let (status, json) = post(app, "/api/games", None).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

async fn play(app: &axum::Router, id: &str, x: i64, y: i64) -> (StatusCode, Value) {
    post(
        app,
        &format!("/api/games/{}/moves", id),
        Some(json!({ "x": x, "y": y })),
    )
    .await
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = test_app();
    let (status, json) = get(&app, "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["games"], 0);
}

#[tokio::test]
async fn test_create_then_fetch() {
    let app = test_app();
    let (status, created) = post(&app, "/api/games", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = get(&app, &format!("/api/games/{}", id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["status"], "in_progress");
    assert_eq!(fetched["finished"], false);
    assert_eq!(fetched["moves"], json!([]));
    assert_eq!(fetched["board"], json!([["", "", ""], ["", "", ""], ["", "", ""]]));
    assert!(fetched.get("positions").is_none());
}

#[tokio::test]
async fn test_get_game_not_found() {
    let app = test_app();

    let (status, json) = get(&app, "/api/games/FOOO").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Game not found");

    let (status, _) = get(&app, "/api/games/6f1c2f9e-3c55-4c7a-9f55-1b1d2a3c4d5e").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_games_in_order() {
    let app = test_app();
    let first = new_game(&app).await;
    let second = new_game(&app).await;

    let (status, json) = get(&app, "/api/games").await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|game| game["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);
}

#[tokio::test]
async fn test_first_move_gets_reply() {
    let app = test_app();
    let id = new_game(&app).await;

    let (status, json) = play(&app, &id, 0, 0).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["board"][0][0], "X");

    let moves = json["moves"].as_array().unwrap();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0]["player"], "X");
    assert_eq!(moves[1]["player"], "O");
    assert!(!(moves[1]["x"] == 0 && moves[1]["y"] == 0));

    let o_count = json["board"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .filter(|cell| *cell == "O")
        .count();
    assert_eq!(o_count, 1);
}

#[tokio::test]
async fn test_human_win_then_finished() {
    let app = scripted_app();
    let id = new_game(&app).await;

    // Computer replies at (2, 2) then (1, 2)
    play(&app, &id, 0, 0).await;
    play(&app, &id, 1, 0).await;
    let (status, won) = play(&app, &id, 2, 0).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(won["status"], "human_won");
    assert_eq!(won["winner"], "X");
    assert_eq!(won["finished"], true);
    assert_eq!(won["board"][0], json!(["X", "X", "X"]));
    assert_eq!(won["moves"].as_array().unwrap().len(), 5);

    let (status, json) = play(&app, &id, 0, 1).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "game is finished");

    let (_, after) = get(&app, &format!("/api/games/{}", id)).await;
    assert_eq!(after, won);
}

#[tokio::test]
async fn test_occupied_position() {
    let app = scripted_app();
    let id = new_game(&app).await;

    play(&app, &id, 0, 0).await;
    let (status, json) = play(&app, &id, 2, 2).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("has already been played"));
}

#[tokio::test]
async fn test_out_of_range_coordinates() {
    let app = test_app();
    let id = new_game(&app).await;

    for (x, y) in [(3, 0), (0, 3), (-1, 0)] {
        let (status, json) = play(&app, &id, x, y).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "({}, {})", x, y);
        assert_eq!(json["status"], 400);
        assert_eq!(
            json["error"],
            format!("coordinates ({}, {}) are outside the board (expected 0-2)", x, y)
        );
    }

    let (_, game) = get(&app, &format!("/api/games/{}", id)).await;
    assert_eq!(game["moves"], json!([]));
}

#[tokio::test]
async fn test_malformed_move_body() {
    let app = test_app();
    let id = new_game(&app).await;
    let uri = format!("/api/games/{}/moves", id);

    let bodies = [
        (Some("application/json"), r#"{"x":"a","y":0}"#),
        (Some("application/json"), r#"{"x":0}"#),
        (Some("application/json"), "not json"),
        (None, r#"{"x":0,"y":0}"#),
    ];

    for (content_type, body) in bodies {
        let mut builder = Request::builder().method("POST").uri(&uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();

        let (status, json) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{:?} {}", content_type, body);
        assert_eq!(json["status"], 400);
        assert!(
            json["error"].as_str().unwrap().starts_with("invalid move body: "),
            "{}",
            json["error"]
        );
    }

    let (_, game) = get(&app, &format!("/api/games/{}", id)).await;
    assert_eq!(game["moves"], json!([]));
}

#[tokio::test]
async fn test_move_on_unknown_game() {
    let app = test_app();
    let (status, json) = play(&app, "6f1c2f9e-3c55-4c7a-9f55-1b1d2a3c4d5e", 0, 0).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Game not found");
}

#[tokio::test]
async fn test_list_moves_ordered() {
    let app = scripted_app();
    let id = new_game(&app).await;

    play(&app, &id, 0, 0).await;
    play(&app, &id, 1, 0).await;

    let (status, moves) = get(&app, &format!("/api/games/{}/moves", id)).await;
    assert_eq!(status, StatusCode::OK);

    let moves = moves.as_array().unwrap();
    assert_eq!(moves.len(), 4);
    assert_eq!((&moves[0]["x"], &moves[0]["y"], &moves[0]["player"]), (&json!(0), &json!(0), &json!("X")));
    assert_eq!((&moves[1]["x"], &moves[1]["y"], &moves[1]["player"]), (&json!(2), &json!(2), &json!("O")));
    assert_eq!((&moves[2]["x"], &moves[2]["y"], &moves[2]["player"]), (&json!(1), &json!(0), &json!("X")));
    assert_eq!((&moves[3]["x"], &moves[3]["y"], &moves[3]["player"]), (&json!(1), &json!(2), &json!("O")));
}

#[tokio::test]
async fn test_list_moves_not_found() {
    let app = test_app();
    let (status, _) = get(&app, "/api/games/FOOO/moves").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_move_count_invariant() {
    let app = test_app();
    let id = new_game(&app).await;
    let mut human_turns = 0;

    loop {
        let (_, game) = get(&app, &format!("/api/games/{}", id)).await;
        if game["finished"] == true {
            let moves = game["moves"].as_array().unwrap();
            let human_last = moves.last().unwrap()["player"] == "X";
            let expected = if human_last { 2 * human_turns - 1 } else { 2 * human_turns };
            assert_eq!(moves.len(), expected);
            break;
        }

        // First open cell in reading order
        let (x, y) = (0..9)
            .map(|i| (i % 3, i / 3))
            .find(|&(x, y)| game["board"][y][x] == "")
            .unwrap();
        let (status, _) = play(&app, &id, x as i64, y as i64).await;
        assert_eq!(status, StatusCode::OK);
        human_turns += 1;
    }
}
