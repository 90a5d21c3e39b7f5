//! Backend API Integration Tests
//!
//! Drives the router in-process with the `Router::oneshot` pattern.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use backend::{router, AppState, TurnWaitConfig};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

fn test_state() -> AppState {
    AppState::new(TurnWaitConfig {
        poll_interval: Duration::from_millis(5),
        timeout: Duration::from_millis(100),
    })
}

fn test_router() -> Router {
    router(test_state())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    secret: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(secret) = secret {
        builder = builder.header("authorization", format!("Bearer {secret}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn as_text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Create a game and fill both seats; returns (boardid, password, white, black)
async fn started_game(app: &Router) -> (u64, String, String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/chessserver/v1/sessions",
        None,
        Some(json!({"name": "match"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created = as_json(&body);
    let boardid = created["boardid"].as_u64().unwrap();
    let password = created["password"].as_str().unwrap().to_string();

    let mut tokens = Vec::new();
    for color in ["w", "b"] {
        let (status, body) = send(
            app,
            "PUT",
            "/chessserver/v1/sessions",
            Some(&password),
            Some(json!({"boardid": boardid, "color": color})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "Joining {color} should succeed");
        tokens.push(as_json(&body)["token"].as_str().unwrap().to_string());
    }
    let black = tokens.pop().unwrap();
    let white = tokens.pop().unwrap();
    (boardid, password, white, black)
}

async fn play(app: &Router, boardid: u64, color: &str, token: &str, mv: &str) -> StatusCode {
    send(
        app,
        "PUT",
        "/chessserver/v1/game",
        Some(token),
        Some(json!({"boardid": boardid, "color": color, "reqtype": "move", "move": mv})),
    )
    .await
    .0
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_list_sessions_starts_empty() {
    let app = test_router();
    let (status, body) = send(&app, "GET", "/chessserver/v1/sessions", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({"games": []}));
}

#[tokio::test]
async fn test_create_session_returns_id_and_password() {
    let app = test_router();
    let (status, body) = send(
        &app,
        "POST",
        "/chessserver/v1/sessions",
        None,
        Some(json!({"name": "first"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = as_json(&body);
    assert_eq!(body["boardid"], 0);
    assert!(body["password"].as_str().is_some_and(|p| !p.is_empty()));

    let (_, body) = send(&app, "GET", "/chessserver/v1/sessions", None, None).await;
    assert_eq!(
        as_json(&body),
        json!({"games": [{"name": "first", "boardid": 0}]})
    );
}

#[tokio::test]
async fn test_join_requires_password() {
    let app = test_router();
    send(
        &app,
        "POST",
        "/chessserver/v1/sessions",
        None,
        Some(json!({"name": "g"})),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        "/chessserver/v1/sessions",
        None,
        Some(json!({"boardid": 0, "color": "w"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "PUT",
        "/chessserver/v1/sessions",
        Some("not-the-password"),
        Some(json!({"boardid": 0, "color": "w"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(as_text(&body), "Invalid password.");
}

#[tokio::test]
async fn test_join_unknown_game_and_bad_color() {
    let app = test_router();
    let (status, body) = send(
        &app,
        "PUT",
        "/chessserver/v1/sessions",
        Some("x"),
        Some(json!({"boardid": 4, "color": "w"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_text(&body), "Game with index 4 doesn't exist.");

    let (status, _) = send(
        &app,
        "PUT",
        "/chessserver/v1/sessions",
        Some("x"),
        Some(json!({"boardid": 4, "color": "green"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_full_game_rejects_third_join() {
    let app = test_router();
    let (boardid, password, _, _) = started_game(&app).await;
    let (status, body) = send(
        &app,
        "PUT",
        "/chessserver/v1/sessions",
        Some(&password),
        Some(json!({"boardid": boardid, "color": "w"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(as_text(&body), "Game is already full.");
}

#[tokio::test]
async fn test_delete_session() {
    let app = test_router();
    let (boardid, password, _, _) = started_game(&app).await;

    let (status, _) = send(
        &app,
        "DELETE",
        "/chessserver/v1/sessions",
        Some("wrong"),
        Some(json!({"boardid": boardid})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "DELETE",
        "/chessserver/v1/sessions",
        Some(&password),
        Some(json!({"boardid": boardid})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/chessserver/v1/sessions", None, None).await;
    assert_eq!(as_json(&body), json!({"games": []}));
}

// ============================================================================
// Game
// ============================================================================

#[tokio::test]
async fn test_state_of_started_game() {
    let app = test_router();
    let (boardid, password, _, _) = started_game(&app).await;

    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=w&reqtype=state");
    let (status, body) = send(&app, "GET", &uri, Some(&password), None).await;
    assert_eq!(status, StatusCode::OK);
    let state = as_json(&body);
    assert_eq!(state["board"][0], "RKBQXBKR");
    assert_eq!(state["board"][7], "rkbqxbkr");
    assert_eq!(state["turncolor"], "w");
    assert_eq!(state["winner"], "n");
    assert_eq!(state["whitekingpos"], json!([7, 4]));
    assert_eq!(state["enpassant"], Value::Null);
}

#[tokio::test]
async fn test_play_and_read_history() {
    let app = test_router();
    let (boardid, password, white, black) = started_game(&app).await;

    assert_eq!(play(&app, boardid, "w", &white, "e2 e4").await, StatusCode::OK);
    assert_eq!(play(&app, boardid, "b", &black, "c7 c5").await, StatusCode::OK);

    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=w&reqtype=state&moveidx=1");
    let (status, body) = send(&app, "GET", &uri, Some(&password), None).await;
    assert_eq!(status, StatusCode::OK);
    let state = as_json(&body);
    assert_eq!(state["lastmove"], "e2 e4");
    assert_eq!(state["turncolor"], "b");
    assert_eq!(state["enpassant"], json!([4, 4]));

    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=w&reqtype=state&moveidx=9");
    let (status, _) = send(&app, "GET", &uri, Some(&password), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_moves_rejected() {
    let app = test_router();
    let (boardid, _, white, black) = started_game(&app).await;

    assert_eq!(
        play(&app, boardid, "b", &black, "e7 e5").await,
        StatusCode::BAD_REQUEST,
        "Black may not move first"
    );
    assert_eq!(
        play(&app, boardid, "w", &white, "e2 e5").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        play(&app, boardid, "w", &white, "e2-e4").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        play(&app, boardid, "w", &black, "e2 e4").await,
        StatusCode::UNAUTHORIZED,
        "Black's token must not move White"
    );
}

#[tokio::test]
async fn test_moves_query() {
    let app = test_router();
    let (boardid, _, white, _) = started_game(&app).await;

    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=w&reqtype=moves&row=7&col=1");
    let (status, body) = send(&app, "GET", &uri, Some(&white), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!([
            {"from": [7, 1], "to": [5, 0], "capture": false},
            {"from": [7, 1], "to": [5, 2], "capture": false}
        ])
    );

    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=w&reqtype=moves");
    let (status, _) = send(&app, "GET", &uri, Some(&white), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_turn_ready_and_timeout() {
    let app = test_router();
    let (boardid, _, white, black) = started_game(&app).await;

    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=w&reqtype=turn");
    let (status, body) = send(&app, "GET", &uri, Some(&white), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({}));

    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=b&reqtype=turn");
    let (status, body) = send(&app, "GET", &uri, Some(&black), None).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(as_text(&body), "Timeout waiting for turn.");
}

#[tokio::test]
async fn test_turn_wait_cancelled_on_shutdown() {
    let state = test_state();
    let app = router(state.clone());
    let (boardid, _, _, black) = started_game(&app).await;

    state.begin_shutdown();
    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=b&reqtype=turn");
    let (status, body) = send(&app, "GET", &uri, Some(&black), None).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(as_text(&body), "Server exited while waiting for turn.");
}

#[tokio::test]
async fn test_forfeit_ends_game() {
    let app = test_router();
    let (boardid, password, white, _) = started_game(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/chessserver/v1/game",
        Some(&white),
        Some(json!({"boardid": boardid, "color": "w", "reqtype": "forfeit"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=w&reqtype=state");
    let (_, body) = send(&app, "GET", &uri, Some(&password), None).await;
    let state = as_json(&body);
    assert_eq!(state["winner"], "b");
    assert_eq!(state["turncolor"], "n");

    assert_eq!(
        play(&app, boardid, "w", &white, "e2 e4").await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_random_moves_alternate() {
    let app = test_router();
    let (boardid, password, white, black) = started_game(&app).await;

    for (color, token) in [("w", &white), ("b", &black), ("w", &white)] {
        let (status, _) = send(
            &app,
            "PUT",
            "/chessserver/v1/game",
            Some(token),
            Some(json!({"boardid": boardid, "color": color, "reqtype": "randommove"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=w&reqtype=state");
    let (_, body) = send(&app, "GET", &uri, Some(&password), None).await;
    assert_eq!(as_json(&body)["turncolor"], "b");
}

#[tokio::test]
async fn test_unknown_reqtype() {
    let app = test_router();
    let (boardid, password, _, _) = started_game(&app).await;
    let uri = format!("/chessserver/v1/game?boardid={boardid}&color=w&reqtype=history");
    let (status, _) = send(&app, "GET", &uri, Some(&password), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
