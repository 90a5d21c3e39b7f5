//! REST transport under `/chessserver/v1`
//!
//! Handlers clone the `Arc<Game>` out of the registry, so the registry lock is
//! released before any game lock is taken. Errors are returned as plain text
//! with the status chosen by [`ApiError`].

use crate::auth::Bearer;
use crate::config::{ServerConfig, TurnWaitConfig};
use crate::error::{ApiError, ApiResult};
use crate::game::TurnWait;
use crate::registry::{GameRegistry, GameSummary};
use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chess_engine::{Color, Square};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::{net::TcpListener, signal, sync::watch};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<GameRegistry>,
    pub turn_wait: TurnWaitConfig,
    shutdown: Arc<watch::Sender<bool>>,
}

impl AppState {
    pub fn new(turn_wait: TurnWaitConfig) -> Self {
        let (shutdown, _) = watch::channel(false);
        AppState {
            registry: Arc::new(GameRegistry::new()),
            turn_wait,
            shutdown: Arc::new(shutdown),
        }
    }

    /// Cancel every pending and future turn wait
    pub fn begin_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Resolves once [`AppState::begin_shutdown`] has been called
    fn shutdown_requested(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut receiver = self.shutdown.subscribe();
        async move {
            let _ = receiver.wait_for(|stopped| *stopped).await;
        }
    }
}

// ============================================================================
// Wire records
// ============================================================================

#[derive(Serialize)]
pub struct SessionList {
    pub games: Vec<GameSummary>,
}

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub boardid: u32,
    pub password: String,
}

#[derive(Deserialize)]
pub struct JoinSessionRequest {
    pub boardid: u32,
    pub color: String,
}

#[derive(Serialize)]
pub struct JoinSessionResponse {
    pub token: String,
}

#[derive(Deserialize)]
pub struct DeleteSessionRequest {
    pub boardid: u32,
}

#[derive(Deserialize)]
pub struct GameQuery {
    pub boardid: u32,
    pub color: String,
    pub reqtype: String,
    pub moveidx: Option<i64>,
    pub row: Option<i8>,
    pub col: Option<i8>,
}

#[derive(Deserialize)]
pub struct GameAction {
    pub boardid: u32,
    pub color: String,
    pub reqtype: String,
    #[serde(rename = "move")]
    pub notation: Option<String>,
}

fn parse_color(text: &str) -> ApiResult<Color> {
    let mut chars = text.chars();
    match (chars.next().and_then(Color::from_char), chars.next()) {
        (Some(color), None) => Ok(color),
        _ => Err(ApiError::BadRequest(format!("Color {text:?} is invalid."))),
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/chessserver/v1/sessions",
            get(list_sessions)
                .post(create_session)
                .put(join_session)
                .delete(delete_session),
        )
        .route("/chessserver/v1/game", get(get_game).put(put_game))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy admitting the browser front-end at `origin`
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("invalid allowed origin {origin:?}"))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([
            Method::DELETE,
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]))
}

/// Bind `config.addr` and serve until SIGINT or SIGTERM
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.turn_wait());
    let app = router(state.clone()).layer(cors_layer(&config.allowed_origin)?);

    let listener = TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!("[SERVER] Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .context("server error")?;

    info!("[SERVER] Stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("[SERVER] Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("[SERVER] Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("[SERVER] Shutdown signal received, cancelling turn waits");
    state.begin_shutdown();
}

// ============================================================================
// Session handlers
// ============================================================================

async fn list_sessions(State(state): State<AppState>) -> Json<SessionList> {
    Json(SessionList {
        games: state.registry.list(),
    })
}

async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> ApiResult<Json<CreateSessionResponse>> {
    let game = state.registry.create(req.name)?;
    Ok(Json(CreateSessionResponse {
        boardid: game.id,
        password: game.password().to_string(),
    }))
}

async fn join_session(
    State(state): State<AppState>,
    Bearer(password): Bearer,
    Json(req): Json<JoinSessionRequest>,
) -> ApiResult<Json<JoinSessionResponse>> {
    let color = parse_color(&req.color)?;
    let game = state.registry.get(req.boardid)?;
    game.verify_password(&password)?;
    let token = game.join(color)?;
    Ok(Json(JoinSessionResponse { token }))
}

async fn delete_session(
    State(state): State<AppState>,
    Bearer(password): Bearer,
    Json(req): Json<DeleteSessionRequest>,
) -> ApiResult<StatusCode> {
    state.registry.delete(req.boardid, &password)?;
    Ok(StatusCode::OK)
}

// ============================================================================
// Game handlers
// ============================================================================

async fn get_game(
    State(state): State<AppState>,
    Bearer(secret): Bearer,
    Query(query): Query<GameQuery>,
) -> ApiResult<Response> {
    let color = parse_color(&query.color)?;
    let game = state.registry.get(query.boardid)?;
    game.verify_reader(color, &secret)?;

    match query.reqtype.as_str() {
        "state" => {
            let snapshot = game.snapshot(query.moveidx.unwrap_or(-1))?;
            Ok(Json(snapshot).into_response())
        }
        "turn" => {
            debug!("[GAME] {} waiting for turn in game {}", color, game.id);
            match game
                .wait_for_turn(color, &state.turn_wait, state.shutdown_requested())
                .await
            {
                TurnWait::Ready => Ok(Json(json!({})).into_response()),
                TurnWait::TimedOut => Err(ApiError::TurnTimeout),
                TurnWait::Cancelled => Err(ApiError::Cancelled),
            }
        }
        "moves" => {
            let (Some(row), Some(col)) = (query.row, query.col) else {
                return Err(ApiError::BadRequest(
                    "Moves request needs row and col.".into(),
                ));
            };
            let moves = game.legal_moves(Square::new(row, col))?;
            Ok(Json(moves).into_response())
        }
        other => Err(ApiError::BadRequest(format!(
            "Request type {other:?} is invalid."
        ))),
    }
}

async fn put_game(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Json(req): Json<GameAction>,
) -> ApiResult<StatusCode> {
    let color = parse_color(&req.color)?;
    let game = state.registry.get(req.boardid)?;
    game.verify_seat(color, &token)?;

    match req.reqtype.as_str() {
        "move" => {
            let notation = req
                .notation
                .ok_or_else(|| ApiError::BadRequest("Move is missing.".into()))?;
            game.play(color, &notation)?;
        }
        "randommove" => {
            game.play_random(color, &mut rand::rng())?;
        }
        "forfeit" => game.forfeit(color)?,
        other => {
            return Err(ApiError::BadRequest(format!(
                "Request type {other:?} is invalid."
            )))
        }
    }
    Ok(StatusCode::OK)
}
