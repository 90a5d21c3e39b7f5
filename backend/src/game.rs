//! Per-session game state machine
//!
//! A [`Game`] moves through three phases:
//!
//! 1. **Waiting** - fewer than two seats taken, nobody to move
//! 2. **Started** - both seats taken; White moves first, turns alternate
//! 3. **Finished** - checkmate, stalemate or forfeit; nobody to move
//!
//! The history holds one snapshot per ply, index 0 being the starting
//! position. It only ever grows, and every entry after the first is its
//! predecessor with exactly one legal move applied.

use crate::auth::generate_secret;
use crate::config::TurnWaitConfig;
use crate::error::{ApiError, ApiResult};
use chess_engine::{
    initialize_board, legal_moves_for_piece, make_move, random_legal_move, string_to_move,
    validate_move, BoardState, ChessEngineError, Color, Move, Moves, Square, Turn, Winner,
};
use parking_lot::RwLock;
use rand::Rng;
use std::future::Future;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Outcome of [`Game::wait_for_turn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnWait {
    Ready,
    TimedOut,
    Cancelled,
}

fn seat_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Mutable part of a game, guarded by the game's lock
#[derive(Debug)]
struct GameData {
    white_token: Option<String>,
    black_token: Option<String>,
    started: bool,
    winner: Winner,
    history: Vec<BoardState>,
}

impl GameData {
    fn seat(&self, color: Color) -> &Option<String> {
        match color {
            Color::White => &self.white_token,
            Color::Black => &self.black_token,
        }
    }

    fn seat_mut(&mut self, color: Color) -> &mut Option<String> {
        match color {
            Color::White => &mut self.white_token,
            Color::Black => &mut self.black_token,
        }
    }

    fn latest(&self) -> ApiResult<&BoardState> {
        self.history
            .last()
            .ok_or_else(|| ApiError::Internal("Game has no board history.".into()))
    }

    fn ensure_in_progress(&self) -> ApiResult<()> {
        if !self.started {
            return Err(ApiError::BadRequest("Game has not started.".into()));
        }
        if self.winner.is_decided() {
            return Err(ApiError::BadRequest("Game has ended.".into()));
        }
        Ok(())
    }
}

/// One chess session
#[derive(Debug)]
pub struct Game {
    pub id: u32,
    pub name: String,
    password: String,
    data: RwLock<GameData>,
}

impl Game {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Game {
            id,
            name: name.into(),
            password: generate_secret(),
            data: RwLock::new(GameData {
                white_token: None,
                black_token: None,
                started: false,
                winner: Winner::None,
                history: vec![initialize_board()],
            }),
        }
    }

    /// Session password, handed to the creator only
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn verify_password(&self, secret: &str) -> ApiResult<()> {
        if secret != self.password {
            return Err(ApiError::Unauthorized("Invalid password.".into()));
        }
        Ok(())
    }

    /// Check `token` against the seat of `color`
    pub fn verify_seat(&self, color: Color, token: &str) -> ApiResult<()> {
        let data = self.data.read();
        match data.seat(color) {
            None => Err(ApiError::NotFound(format!(
                "{} player does not exist.",
                seat_name(color)
            ))),
            Some(seat_token) if seat_token != token => {
                Err(ApiError::Unauthorized("Token is invalid.".into()))
            }
            Some(_) => Ok(()),
        }
    }

    /// Read access: the session password or the token of the requested seat
    pub fn verify_reader(&self, color: Color, secret: &str) -> ApiResult<()> {
        if secret == self.password {
            return Ok(());
        }
        self.verify_seat(color, secret)
    }

    /// Take the seat of `color` and return its token
    ///
    /// Filling the second seat starts the game with White to move.
    pub fn join(&self, color: Color) -> ApiResult<String> {
        let mut data = self.data.write();
        if data.white_token.is_some() && data.black_token.is_some() {
            return Err(ApiError::Forbidden("Game is already full.".into()));
        }
        if data.seat(color).is_some() {
            return Err(ApiError::Forbidden(format!(
                "{} is already taken.",
                seat_name(color)
            )));
        }

        let token = generate_secret();
        *data.seat_mut(color) = Some(token.clone());

        if data.seat(color.opposite()).is_some() {
            data.started = true;
            if let Some(initial) = data.history.first_mut() {
                initial.turn_color = Turn::White;
            }
            info!("[GAME] Game {} started", self.id);
        }
        info!("[SESSIONS] {} joined game {}", seat_name(color), self.id);
        Ok(token)
    }

    /// Snapshot after `index` plies; `-1` selects the latest
    pub fn snapshot(&self, index: i64) -> ApiResult<BoardState> {
        let data = self.data.read();
        let resolved = match index {
            -1 => data.history.len().saturating_sub(1),
            i if i < -1 => {
                return Err(ApiError::BadRequest(format!(
                    "Board index {i} is invalid."
                )))
            }
            i => usize::try_from(i)
                .map_err(|_| ApiError::BadRequest(format!("Board index {i} is invalid.")))?,
        };
        data.history
            .get(resolved)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Board at index {index} does not exist.")))
    }

    /// Legal moves of the piece on `square` in the latest snapshot
    pub fn legal_moves(&self, square: Square) -> ApiResult<Moves> {
        let latest = self.data.read().latest()?.clone();
        Ok(legal_moves_for_piece(square, &latest)?)
    }

    /// Play a move given in notation (`"e2 e4"`) for `color`
    pub fn play(&self, color: Color, notation: &str) -> ApiResult<BoardState> {
        self.apply(color, |latest| {
            let mv = string_to_move(notation, color)?;
            validate_move(&mv, latest)?;
            Ok(mv)
        })
    }

    /// Play a uniformly random legal move for `color`
    pub fn play_random<R: Rng + ?Sized>(&self, color: Color, rng: &mut R) -> ApiResult<BoardState> {
        self.apply(color, |latest| {
            random_legal_move(color, latest, rng)?
                .ok_or_else(|| ApiError::Internal("No moves found.".into()))
        })
    }

    /// Choose, validate and append one move under a single write lock
    fn apply<F>(&self, color: Color, choose: F) -> ApiResult<BoardState>
    where
        F: FnOnce(&BoardState) -> ApiResult<Move>,
    {
        let mut data = self.data.write();
        data.ensure_in_progress()?;
        let latest = data.latest()?;
        if !latest.turn_color.is(color) {
            return Err(ChessEngineError::NotMoversTurn { color }.into());
        }

        let mv = choose(latest)?;
        let next = make_move(&mv, latest, true);
        data.winner = next.winner;
        data.history.push(next.clone());

        debug!("[GAME] Game {}: {} played {}", self.id, color, next.last_move);
        if next.winner.is_decided() {
            info!("[GAME] Game {} finished, winner {:?}", self.id, next.winner);
        }
        Ok(next)
    }

    /// Resign for `color`; the opponent wins
    pub fn forfeit(&self, color: Color) -> ApiResult<()> {
        let mut data = self.data.write();
        data.ensure_in_progress()?;

        let winner = Winner::from(color.opposite());
        if let Some(latest) = data.history.last_mut() {
            latest.turn_color = Turn::Nobody;
            latest.winner = winner;
        }
        data.winner = winner;
        info!("[GAME] Game {}: {} forfeited", self.id, color);
        Ok(())
    }

    /// Turn indicator of the latest snapshot
    pub fn current_turn(&self) -> Turn {
        self.data
            .read()
            .history
            .last()
            .map_or(Turn::Nobody, |state| state.turn_color)
    }

    pub fn winner(&self) -> Winner {
        self.data.read().winner
    }

    pub fn started(&self) -> bool {
        self.data.read().started
    }

    /// Number of moves played so far
    pub fn ply_count(&self) -> usize {
        self.data.read().history.len().saturating_sub(1)
    }

    /// Wait until it is `color`'s turn
    ///
    /// The turn is re-read under a brief read lock every `poll_interval`, the
    /// first time right away. Gives up with [`TurnWait::TimedOut`] after
    /// `timeout` and with [`TurnWait::Cancelled`] as soon as `cancelled`
    /// resolves. Dropping the returned future stops the wait as well.
    pub async fn wait_for_turn<F>(
        &self,
        color: Color,
        config: &TurnWaitConfig,
        cancelled: F,
    ) -> TurnWait
    where
        F: Future<Output = ()>,
    {
        let deadline = time::sleep(config.timeout);
        let mut ticker = time::interval(config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(deadline, cancelled);

        loop {
            tokio::select! {
                biased;
                _ = &mut cancelled => return TurnWait::Cancelled,
                _ = &mut deadline => return TurnWait::TimedOut,
                _ = ticker.tick() => {
                    if self.current_turn().is(color) {
                        return TurnWait::Ready;
                    }
                }
            }
        }
    }
}
