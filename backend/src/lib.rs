//! Session server for the chessbot playground
//!
//! Games live in memory for the lifetime of the process. Each [`game::Game`]
//! guards its seats and move history behind one reader-writer lock, and the
//! [`registry::GameRegistry`] maps board ids to games behind its own lock. The
//! registry lock is always released before a game lock is taken.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod game;
pub mod registry;

pub use api::{router, serve, AppState};
pub use config::{ServerConfig, TurnWaitConfig};
pub use error::{ApiError, ApiResult};
