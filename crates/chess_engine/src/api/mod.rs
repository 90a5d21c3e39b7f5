//! Public API for the chess engine
//!
//! High-level entry points used by the session layer. Everything here is
//! synchronous and leaves its input snapshots untouched.
//!
//! ## Module Organization
//!
//! - `game` - Starting position (initialize_board)
//! - `moves` - Move application, legality filtering and validation
//!   (make_move, filter_invalid_moves, validate_move)
//! - `state` - Per-square legal moves and random move choice
//!   (legal_moves_for_piece, random_legal_move)

mod game;
mod moves;
mod state;

pub use game::initialize_board;
pub use moves::{filter_invalid_moves, make_move, validate_move};
pub use state::{legal_moves_for_piece, random_legal_move};
