//! Chess rules engine for the chessbot playground
//!
//! A pure, synchronous rules core: board snapshots, pseudo-legal move
//! generation, attack probing, king safety, legality filtering, move
//! application and move notation. Nothing in this crate blocks or does I/O.
//!
//! # Example
//!
//! ```rust,ignore
//! use chess_engine::*;
//!
//! let state = initialize_board().with_turn(Turn::White);
//! let mv = string_to_move("e2 e4", Color::White)?;
//! validate_move(&mv, &state)?;
//! let next = make_move(&mv, &state, true);
//! assert_eq!(next.turn_color, Turn::Black);
//! ```

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod move_gen;
pub mod notation;
pub mod rules;
pub mod types;

pub use api::{
    filter_invalid_moves, initialize_board, legal_moves_for_piece, make_move, random_legal_move,
    validate_move,
};
pub use board::{init_board, Board};
pub use error::{ChessEngineError, ChessEngineResult};
pub use move_gen::{all_possible_moves, field_attacked, generate_moves_for_piece};
pub use notation::{field_name, move_to_string, parse_field, string_to_move};
pub use rules::{
    is_checkmate, is_checkmate_player, is_pinned, is_remis, is_remis_player, king_attacked,
    king_moveable,
};
pub use types::*;
