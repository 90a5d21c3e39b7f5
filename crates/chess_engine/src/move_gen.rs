//! Pseudo-legal move generation
//!
//! Produces the candidate moves of a piece obeying its movement shape and the
//! occupancy of the board, without looking at king safety. Legality is decided
//! later by simulating each candidate and probing the mover's king (see
//! [`crate::api::filter_invalid_moves`]).
//!
//! ## Ordering
//!
//! Moves come out in origin scan order (row by row, column by column) and, per
//! piece, in the order of the offset tables in [`crate::constants`]. The same
//! board always yields the same sequence; callers should not rely on anything
//! beyond that.

mod attack;
mod king;
mod knight;
mod pawn;
mod sliding;

pub use attack::field_attacked;

use crate::constants::MOVE_SCAN_LIMIT;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::*;

/// Generate the pseudo-legal moves of the piece on `square`
///
/// Empty or off-board squares yield no moves.
///
/// # Examples
///
/// ```rust,ignore
/// let state = initialize_board();
/// let moves = generate_moves_for_piece(Square::new(6, 4), &state);
/// // e2-e3 and e2-e4
/// assert_eq!(moves.len(), 2);
/// ```
pub fn generate_moves_for_piece(square: Square, state: &BoardState) -> Moves {
    let mut moves = Moves::new();
    push_moves_for_piece(square, state, &mut moves);
    moves
}

/// Generate the pseudo-legal moves of every piece of `color`
///
/// Pieces whose type appears in `exclude` are skipped.
pub fn all_possible_moves(color: Color, state: &BoardState, exclude: &[PieceKind]) -> Moves {
    let mut moves = Moves::new();
    for (square, piece) in state.board.occupied() {
        if piece.color != color || exclude.contains(&piece.kind) {
            continue;
        }
        push_moves_for_piece(square, state, &mut moves);
    }
    moves
}

/// Fail when a move list is longer than any enumeration may traverse
pub(crate) fn check_scan_limit(moves: &[Move], context: &str) -> ChessEngineResult<()> {
    if moves.len() > MOVE_SCAN_LIMIT {
        return Err(ChessEngineError::scan_limit(context, MOVE_SCAN_LIMIT));
    }
    Ok(())
}

fn push_moves_for_piece(square: Square, state: &BoardState, moves: &mut Moves) {
    let Some(piece) = state.board.get(square) else {
        return;
    };
    let board = &state.board;
    match piece.kind {
        PieceKind::Pawn => pawn::generate_pawn_moves(board, square, piece.color, moves),
        PieceKind::Knight => knight::generate_knight_moves(board, square, piece.color, moves),
        PieceKind::Bishop => sliding::generate_bishop_moves(board, square, piece.color, moves),
        PieceKind::Rook => sliding::generate_rook_moves(board, square, piece.color, moves),
        PieceKind::Queen => sliding::generate_queen_moves(board, square, piece.color, moves),
        PieceKind::King => king::generate_king_moves(board, square, piece.color, moves),
    }
}
