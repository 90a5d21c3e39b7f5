//! Pawn move generation
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: one square toward the opponent if that square is empty
//! - **Double push**: two squares from the starting row when both squares are empty
//! - **Captures**: one square diagonally forward, only onto an enemy piece
//!
//! The recorded en-passant square is not consulted: a diagonal step onto an
//! empty square is never generated, even right after a double push.

use crate::board::Board;
use crate::types::*;

/// Generate pawn moves from a given square
pub(super) fn generate_pawn_moves(board: &Board, from: Square, color: Color, moves: &mut Moves) {
    let direction = color.pawn_direction();

    let single = from.offset(direction, 0);
    if single.in_bounds() && board.is_empty_at(single) {
        moves.push(Move::new(from, single, color, false));
    }

    let double = from.offset(2 * direction, 0);
    if from.row == color.pawn_start_row()
        && double.in_bounds()
        && board.is_empty_at(single)
        && board.is_empty_at(double)
    {
        moves.push(Move::new(from, double, color, false));
    }

    for d_col in [-1, 1] {
        let target = from.offset(direction, d_col);
        if let Some(piece) = board.get(target) {
            if piece.color != color {
                moves.push(Move::new(from, target, color, true));
            }
        }
    }
}
