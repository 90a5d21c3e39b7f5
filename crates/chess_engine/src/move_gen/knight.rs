//! Knight move generation
//!
//! Knights jump to the fixed L-shaped offsets in
//! [`KNIGHT_OFFSETS`](crate::constants::KNIGHT_OFFSETS). Only a friendly piece on
//! the landing square stops a jump; an enemy piece there is captured.

use crate::board::Board;
use crate::constants::KNIGHT_OFFSETS;
use crate::types::*;

pub(super) fn generate_knight_moves(board: &Board, from: Square, color: Color, moves: &mut Moves) {
    generate_jump_moves(board, from, color, &KNIGHT_OFFSETS, moves);
}

/// Single-step moves to each in-bounds offset not held by an own piece
pub(super) fn generate_jump_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut Moves,
) {
    for &(d_row, d_col) in offsets {
        let to = from.offset(d_row, d_col);
        if !to.in_bounds() {
            continue;
        }
        match board.get(to) {
            None => moves.push(Move::new(from, to, color, false)),
            Some(piece) if piece.color != color => moves.push(Move::new(from, to, color, true)),
            Some(_) => {}
        }
    }
}
