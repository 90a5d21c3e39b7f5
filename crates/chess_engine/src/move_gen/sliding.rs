//! Sliding piece move generation
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//!
//! ## Algorithm
//!
//! Each ray is walked one square at a time from the piece outward until:
//! 1. the board edge (stop),
//! 2. an own piece (stop, no move), or
//! 3. an enemy piece (capture move added, then stop).
//!
//! The queen walks the diagonal rays first, then the straight ones.

use crate::board::Board;
use crate::constants::{DIAGONAL_DIRS, STRAIGHT_DIRS};
use crate::types::*;

pub(super) fn generate_bishop_moves(board: &Board, from: Square, color: Color, moves: &mut Moves) {
    generate_ray_moves(board, from, color, &DIAGONAL_DIRS, moves);
}

pub(super) fn generate_rook_moves(board: &Board, from: Square, color: Color, moves: &mut Moves) {
    generate_ray_moves(board, from, color, &STRAIGHT_DIRS, moves);
}

pub(super) fn generate_queen_moves(board: &Board, from: Square, color: Color, moves: &mut Moves) {
    generate_ray_moves(board, from, color, &DIAGONAL_DIRS, moves);
    generate_ray_moves(board, from, color, &STRAIGHT_DIRS, moves);
}

fn generate_ray_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Moves,
) {
    for &(d_row, d_col) in directions {
        // A ray never has more than BOARD_SIZE - 1 squares.
        for step in 1..BOARD_SIZE {
            let to = from.offset(d_row * step, d_col * step);
            if !to.in_bounds() {
                break;
            }
            match board.get(to) {
                None => moves.push(Move::new(from, to, color, false)),
                Some(piece) => {
                    if piece.color != color {
                        moves.push(Move::new(from, to, color, true));
                    }
                    break;
                }
            }
        }
    }
}
