//! King move generation
//!
//! The king steps to any of the eight adjacent squares that is empty or holds an
//! enemy piece. Castling is not part of this rule set.

use super::knight::generate_jump_moves;
use crate::board::Board;
use crate::constants::KING_OFFSETS;
use crate::types::*;

pub(super) fn generate_king_moves(board: &Board, from: Square, color: Color, moves: &mut Moves) {
    generate_jump_moves(board, from, color, &KING_OFFSETS, moves);
}
