//! Check, checkmate and stalemate detection
//!
//! The public functions take a shared snapshot and probe a private copy of it,
//! so callers never observe the temporary edits.

use crate::api::filter_invalid_moves;
use crate::board::BoardEdit;
use crate::error::ChessEngineResult;
use crate::move_gen::{all_possible_moves, check_scan_limit, field_attacked, generate_moves_for_piece};
use crate::types::*;

/// Whether `color`'s king is attacked by the other side
pub fn king_attacked(color: Color, state: &BoardState) -> ChessEngineResult<bool> {
    king_attacked_in(&mut state.clone(), color)
}

pub(crate) fn king_attacked_in(state: &mut BoardState, color: Color) -> ChessEngineResult<bool> {
    let king = state.verified_king_pos(color)?;
    field_attacked(state, king, color.opposite())
}

/// Whether `color`'s king has at least one destination that is not attacked
///
/// The king's own square is vacated while the destinations are probed, so a
/// slider checking along a line cannot be escaped by stepping back along it.
/// Nothing else about the move is simulated.
pub fn king_moveable(color: Color, state: &BoardState) -> ChessEngineResult<bool> {
    king_moveable_in(&mut state.clone(), color)
}

fn king_moveable_in(state: &mut BoardState, color: Color) -> ChessEngineResult<bool> {
    let king = state.verified_king_pos(color)?;
    let destinations = generate_moves_for_piece(king, state);

    let mut edit = BoardEdit::new(state);
    edit.place(king, None);
    for mv in &destinations {
        if !field_attacked(&mut edit, mv.to, color.opposite())? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Whether `color` has been checkmated
///
/// True when the king is attacked, cannot step to a safe square, and no move of
/// any other piece (capturing the checker or blocking the line) lifts the
/// attack.
pub fn is_checkmate_player(color: Color, state: &BoardState) -> ChessEngineResult<bool> {
    let mut probe = state.clone();
    let state = &mut probe;

    if !king_attacked_in(state, color)? {
        return Ok(false);
    }
    if king_moveable_in(state, color)? {
        return Ok(false);
    }

    let king = state.king_pos(color);
    let candidates = all_possible_moves(color, state, &[PieceKind::King]);
    check_scan_limit(&candidates, "checkmate candidate scan")?;

    for mv in &candidates {
        let mut edit = BoardEdit::new(state);
        edit.shift(mv.from, mv.to);
        if !field_attacked(&mut edit, king, color.opposite())? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Winner by checkmate, if either side is mated
///
/// White is examined first.
pub fn is_checkmate(state: &BoardState) -> ChessEngineResult<Winner> {
    for color in [Color::White, Color::Black] {
        if is_checkmate_player(color, state)? {
            return Ok(color.opposite().into());
        }
    }
    Ok(Winner::None)
}

/// Whether `color` is stalemated: not in check, yet without a single legal move
pub fn is_remis_player(color: Color, state: &BoardState) -> ChessEngineResult<bool> {
    let mut probe = state.clone();
    if king_attacked_in(&mut probe, color)? {
        return Ok(false);
    }
    if king_moveable_in(&mut probe, color)? {
        return Ok(false);
    }

    let others = all_possible_moves(color, state, &[PieceKind::King]);
    Ok(filter_invalid_moves(&others, state)?.is_empty())
}

/// Whether either side is stalemated
pub fn is_remis(state: &BoardState) -> ChessEngineResult<bool> {
    Ok(is_remis_player(Color::White, state)? || is_remis_player(Color::Black, state)?)
}
