//! Move execution and validation
//!
//! Functions for applying moves, filtering candidates down to legal moves and
//! checking a submitted move end to end.

use crate::error::{ChessEngineError, ChessEngineResult};
use crate::move_gen::{check_scan_limit, generate_moves_for_piece};
use crate::notation::move_to_string;
use crate::rules::{is_checkmate_player, is_remis_player, king_attacked, king_attacked_in};
use crate::types::*;
use tracing::warn;

/// Apply a move to a copy of `state`
///
/// The piece on `from` moves to `to` (capturing whatever stood there), the king
/// cache follows a king move, the en-passant square is set after a two-square
/// pawn advance and cleared otherwise, `last_move` records the notation, and
/// the turn passes to the other color.
///
/// With `evaluate_outcome` set, the opponent is then tested for checkmate and
/// stalemate; either ends the game (winner set, turn `Nobody`). Legality probes
/// pass `false` to skip that cost.
///
/// # Panics
///
/// Panics if either square of `mv` is off the board. Moves from
/// [`validate_move`] or from the generators are always on the board.
///
/// # Examples
///
/// ```rust,ignore
/// let next = make_move(&string_to_move("d2 d4", Color::White)?, &state, true);
/// assert_eq!(next.en_passant, Some(Square::new(4, 3)));
/// ```
pub fn make_move(mv: &Move, state: &BoardState, evaluate_outcome: bool) -> BoardState {
    let mut next = state.clone();
    let mover = state.piece_at(mv.from);
    let mover_color = mover.map_or(mv.color, |piece| piece.color);

    next.en_passant = None;
    if let Some(piece) = mover {
        match piece.kind {
            PieceKind::King => next.relocate_king(piece.color, mv.to),
            PieceKind::Pawn if (mv.from.row - mv.to.row).abs() == 2 => {
                next.en_passant = Some(mv.to)
            }
            _ => {}
        }
    }

    next.last_move = move_to_string(mv);
    next.board.set(mv.to, mover);
    next.board.set(mv.from, None);
    next.turn_color = mover_color.opposite().into();

    if evaluate_outcome {
        settle_outcome(&mut next, mover_color);
    }
    next
}

fn settle_outcome(next: &mut BoardState, mover: Color) {
    let opponent = mover.opposite();

    match is_checkmate_player(opponent, next) {
        Ok(true) => {
            next.winner = mover.into();
            next.turn_color = Turn::Nobody;
        }
        Ok(false) => {}
        Err(err) => warn!("[GAME] Checkmate evaluation failed after {}: {}", next.last_move, err),
    }

    match is_remis_player(opponent, next) {
        Ok(true) => {
            next.winner = Winner::Draw;
            next.turn_color = Turn::Nobody;
        }
        Ok(false) => {}
        Err(err) => warn!("[GAME] Stalemate evaluation failed after {}: {}", next.last_move, err),
    }
}

/// Keep only the moves that do not leave the mover's own king attacked
///
/// Each candidate is applied to a copy of `state` without outcome evaluation
/// and the mover's king is probed. Input order is preserved.
///
/// # Errors
///
/// Only [`ChessEngineError::InternalInvariant`], never for a structurally valid
/// candidate.
pub fn filter_invalid_moves(moves: &[Move], state: &BoardState) -> ChessEngineResult<Moves> {
    check_scan_limit(moves, "legality filter")?;

    let mut legal = Moves::with_capacity(moves.len());
    for mv in moves {
        let mut next = make_move(mv, state, false);
        if !king_attacked_in(&mut next, mv.color)? {
            legal.push(*mv);
        }
    }
    Ok(legal)
}

/// Check a submitted move against `state`
///
/// Checks run in order and the first failure is returned:
///
/// 1. It is the mover's turn ([`ChessEngineError::NotMoversTurn`])
/// 2. Both squares are on the board ([`ChessEngineError::OutOfBounds`])
/// 3. The origin holds a piece of the mover
///    ([`ChessEngineError::NoOwnedPieceAtOrigin`])
/// 4. The destination does not hold one
///    ([`ChessEngineError::OwnPieceAtDestination`])
/// 5. The piece can make the move ([`ChessEngineError::MoveShapeInvalid`])
/// 6. The move survives the legality filter and a fresh re-simulation
///    ([`ChessEngineError::MoveLeavesKingAttacked`])
pub fn validate_move(mv: &Move, state: &BoardState) -> ChessEngineResult<()> {
    let color = mv.color;
    if !state.turn_color.is(color) {
        return Err(ChessEngineError::NotMoversTurn { color });
    }

    for square in [mv.from, mv.to] {
        if !square.in_bounds() {
            return Err(ChessEngineError::OutOfBounds { square });
        }
    }

    match state.piece_at(mv.from) {
        Some(piece) if piece.color == color => {}
        _ => {
            return Err(ChessEngineError::NoOwnedPieceAtOrigin {
                square: mv.from,
                color,
            })
        }
    }
    if state.piece_at(mv.to).is_some_and(|piece| piece.color == color) {
        return Err(ChessEngineError::OwnPieceAtDestination { square: mv.to, color });
    }

    let notation = move_to_string(mv);
    let candidates = generate_moves_for_piece(mv.from, state);
    if !contains_move(&candidates, mv) {
        return Err(ChessEngineError::MoveShapeInvalid { notation });
    }

    let legal = filter_invalid_moves(&candidates, state)?;
    if !contains_move(&legal, mv) {
        return Err(ChessEngineError::MoveLeavesKingAttacked { notation });
    }

    if king_attacked(color, &make_move(mv, state, false))? {
        return Err(ChessEngineError::MoveLeavesKingAttacked { notation });
    }
    Ok(())
}
