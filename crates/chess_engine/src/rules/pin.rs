//! Pin diagnostics
//!
//! A piece is pinned when it stands on a line with its own king, nothing sits
//! between the two, and the first piece beyond it (looking away from the king)
//! is an enemy slider that moves along that line.

use crate::constants::PIN_SCAN_LIMIT;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::*;

/// Whether two squares share a row, a column or a diagonal
pub fn linearly_correlated(a: Square, b: Square) -> bool {
    let (d_row, d_col) = (a.row - b.row, a.col - b.col);
    d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs()
}

/// Unit step pointing from `king` toward `square`
///
/// `(0, 1)` is east, `(-1, 0)` north, `(-1, 1)` north-east, and so on.
///
/// # Errors
///
/// [`ChessEngineError::InternalInvariant`] when the squares coincide or are not
/// on a common line.
pub fn direction_deltas(square: Square, king: Square) -> ChessEngineResult<(i8, i8)> {
    if square == king || !linearly_correlated(square, king) {
        return Err(ChessEngineError::InternalInvariant {
            message: format!("no direction from {king} to {square}"),
        });
    }
    Ok(((square.row - king.row).signum(), (square.col - king.col).signum()))
}

/// Whether moving the piece on `square` would open a line onto its own king
///
/// Empty squares and kings are never pinned.
///
/// # Examples
///
/// ```rust,ignore
/// // Black rook on c6 between its king on d5 and a white bishop on a8
/// assert!(is_pinned(Square::new(2, 2), &state)?);
/// ```
pub fn is_pinned(square: Square, state: &BoardState) -> ChessEngineResult<bool> {
    let Some(piece) = state.piece_at(square) else {
        return Ok(false);
    };
    if piece.kind == PieceKind::King {
        return Ok(false);
    }
    let king = state.king_pos(piece.color);
    if !linearly_correlated(square, king) {
        return Ok(false);
    }
    let (d_row, d_col) = direction_deltas(square, king)?;

    let mut cursor = king.offset(d_row, d_col);
    for _ in 0..PIN_SCAN_LIMIT {
        if cursor == square {
            return slider_behind(state, square, piece.color, (d_row, d_col));
        }
        if !state.board.is_empty_at(cursor) {
            return Ok(false);
        }
        cursor = cursor.offset(d_row, d_col);
    }
    Err(ChessEngineError::scan_limit("pin scan", PIN_SCAN_LIMIT))
}

fn slider_behind(
    state: &BoardState,
    square: Square,
    color: Color,
    (d_row, d_col): (i8, i8),
) -> ChessEngineResult<bool> {
    let diagonal = d_row != 0 && d_col != 0;
    let mut cursor = square;
    for _ in 0..PIN_SCAN_LIMIT {
        cursor = cursor.offset(d_row, d_col);
        if !cursor.in_bounds() {
            return Ok(false);
        }
        let Some(other) = state.piece_at(cursor) else {
            continue;
        };
        if other.color == color {
            return Ok(false);
        }
        return Ok(match other.kind {
            PieceKind::Queen => true,
            PieceKind::Bishop => diagonal,
            PieceKind::Rook => !diagonal,
            _ => false,
        });
    }
    Err(ChessEngineError::scan_limit("pin scan", PIN_SCAN_LIMIT))
}
