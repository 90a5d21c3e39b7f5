//! Attack detection ("field attacked")
//!
//! ## Algorithm
//!
//! There is no separate attack map. To ask whether `attacker` could capture on a
//! square, a sentinel king of the defending color is placed there, every
//! pseudo-legal move of `attacker` is generated, and the square counts as
//! attacked when one of those moves lands on it as a capture. The sentinel is
//! what turns pawn diagonals into captures on squares that are really empty.
//!
//! The probe edits the snapshot through [`BoardEdit`], so the original occupant
//! is back in place on every exit path.

use super::{all_possible_moves, check_scan_limit};
use crate::board::BoardEdit;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::*;

/// Whether `attacker` could capture a piece standing on `target`
///
/// Takes the snapshot mutably for the duration of the probe; it is unchanged on
/// return, including when an error is returned.
///
/// # Errors
///
/// [`ChessEngineError::OutOfBounds`] for an off-board target and
/// [`ChessEngineError::InternalInvariant`] if the move enumeration runs past its
/// limit.
pub fn field_attacked(
    state: &mut BoardState,
    target: Square,
    attacker: Color,
) -> ChessEngineResult<bool> {
    if !target.in_bounds() {
        return Err(ChessEngineError::OutOfBounds { square: target });
    }

    let mut edit = BoardEdit::new(state);
    edit.place(
        target,
        Some(Piece::new(attacker.opposite(), PieceKind::King)),
    );
    let moves = all_possible_moves(attacker, &edit, &[]);
    drop(edit);

    check_scan_limit(&moves, "attack scan")?;
    Ok(moves.iter().any(|mv| mv.to == target && mv.capture))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn state(rows: [&str; 8]) -> BoardState {
        BoardState::from_board(Board::from_rows(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_bishop_attacks_along_diagonal() {
        let mut state = state([
            "b       ", "        ", "        ", "        ", "        ", "        ", "        ",
            "  X x   ",
        ]);
        assert!(field_attacked(&mut state, Square::new(1, 1), Color::White).unwrap());
        assert!(!field_attacked(&mut state, Square::new(1, 2), Color::White).unwrap());
    }

    #[test]
    fn test_rook_attack_and_pawn_diagonal() {
        let mut state = state([
            " r      ", "        ", " B      ", "        ", " X      ", "        ", "        ",
            "  x     ",
        ]);
        let before = state.clone();
        // The bishop on b6 reaches d4.
        assert!(field_attacked(&mut state, Square::new(4, 3), Color::Black).unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn test_pawn_forward_square_is_not_attacked() {
        let mut state = state([
            "   X    ", "        ", "        ", "        ", "        ", "        ", "    p   ",
            "    x   ",
        ]);
        assert!(!field_attacked(&mut state, Square::new(5, 4), Color::White).unwrap());
        assert!(field_attacked(&mut state, Square::new(5, 3), Color::White).unwrap());
        assert!(field_attacked(&mut state, Square::new(5, 5), Color::White).unwrap());
    }

    #[test]
    fn test_occupied_target_is_restored() {
        let mut state = state([
            "   X    ", "        ", "        ", "   Q    ", "        ", "        ", "   r    ",
            "    x   ",
        ]);
        let before = state.clone();
        assert!(field_attacked(&mut state, Square::new(3, 3), Color::White).unwrap());
        assert!(field_attacked(&mut state, Square::new(6, 3), Color::Black).unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn test_off_board_target_is_an_error() {
        let mut state = state([
            "   X    ", "        ", "        ", "        ", "        ", "        ", "        ",
            "    x   ",
        ]);
        assert!(matches!(
            field_attacked(&mut state, Square::new(8, 0), Color::White),
            Err(ChessEngineError::OutOfBounds { .. })
        ));
    }
}
