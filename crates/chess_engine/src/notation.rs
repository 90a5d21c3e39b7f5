//! Algebraic move notation
//!
//! Moves travel as five characters, `"<file><rank> <file><rank>"`, for example
//! `"e2 e4"`. File `a` is column 0 and rank `1` is row 7 (White's back rank).

use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::*;

const NOTATION_LEN: usize = 5;

/// Field name of an on-board square, e.g. `"e2"` for `(6, 4)`
pub fn field_name(square: Square) -> String {
    let file = (b'a' + square.col as u8) as char;
    let rank = (b'1' + (BOARD_SIZE - 1 - square.row) as u8) as char;
    format!("{file}{rank}")
}

/// Render a move as `"<from> <to>"`
pub fn move_to_string(mv: &Move) -> String {
    format!("{} {}", field_name(mv.from), field_name(mv.to))
}

/// Parse a two-character field name
pub fn parse_field(field: &str) -> Option<Square> {
    let mut chars = field.chars();
    let (file, rank) = (chars.next()?, chars.next()?);
    if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    let col = file as i8 - 'a' as i8;
    let row = BOARD_SIZE - 1 - (rank as i8 - '1' as i8);
    Some(Square::new(row, col))
}

/// Parse `"e2 e4"` into a move for `color`
///
/// The capture flag of the result is always `false`; whether the move captures
/// depends on the board it is played on.
///
/// # Errors
///
/// [`ChessEngineError::MalformedNotation`] when the text is not exactly five
/// characters, the middle character is not a space, or either field names a
/// square off the board.
///
/// # Examples
///
/// ```rust,ignore
/// let mv = string_to_move("e2 e4", Color::White)?;
/// assert_eq!(mv.from, Square::new(6, 4));
/// assert_eq!(mv.to, Square::new(4, 4));
/// ```
pub fn string_to_move(text: &str, color: Color) -> ChessEngineResult<Move> {
    let malformed = |reason| ChessEngineError::MalformedNotation {
        notation: text.to_string(),
        reason,
    };

    if text.len() != NOTATION_LEN || !text.is_ascii() {
        return Err(malformed("expected five characters"));
    }
    if text.as_bytes()[2] != b' ' {
        return Err(malformed("expected a space between the fields"));
    }
    let from = parse_field(&text[..2]).ok_or_else(|| malformed("origin is not a field"))?;
    let to = parse_field(&text[3..]).ok_or_else(|| malformed("destination is not a field"))?;

    Ok(Move::new(from, to, color, false))
}
