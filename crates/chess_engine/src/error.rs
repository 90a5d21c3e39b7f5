//! Error types for chess engine
//!
//! Every rejection produced by move parsing and move validation maps to exactly
//! one variant here, so the session layer can report each kind distinctly.

use crate::types::{Color, Square};
use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Move text is not of the form `"e2 e4"`
    #[error("Malformed move notation {notation:?}: {reason}")]
    MalformedNotation {
        notation: String,
        reason: &'static str,
    },

    /// A square of the move lies outside the board
    #[error("Square {square} is outside the board")]
    OutOfBounds { square: Square },

    /// The mover is not the side to move
    #[error("It is not {color}'s turn")]
    NotMoversTurn { color: Color },

    /// The origin square holds no piece of the mover
    #[error("No piece owned by {color} at {square}")]
    NoOwnedPieceAtOrigin { square: Square, color: Color },

    /// The destination square holds one of the mover's own pieces
    #[error("Target square {square} holds a piece owned by {color}")]
    OwnPieceAtDestination { square: Square, color: Color },

    /// The move is not one the piece can make
    #[error("Move {notation} does not exist for the piece")]
    MoveShapeInvalid { notation: String },

    /// The move would leave the mover's king attacked
    #[error("Move {notation} leaves the king under attack")]
    MoveLeavesKingAttacked { notation: String },

    /// A bounded scan ran past its limit or cached state disagrees with the board
    #[error("Internal invariant violated: {message}")]
    InternalInvariant { message: String },
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;

impl ChessEngineError {
    /// A bounded enumeration visited more entries than its limit allows
    pub(crate) fn scan_limit(context: &str, limit: usize) -> Self {
        ChessEngineError::InternalInvariant {
            message: format!("{context} did not terminate within {limit} steps"),
        }
    }
}
