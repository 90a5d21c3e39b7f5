//! # Core value types for the rules engine
//!
//! ## Piece tags
//!
//! Every occupied cell holds one piece tag. The letter selects the piece type and
//! the case selects the owner:
//!
//! | Letter | Piece  |
//! |--------|--------|
//! | `p`    | Pawn   |
//! | `k`    | Knight |
//! | `b`    | Bishop |
//! | `r`    | Rook   |
//! | `q`    | Queen  |
//! | `x`    | King   |
//!
//! Lowercase tags belong to White (seat A), uppercase tags to Black (seat B).
//! Note that `k` is the knight, the king is `x`.
//!
//! ## Coordinates
//!
//! Squares are `(row, col)` pairs. Row 0 is Black's back rank, row 7 is White's
//! back rank, column 0 is file `a`. Coordinates are signed so that offsets can be
//! applied before bounds are checked.
//!
//! ## Snapshots
//!
//! [`BoardState`] is one immutable-once-created snapshot of a game. The king
//! squares are cached on the snapshot and kept in sync by every transition that
//! moves a king; they are never re-derived by scanning the board.

use crate::board::Board;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::notation::field_name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board
pub const BOARD_SIZE: i8 = 8;

/// One of the two seats in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Single-character wire form (`'w'` or `'b'`)
    pub fn as_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// Row delta of a single pawn advance
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row on which this color's pawns start (and may advance two squares)
    pub fn pawn_start_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase tag letter of this piece type
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'k',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'x',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'p' => Some(PieceKind::Pawn),
            'k' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'x' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece occupying a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Board tag for this piece (`'q'` for a white queen, `'Q'` for a black one)
    pub fn tag(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_uppercase(),
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        let kind = PieceKind::from_letter(tag.to_ascii_lowercase())?;
        let color = if tag.is_ascii_lowercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { color, kind })
    }
}

/// Contents of one board cell
pub type Cell = Option<Piece>;

/// Board coordinate, serialized as `[row, col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i8; 2]", into = "[i8; 2]")]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Square shifted by the given row and column deltas (may leave the board)
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Self {
        Square {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl From<[i8; 2]> for Square {
    fn from([row, col]: [i8; 2]) -> Self {
        Square { row, col }
    }
}

impl From<Square> for [i8; 2] {
    fn from(square: Square) -> Self {
        [square.row, square.col]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            write!(f, "{}", field_name(*self))
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Whose move it is
///
/// `Nobody` is used both before the second seat fills and once the game is
/// over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Turn {
    #[default]
    #[serde(rename = "n")]
    Nobody,
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Turn {
    pub fn is(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Turn::Nobody => None,
            Turn::White => Some(Color::White),
            Turn::Black => Some(Color::Black),
        }
    }
}

impl From<Color> for Turn {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Turn::White,
            Color::Black => Turn::Black,
        }
    }
}

/// Result of a game, `Draw` being a same-side stalemate ("remis")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Winner {
    #[default]
    #[serde(rename = "n")]
    None,
    #[serde(rename = "r")]
    Draw,
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Winner {
    pub fn is_decided(self) -> bool {
        self != Winner::None
    }
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Winner::White,
            Color::Black => Winner::Black,
        }
    }
}

/// A candidate or submitted move
///
/// Only `from`, `to` and `capture` cross the wire; the mover's color is implied
/// by the request that carries the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(skip)]
    pub color: Color,
    pub capture: bool,
}

impl Move {
    pub const fn new(from: Square, to: Square, color: Color, capture: bool) -> Self {
        Move {
            from,
            to,
            color,
            capture,
        }
    }

    /// Same squares and mover, ignoring the capture flag
    ///
    /// Moves parsed from notation never carry a capture flag, so membership
    /// tests against generated moves compare with this instead of `==`.
    pub fn same_as(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.color == other.color
    }
}

/// Ordered sequence of moves, in generation order
pub type Moves = Vec<Move>;

/// Whether `moves` holds a move matching `mv` (see [`Move::same_as`])
pub fn contains_move(moves: &[Move], mv: &Move) -> bool {
    moves.iter().any(|candidate| candidate.same_as(mv))
}

/// Snapshot of a game after some number of plies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub board: Board,
    #[serde(rename = "lastmove")]
    pub last_move: String,
    #[serde(rename = "whitekingpos")]
    pub white_king_pos: Square,
    #[serde(rename = "blackkingpos")]
    pub black_king_pos: Square,
    /// Reserved for castling; no rule reads it yet
    #[serde(rename = "whitekingmoved")]
    pub white_king_moved: bool,
    #[serde(rename = "blackkingmoved")]
    pub black_king_moved: bool,
    pub winner: Winner,
    #[serde(rename = "turncolor")]
    pub turn_color: Turn,
    /// Landing square of a pawn that just advanced two squares
    #[serde(rename = "enpassant")]
    pub en_passant: Option<Square>,
}

impl BoardState {
    /// Build a snapshot around an arbitrary board
    ///
    /// The king squares are located once here and cached from then on. Fails when
    /// either color does not have exactly one king.
    pub fn from_board(board: Board) -> ChessEngineResult<Self> {
        let white_king_pos = board.single_king(Color::White)?;
        let black_king_pos = board.single_king(Color::Black)?;
        Ok(BoardState {
            board,
            last_move: String::new(),
            white_king_pos,
            black_king_pos,
            white_king_moved: false,
            black_king_moved: false,
            winner: Winner::None,
            turn_color: Turn::Nobody,
            en_passant: None,
        })
    }

    pub fn with_turn(mut self, turn: Turn) -> Self {
        self.turn_color = turn;
        self
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    /// Cached king square of `color`
    pub fn king_pos(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king_pos,
            Color::Black => self.black_king_pos,
        }
    }

    pub fn king_moved(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_moved,
            Color::Black => self.black_king_moved,
        }
    }

    /// Record that `color`'s king now stands on `square`
    pub(crate) fn relocate_king(&mut self, color: Color, square: Square) {
        match color {
            Color::White => {
                self.white_king_pos = square;
                self.white_king_moved = true;
            }
            Color::Black => {
                self.black_king_pos = square;
                self.black_king_moved = true;
            }
        }
    }

    /// Cached king square of `color`, checked against the board
    ///
    /// A mismatch means some transition forgot to update the cache.
    pub(crate) fn verified_king_pos(&self, color: Color) -> ChessEngineResult<Square> {
        let square = self.king_pos(color);
        match self.board.get(square) {
            Some(Piece {
                color: c,
                kind: PieceKind::King,
            }) if c == color => Ok(square),
            _ => Err(ChessEngineError::InternalInvariant {
                message: format!("cached king square {square} of {color} holds no such king"),
            }),
        }
    }
}
