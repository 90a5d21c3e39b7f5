//! Board grid and helper functions
//!
//! Provides the 8×8 cell grid used by every snapshot:
//! - Cell queries with bounds tolerance (off-board reads are empty)
//! - Scan-order iteration over occupied cells
//! - The standard starting position
//! - [`BoardEdit`], a scoped mutation that restores every touched cell on drop

use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Tag character of an empty cell on the wire
pub const EMPTY_TAG: char = ' ';

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 8×8 grid of cells, indexed `[row][col]`
///
/// Serialized as eight strings of eight tags, e.g. `"RKBQXBKR"`, with a space for
/// an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board([[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize]);

impl Board {
    pub const fn empty() -> Self {
        Board([[None; BOARD_SIZE as usize]; BOARD_SIZE as usize])
    }

    /// Parse a board from eight rows of tags, row 0 first
    pub fn from_rows(rows: [&str; 8]) -> Result<Self, String> {
        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let tags: Vec<char> = line.chars().collect();
            if tags.len() != BOARD_SIZE as usize {
                return Err(format!("row {row} has {} cells, expected 8", tags.len()));
            }
            for (col, tag) in tags.into_iter().enumerate() {
                if tag == EMPTY_TAG {
                    continue;
                }
                let piece =
                    Piece::from_tag(tag).ok_or_else(|| format!("unknown piece tag {tag:?}"))?;
                board.0[row][col] = Some(piece);
            }
        }
        Ok(board)
    }

    /// Cell at `square`; squares off the board read as empty
    #[inline]
    pub fn get(&self, square: Square) -> Cell {
        if square.in_bounds() {
            self.0[square.row as usize][square.col as usize]
        } else {
            None
        }
    }

    /// Overwrite the cell at `square`
    ///
    /// # Panics
    ///
    /// Panics if `square` is off the board.
    #[inline]
    pub fn set(&mut self, square: Square, cell: Cell) {
        self.0[square.row as usize][square.col as usize] = cell;
    }

    pub fn is_empty_at(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Occupied cells in scan order (row by row, then column by column)
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Square::new(row as i8, col as i8), piece))
            })
        })
    }

    /// Square of `color`'s only king
    pub fn single_king(&self, color: Color) -> ChessEngineResult<Square> {
        let mut kings = self
            .occupied()
            .filter(|(_, piece)| piece.color == color && piece.kind == PieceKind::King)
            .map(|(square, _)| square);
        match (kings.next(), kings.next()) {
            (Some(square), None) => Ok(square),
            (None, _) => Err(ChessEngineError::InternalInvariant {
                message: format!("no {color} king on the board"),
            }),
            (Some(_), Some(_)) => Err(ChessEngineError::InternalInvariant {
                message: format!("more than one {color} king on the board"),
            }),
        }
    }

    /// Rows rendered as tag strings
    pub fn rows(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| cell.map_or(EMPTY_TAG, Piece::tag))
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = String;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        let rows: [&str; 8] = rows
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|rows: Vec<&str>| format!("board has {} rows, expected 8", rows.len()))?;
        Board::from_rows(rows)
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board.rows()
    }
}

/// Initialize a board to the standard starting position
pub fn init_board() -> Board {
    let mut board = Board::empty();
    for (col, kind) in BACK_RANK.into_iter().enumerate() {
        let col = col as i8;
        board.set(Square::new(0, col), Some(Piece::new(Color::Black, kind)));
        board.set(
            Square::new(1, col),
            Some(Piece::new(Color::Black, PieceKind::Pawn)),
        );
        board.set(
            Square::new(6, col),
            Some(Piece::new(Color::White, PieceKind::Pawn)),
        );
        board.set(Square::new(7, col), Some(Piece::new(Color::White, kind)));
    }
    board
}

/// Temporary edits to a snapshot's board
///
/// Every cell changed through the edit is written back, in reverse order, when
/// the edit is dropped. That includes early returns through `?` and unwinding,
/// so probes built on it never leave a snapshot altered.
pub(crate) struct BoardEdit<'a> {
    state: &'a mut BoardState,
    saved: Vec<(Square, Cell)>,
}

impl<'a> BoardEdit<'a> {
    pub(crate) fn new(state: &'a mut BoardState) -> Self {
        BoardEdit {
            state,
            saved: Vec::with_capacity(2),
        }
    }

    pub(crate) fn place(&mut self, square: Square, cell: Cell) {
        self.saved.push((square, self.state.board.get(square)));
        self.state.board.set(square, cell);
    }

    /// Lift the occupant of `from` onto `to`, leaving `from` empty
    pub(crate) fn shift(&mut self, from: Square, to: Square) {
        let mover = self.state.board.get(from);
        self.place(from, None);
        self.place(to, mover);
    }
}

impl Deref for BoardEdit<'_> {
    type Target = BoardState;

    fn deref(&self) -> &BoardState {
        self.state
    }
}

impl DerefMut for BoardEdit<'_> {
    fn deref_mut(&mut self) -> &mut BoardState {
        self.state
    }
}

impl Drop for BoardEdit<'_> {
    fn drop(&mut self) {
        while let Some((square, cell)) = self.saved.pop() {
            self.state.board.set(square, cell);
        }
    }
}
