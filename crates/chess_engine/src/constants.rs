//! Movement tables and scan limits
//!
//! Offsets are `(d_row, d_col)` pairs. Their order is the order in which moves
//! are generated, which keeps generation deterministic for a fixed board.

/// Knight jumps
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps, top row first
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Rook rays: N, S, W, E
pub const STRAIGHT_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Bishop rays: NW, NE, SW, SE
pub const DIAGONAL_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Upper bound on squares visited by the pin scan
///
/// A ray crosses at most seven squares of an 8×8 board.
pub const PIN_SCAN_LIMIT: usize = 10;

/// Upper bound on moves traversed in a single enumeration
///
/// No position comes close to this many pseudo-legal moves for one side.
pub const MOVE_SCAN_LIMIT: usize = 1000;
