//! Game lifecycle
//!
//! Creation of the first snapshot of a game.

use crate::board::init_board;
use crate::types::*;

/// Snapshot of the standard starting position
///
/// Nobody is to move yet: the session sets White's turn once both seats are
/// taken.
pub fn initialize_board() -> BoardState {
    BoardState {
        board: init_board(),
        last_move: String::new(),
        white_king_pos: Square::new(7, 4),
        black_king_pos: Square::new(0, 4),
        white_king_moved: false,
        black_king_moved: false,
        winner: Winner::None,
        turn_color: Turn::Nobody,
        en_passant: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_snapshot() {
        let state = initialize_board();
        assert_eq!(state.turn_color, Turn::Nobody);
        assert_eq!(state.winner, Winner::None);
        assert_eq!(state.en_passant, None);
        assert!(state.last_move.is_empty());
        assert_eq!(state.verified_king_pos(Color::White), Ok(Square::new(7, 4)));
        assert_eq!(state.verified_king_pos(Color::Black), Ok(Square::new(0, 4)));
        assert_eq!(BoardState::from_board(state.board), Ok(state));
    }

    #[test]
    fn test_initial_snapshot_wire_format() {
        let json = serde_json::to_value(initialize_board()).unwrap();
        assert_eq!(json["board"][0], "RKBQXBKR");
        assert_eq!(json["board"][7], "rkbqxbkr");
        assert_eq!(json["lastmove"], "");
        assert_eq!(json["whitekingpos"], serde_json::json!([7, 4]));
        assert_eq!(json["blackkingpos"], serde_json::json!([0, 4]));
        assert_eq!(json["whitekingmoved"], false);
        assert_eq!(json["winner"], "n");
        assert_eq!(json["turncolor"], "n");
        assert!(json["enpassant"].is_null());
    }
}
