//! Game state queries and random move choice

use super::filter_invalid_moves;
use crate::error::ChessEngineResult;
use crate::move_gen::{all_possible_moves, generate_moves_for_piece};
use crate::types::*;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Legal moves of the piece on `square`, in generation order
pub fn legal_moves_for_piece(square: Square, state: &BoardState) -> ChessEngineResult<Moves> {
    filter_invalid_moves(&generate_moves_for_piece(square, state), state)
}

/// Pick one of `color`'s legal moves uniformly at random
///
/// Returns `None` when `color` has no legal move.
///
/// # Examples
///
/// ```rust,ignore
/// let mut rng = rand::rng();
/// let mv = random_legal_move(Color::White, &state, &mut rng)?;
/// ```
pub fn random_legal_move<R: Rng + ?Sized>(
    color: Color,
    state: &BoardState,
    rng: &mut R,
) -> ChessEngineResult<Option<Move>> {
    let legal = filter_invalid_moves(&all_possible_moves(color, state, &[]), state)?;
    Ok(legal.choose(rng).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{initialize_board, make_move, validate_move};
    use crate::board::Board;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_legal_moves_for_knight() {
        let state = initialize_board();
        let moves = legal_moves_for_piece(Square::new(7, 1), &state).unwrap();
        let targets: Vec<Square> = moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![Square::new(5, 0), Square::new(5, 2)]);
    }

    #[test]
    fn test_random_move_is_legal() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = initialize_board().with_turn(Turn::White);
        for _ in 0..40 {
            let Some(color) = state.turn_color.color() else {
                break;
            };
            let mv = random_legal_move(color, &state, &mut rng)
                .unwrap()
                .expect("a side to move has a legal move");
            assert_eq!(validate_move(&mv, &state), Ok(()));
            state = make_move(&mv, &state, true);
        }
    }

    #[test]
    fn test_random_move_none_when_stalemated() {
        let board = Board::from_rows([
            " X      ", "        ", "q   x   ", "        ", "        ", "  r     ", "        ",
            "        ",
        ])
        .unwrap();
        let state = BoardState::from_board(board).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_legal_move(Color::Black, &state, &mut rng), Ok(None));
        assert!(random_legal_move(Color::White, &state, &mut rng)
            .unwrap()
            .is_some());
    }
}
