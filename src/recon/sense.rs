//! The 3x3 sense window.
//!
//! A sense centered on a square reveals that square and its up-to-eight
//! neighbors. The window is clipped at the board edges, never wrapped, so a
//! corner sense sees 4 squares and an edge sense sees 6.

use crate::game_state::chess_types::{Piece, Square};
use crate::game_state::game_state::GameState;

/// One observed square and what stands on it.
pub type Observation = (Square, Option<Piece>);

/// Every square on the board, the default candidate list for `choose_sense`.
pub fn all_squares() -> Vec<Square> {
    (0..64).collect()
}

/// Squares covered by a sense at `center`, top rank first, files left to right.
/// Out-of-range centers cover nothing.
pub fn sense_squares(center: Square) -> Vec<Square> {
    if center > 63 {
        return Vec::new();
    }

    let rank = (center / 8) as i8;
    let file = (center % 8) as i8;
    let mut out = Vec::with_capacity(9);
    for delta_rank in [1i8, 0, -1] {
        for delta_file in [-1i8, 0, 1] {
            let (r, f) = (rank + delta_rank, file + delta_file);
            if (0..8).contains(&r) && (0..8).contains(&f) {
                out.push((r * 8 + f) as Square);
            }
        }
    }
    out
}

/// Read the sense window off `board`.
pub fn observe(board: &GameState, center: Square) -> Vec<Observation> {
    sense_squares(center)
        .into_iter()
        .map(|square| (square, board.piece_at(square)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{observe, sense_squares};
    use crate::game_state::chess_types::{Color, Piece, PieceKind};
    use crate::game_state::game_state::GameState;

    #[test]
    fn window_is_clipped_at_edges() {
        assert_eq!(sense_squares(0).len(), 4);
        assert_eq!(sense_squares(63).len(), 4);
        assert_eq!(sense_squares(3).len(), 6);
        assert_eq!(sense_squares(24).len(), 6);
        assert_eq!(sense_squares(27).len(), 9);
        assert!(sense_squares(64).is_empty());
    }

    #[test]
    fn corner_window_does_not_wrap() {
        // h1 must not reach a2 / a1.
        assert_eq!(sense_squares(7), vec![14, 15, 6, 7]);
    }

    #[test]
    fn observe_reads_true_pieces() {
        let game = GameState::new_game();
        let seen = observe(&game, 52);
        assert_eq!(seen.len(), 9);
        assert_eq!(seen[0], (59, Some(Piece::new(PieceKind::Queen, Color::Black))));
        assert_eq!(seen[4], (52, Some(Piece::new(PieceKind::Pawn, Color::Black))));
        assert_eq!(seen[8], (45, None));
    }
}
