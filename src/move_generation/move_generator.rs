//! Move generator abstraction.
//!
//! `PseudoLegalMoveGenerator` is what the game engine and the search use:
//! reconnaissance chess has no check rule, so a king may walk into capture.
//! `LegalMoveGenerator` adds the self-check filter for orthodox queries such
//! as checkmate detection and perft.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::move_generation::pseudo_legal_moves::generate_pseudo_legal_moves;
use crate::moves::move_descriptions::MoveDescription;

pub trait MoveGenerator: Send + Sync {
    fn generate_moves(&self, game_state: &GameState) -> Vec<MoveDescription>;

    /// Bare moves, in generation order.
    fn generate_bare_moves(&self, game_state: &GameState) -> Vec<Move> {
        self.generate_moves(game_state).into_iter().map(|d| d.mv).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoLegalMoveGenerator;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for PseudoLegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState) -> Vec<MoveDescription> {
        let mut out = Vec::with_capacity(64);
        generate_pseudo_legal_moves(game_state, &mut out);
        out
    }
}

impl MoveGenerator for LegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState) -> Vec<MoveDescription> {
        let side = game_state.side_to_move;
        let enemy = side.opposite();

        PseudoLegalMoveGenerator
            .generate_moves(game_state)
            .into_iter()
            .filter(|description| {
                if description.is_castling() {
                    let transit = (description.from() + description.to()) / 2;
                    if is_square_attacked(game_state, description.from(), enemy)
                        || is_square_attacked(game_state, transit, enemy)
                    {
                        return false;
                    }
                }
                !is_king_in_check(&apply_move(game_state, description), side)
            })
            .collect()
    }
}

/// The pseudo-legal description matching `mv` exactly (promotion included).
pub fn find_pseudo_legal(game_state: &GameState, mv: Move) -> Option<MoveDescription> {
    PseudoLegalMoveGenerator
        .generate_moves(game_state)
        .into_iter()
        .find(|description| description.mv == mv)
}

#[cfg(test)]
mod tests {
    use super::{find_pseudo_legal, LegalMoveGenerator, MoveGenerator, PseudoLegalMoveGenerator};
    use crate::game_state::chess_types::Move;
    use crate::game_state::game_state::GameState;

    #[test]
    fn legal_generator_drops_castling_through_attack() {
        let game = GameState::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
        let pseudo = PseudoLegalMoveGenerator.generate_bare_moves(&game);
        let legal = LegalMoveGenerator.generate_bare_moves(&game);
        assert!(pseudo.contains(&Move::new(4, 6)));
        assert!(!legal.contains(&Move::new(4, 6)));
    }

    #[test]
    fn legal_generator_matches_startpos_count() {
        let game = GameState::new_game();
        assert_eq!(LegalMoveGenerator.generate_moves(&game).len(), 20);
    }

    #[test]
    fn find_respects_promotion_piece() {
        let game = GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        assert!(find_pseudo_legal(&game, Move::new(48, 56)).is_none());
        assert!(find_pseudo_legal(
            &game,
            Move::with_promotion(48, 56, crate::game_state::chess_types::PieceKind::Rook)
        )
        .is_some());
    }
}
