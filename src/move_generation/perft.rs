//! Perft node counting for validating the move generators.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::move_generator::MoveGenerator;

pub fn perft<G: MoveGenerator>(generator: &G, game_state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generator.generate_moves(game_state);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|description| perft(generator, &apply_move(game_state, description), depth - 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::perft;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::move_generator::LegalMoveGenerator;

    fn assert_counts(fen: &str, expected: &[u64]) {
        let game = GameState::from_fen(fen).expect("perft FEN should parse");
        for (depth, nodes) in expected.iter().enumerate() {
            assert_eq!(
                perft(&LegalMoveGenerator, &game, depth as u8 + 1),
                *nodes,
                "{fen} depth {}",
                depth + 1
            );
        }
    }

    #[test]
    fn perft_startpos() {
        assert_counts(
            crate::game_state::chess_rules::STARTING_POSITION_FEN,
            &[20, 400, 8902],
        );
    }

    #[test]
    fn perft_kiwipete() {
        assert_counts(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            &[48, 2039],
        );
    }

    #[test]
    fn perft_rook_endgame_with_en_passant_pins() {
        assert_counts("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", &[14, 191, 2812]);
    }
}
