//! Search-driven player.
//!
//! Keeps a belief board: its own pieces exactly, enemy pieces where they
//! were last seen. Senses refresh the belief, capture notices clear lost
//! pieces, and each taken move is replayed onto it. Moves are chosen by
//! running the tree search from the belief board, restricted to the moves
//! the referee offered.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, castle_rook_squares, update_castling_rights};
use crate::move_generation::move_generator::{find_pseudo_legal, LegalMoveGenerator, MoveGenerator};
use crate::players::player_trait::Player;
use crate::players::time_management::{search_budget, TimeManagementStrategy};
use crate::recon::move_revision::{is_castling, is_kingside_castling};
use crate::recon::sense::{sense_squares, Observation};
use crate::search::mcts_config::MctsConfig;
use crate::search::mcts_search::Mcts;

pub struct MctsPlayer {
    color: Color,
    belief: GameState,
    config: MctsConfig,
    strategy: TimeManagementStrategy,
    rng: StdRng,
    searches: u64,
}

impl MctsPlayer {
    pub fn new(config: MctsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            color: Color::White,
            belief: GameState::new_game(),
            config,
            strategy: TimeManagementStrategy::default(),
            rng,
            searches: 0,
        }
    }

    pub fn with_strategy(mut self, strategy: TimeManagementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn belief(&self) -> &GameState {
        &self.belief
    }

    fn search_config(&mut self, seconds_left: f64) -> MctsConfig {
        let mut config = self.config.clone();
        config.time_limit = search_budget(seconds_left, self.belief.ply, self.config.time_limit, self.strategy);
        config.seed = self.config.seed.map(|seed| seed.wrapping_add(self.searches));
        self.searches += 1;
        config
    }

    fn random_candidate(&mut self, move_actions: &[Move]) -> Option<Move> {
        move_actions.choose(&mut self.rng).copied()
    }

    /// Replay one of our own taken moves onto the belief board.
    fn replay_taken_move(&mut self, mv: Move, capture_square: Option<Square>) {
        let mut board = self.belief.clone();
        board.side_to_move = self.color;

        if let Some(description) = find_pseudo_legal(&board, mv) {
            board = apply_move(&board, &description);
        } else {
            // The belief disagrees with the truth; trust the referee.
            let Some(piece) = board.piece_at(mv.from) else {
                return;
            };
            let mut to = mv.to;
            if is_castling(&board, mv) {
                let kingside = is_kingside_castling(&board, mv);
                let (rook_from, rook_to) = castle_rook_squares(self.color, kingside);
                to = if kingside { rook_to + 1 } else { rook_to - 1 };
                board.set_piece_at(rook_from, None);
                board.set_piece_at(rook_to, Some(Piece::new(PieceKind::Rook, self.color)));
            }
            board.set_piece_at(mv.from, None);
            let placed = mv.promotion.map_or(piece, |kind| Piece::new(kind, self.color));
            board.set_piece_at(to, Some(placed));
            update_castling_rights(&mut board, self.color, mv.from, to, piece.kind);
            board.side_to_move = self.color.opposite();
            board.en_passant_square = None;
        }

        // En passant empties a square other than the destination.
        if let Some(square) = capture_square.filter(|&square| square != mv.to) {
            board.set_piece_at(square, None);
        }
        self.belief = board;
    }
}

impl Player for MctsPlayer {
    fn name(&self) -> &str {
        "MCTS"
    }

    fn handle_game_start(&mut self, color: Color, board: &GameState) {
        self.color = color;
        self.belief = board.clone();
        self.searches = 0;
        debug!(color = %color, "mcts player ready");
    }

    fn handle_opponent_move_result(&mut self, captured_my_piece: bool, capture_square: Option<Square>) {
        if captured_my_piece {
            if let Some(square) = capture_square {
                self.belief.set_piece_at(square, None);
            }
        }
        self.belief.side_to_move = self.color;
        self.belief.en_passant_square = None;
    }

    /// Interior square whose window holds the fewest of our own pieces.
    fn choose_sense(&mut self, sense_actions: &[Square], _move_actions: &[Move], _seconds_left: f64) -> Square {
        let own = self.belief.occupancy_by_color[self.color.index()];
        let interior: Vec<Square> = sense_actions
            .iter()
            .copied()
            .filter(|&sq| (1..7).contains(&(sq % 8)) && (1..7).contains(&(sq / 8)))
            .collect();
        let pool = if interior.is_empty() { sense_actions } else { &interior[..] };

        let unknown = |sq: Square| {
            sense_squares(sq)
                .into_iter()
                .filter(|&s| own & (1u64 << s) == 0)
                .count()
        };
        let Some(best) = pool.iter().map(|&sq| unknown(sq)).max() else {
            return 0;
        };
        let ties: Vec<Square> = pool.iter().copied().filter(|&sq| unknown(sq) == best).collect();
        ties.choose(&mut self.rng).copied().unwrap_or(0)
    }

    fn handle_sense_result(&mut self, observations: &[Observation]) {
        for &(square, piece) in observations {
            // Own pieces are always known exactly.
            if piece.map_or(true, |p| p.color != self.color) {
                self.belief.set_piece_at(square, piece);
            }
        }
    }

    fn choose_move(&mut self, move_actions: &[Move], seconds_left: f64) -> Option<Move> {
        if move_actions.is_empty() {
            return None;
        }

        let mut root = self.belief.clone();
        root.side_to_move = self.color;
        let root_actions: Vec<Move> = LegalMoveGenerator
            .generate_bare_moves(&root)
            .into_iter()
            .filter(|mv| move_actions.contains(mv))
            .collect();
        let root_actions = if root_actions.is_empty() {
            move_actions.to_vec()
        } else {
            root_actions
        };

        let config = self.search_config(seconds_left);
        let mut mcts = Mcts::new(root, self.color, config).with_root_actions(root_actions);
        match mcts.search() {
            Ok(stats) => debug!(iterations = stats.iterations, nodes = stats.nodes, "mcts move search"),
            Err(err) => {
                warn!(error = %err, "search failed, falling back to a random move");
                return self.random_candidate(move_actions);
            }
        }

        match mcts.pick_move() {
            Some(mv) if move_actions.contains(&mv) => Some(mv),
            _ => self.random_candidate(move_actions),
        }
    }

    fn handle_move_result(
        &mut self,
        _requested: Option<Move>,
        taken: Option<Move>,
        _reason: &str,
        _captured_opponent_piece: bool,
        capture_square: Option<Square>,
    ) {
        if let Some(mv) = taken {
            self.replay_taken_move(mv, capture_square);
        }
        self.belief.side_to_move = self.color.opposite();
    }

    fn handle_game_end(&mut self, winner: Option<Color>, reason: &str) {
        let result = match winner {
            Some(color) if color == self.color => "won",
            Some(_) => "lost",
            None => "drew",
        };
        info!(color = %self.color, result, reason, "mcts player finished");
    }
}

#[cfg(test)]
mod tests {
    use super::MctsPlayer;
    use crate::game_state::chess_types::{Color, Move, Piece, PieceKind};
    use crate::game_state::game_state::GameState;
    use crate::players::player_trait::Player;
    use crate::recon::sense::all_squares;
    use crate::search::mcts_config::MctsConfig;

    fn player(color: Color) -> MctsPlayer {
        let mut player = MctsPlayer::new(MctsConfig::deterministic(30, 5));
        player.handle_game_start(color, &GameState::new_game());
        player
    }

    #[test]
    fn senses_away_from_the_edge() {
        let mut player = player(Color::White);
        for _ in 0..10 {
            let square = player.choose_sense(&all_squares(), &[], 100.0);
            assert!((1..7).contains(&(square % 8)));
            assert!((1..7).contains(&(square / 8)));
            // Windows over rank 2 contain own pawns; the best windows do not.
            assert!(square / 8 >= 2);
        }
    }

    #[test]
    fn sense_results_update_the_belief() {
        let mut player = player(Color::White);
        player.handle_sense_result(&[(52, None), (36, Some(Piece::new(PieceKind::Pawn, Color::Black)))]);
        assert_eq!(player.belief().piece_at(52), None);
        assert_eq!(player.belief().piece_at(36), Some(Piece::new(PieceKind::Pawn, Color::Black)));
    }

    #[test]
    fn lost_pieces_leave_the_belief() {
        let mut player = player(Color::Black);
        player.handle_opponent_move_result(true, Some(52));
        assert_eq!(player.belief().piece_at(52), None);
        assert_eq!(player.belief().side_to_move, Color::Black);
    }

    #[test]
    fn taken_moves_are_replayed() {
        let mut player = player(Color::White);
        let mv = Move::new(12, 28);
        player.handle_move_result(Some(mv), Some(mv), "", false, None);
        assert_eq!(player.belief().piece_at(12), None);
        assert_eq!(player.belief().piece_at(28), Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(player.belief().side_to_move, Color::Black);
    }

    #[test]
    fn replay_trusts_the_referee_over_the_belief() {
        let mut player = player(Color::White);
        // The belief still holds a black pawn on d7, the referee says the rook path was clear.
        let mut board = GameState::from_fen("4k3/3p4/8/8/8/8/8/3RK3 w - - 0 1").expect("FEN should parse");
        board.side_to_move = Color::White;
        player.handle_game_start(Color::White, &board);
        player.handle_move_result(Some(Move::new(3, 59)), Some(Move::new(3, 59)), "", false, None);
        assert_eq!(player.belief().piece_at(59), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert_eq!(player.belief().piece_at(3), None);
    }

    #[test]
    fn replayed_castle_moves_the_rook_too() {
        let mut player = player(Color::White);
        // A knight was last seen on f1, so the belief cannot castle on its own.
        let board = GameState::from_fen("4k3/8/8/8/8/8/8/4Kn1R w K - 0 1").expect("FEN should parse");
        player.handle_game_start(Color::White, &board);
        let castle = Move::new(4, 6);
        player.handle_move_result(Some(castle), Some(castle), "", false, None);

        let belief = player.belief();
        assert_eq!(belief.piece_at(6), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(belief.piece_at(5), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert_eq!(belief.piece_at(7), None);
        assert_eq!(belief.piece_at(4), None);
        assert_eq!(belief.castling_rights, 0);
    }

    #[test]
    fn replayed_rook_move_drops_its_castling_right() {
        let mut player = player(Color::White);
        let board = GameState::from_fen("4k3/8/8/8/8/8/p7/R3K3 w Q - 0 1").expect("FEN should parse");
        player.handle_game_start(Color::White, &board);
        // The belief has a pawn on a2 the referee already knows is gone.
        let lift = Move::new(0, 16);
        player.handle_move_result(Some(lift), Some(lift), "", false, None);

        assert_eq!(player.belief().piece_at(16), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert_eq!(player.belief().castling_rights, 0);
    }

    #[test]
    fn chosen_move_is_always_a_candidate() {
        let mut player = player(Color::White);
        let candidates = vec![Move::new(12, 28), Move::new(6, 21), Move::new(8, 17)];
        let mv = player.choose_move(&candidates, 30.0).expect("candidates were offered");
        assert!(candidates.contains(&mv));
        assert_eq!(player.choose_move(&[], 30.0), None);
    }

    #[test]
    fn unsearchable_candidates_fall_back_to_random() {
        let mut player = player(Color::White);
        // Neither move is pseudo-legal on the belief board.
        let candidates = vec![Move::new(8, 17), Move::new(9, 16)];
        let mv = player.choose_move(&candidates, 30.0).expect("candidates were offered");
        assert!(candidates.contains(&mv));
    }
}
