//! Resolving requested moves against the true position.
//!
//! A player chooses from the speculative move set, which is built without
//! knowledge of enemy pieces. The referee then revises the request against
//! the truth board: slides stop at the first blocker, castles through
//! occupied squares fail, and anything else that cannot be played becomes a
//! pass.

use crate::game_state::chess_rules::{BACK_RANKS, PROMOTION_KINDS};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::en_passant_victim_square;
use crate::move_generation::move_generator::{find_pseudo_legal, MoveGenerator, PseudoLegalMoveGenerator};
use crate::moves::attacks::{between, pawn_attacks, square_distance, squares_of};
use crate::moves::move_descriptions::MoveDescription;

/// How the truth board answered a requested move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    /// The request, or the truncated slide, is playable as described.
    Taken(MoveDescription),
    /// A castle whose right is gone or whose path is occupied.
    IllegalCastle,
    /// Nothing along the requested path can be played.
    Blocked,
}

/// Every move `mover` may request: pseudo-legal moves on the truth board
/// with the opponent's pieces removed, plus pawn diagonal moves onto any
/// attacked square not held by one of `mover`'s own pieces. The list holds
/// no duplicates.
pub fn speculative_moves(truth: &GameState, mover: Color) -> Vec<Move> {
    let mut without_opponent = truth.without_pieces_of(mover.opposite());
    without_opponent.side_to_move = mover;

    let mut out = PseudoLegalMoveGenerator.generate_bare_moves(&without_opponent);
    for mv in pawn_capture_moves(&without_opponent, mover) {
        if !out.contains(&mv) {
            out.push(mv);
        }
    }
    out
}

/// Pawn diagonals onto squares not held by `mover`, with every promotion
/// variant alongside the bare move on the back rank.
pub fn pawn_capture_moves(board: &GameState, mover: Color) -> Vec<Move> {
    let own = board.occupancy_by_color[mover.index()];
    let mut out = Vec::new();

    for from in squares_of(board.pieces_of(PieceKind::Pawn, mover)) {
        for to in squares_of(pawn_attacks(mover, from) & !own) {
            out.push(Move::new(from, to));
            if BACK_RANKS & (1u64 << to) != 0 {
                for kind in PROMOTION_KINDS {
                    out.push(Move::with_promotion(from, to, kind));
                }
            }
        }
    }
    out
}

/// Fill in a queen promotion when a pawn move reaches the back rank bare.
pub fn add_pawn_queen_promotion(board: &GameState, mv: Move) -> Move {
    let reaches_back_rank = BACK_RANKS & (1u64 << mv.to) != 0;
    let is_pawn = matches!(board.piece_at(mv.from), Some(piece) if piece.kind == PieceKind::Pawn);
    if is_pawn && reaches_back_rank && mv.promotion.is_none() {
        Move::with_promotion(mv.from, mv.to, PieceKind::Queen)
    } else {
        mv
    }
}

/// A king move of more than one file, or a king landing on its own rook.
pub fn is_castling(board: &GameState, mv: Move) -> bool {
    let mover = board.side_to_move;
    let Some(piece) = board.piece_at(mv.from) else {
        return false;
    };
    if piece.kind != PieceKind::King || piece.color != mover {
        return false;
    }

    let file_diff = (mv.from % 8).abs_diff(mv.to % 8);
    let onto_own_rook = board.pieces_of(PieceKind::Rook, mover) & (1u64 << mv.to) != 0;
    file_diff > 1 || onto_own_rook
}

pub fn is_kingside_castling(board: &GameState, mv: Move) -> bool {
    is_castling(board, mv) && mv.to % 8 > mv.from % 8
}

/// A castle without the matching right, or with pieces between king and rook.
pub fn is_illegal_castle(board: &GameState, mv: Move) -> bool {
    if !is_castling(board, mv) {
        return false;
    }

    let kingside = is_kingside_castling(board, mv);
    let right = match (board.side_to_move, kingside) {
        (Color::White, true) => CASTLE_WHITE_KINGSIDE,
        (Color::White, false) => CASTLE_WHITE_QUEENSIDE,
        (Color::Black, true) => CASTLE_BLACK_KINGSIDE,
        (Color::Black, false) => CASTLE_BLACK_QUEENSIDE,
    };
    if board.castling_rights & right == 0 {
        return true;
    }

    let rook_square = (mv.from / 8) * 8 + if kingside { 7 } else { 0 };
    between(mv.from, rook_square) & board.occupancy_all != 0
}

/// Longest truncation of a sliding move that is pseudo-legal on `board`.
///
/// Candidates are the squares strictly between origin and destination plus
/// the destination itself, tried farthest first. Promotion is carried over
/// unchanged.
pub fn slide_move(board: &GameState, mv: Move) -> Option<MoveDescription> {
    let piece = board.piece_at(mv.from)?;
    if !piece.kind.is_sliding() {
        return None;
    }

    let legal = PseudoLegalMoveGenerator.generate_moves(board);
    let mut squares: Vec<Square> = squares_of(between(mv.from, mv.to) | (1u64 << mv.to)).collect();
    squares.sort_by_key(|&sq| std::cmp::Reverse(square_distance(sq, mv.from)));

    squares.into_iter().find_map(|sq| {
        let candidate = Move {
            from: mv.from,
            to: sq,
            promotion: mv.promotion,
        };
        legal.iter().copied().find(|description| description.mv == candidate)
    })
}

/// Revise `mv` against `truth`. `mv` should already carry its default
/// promotion (see [`add_pawn_queen_promotion`]).
pub fn revise_move(truth: &GameState, mv: Move) -> Revision {
    if let Some(description) = find_pseudo_legal(truth, mv) {
        return Revision::Taken(description);
    }
    if is_illegal_castle(truth, mv) {
        return Revision::IllegalCastle;
    }
    match slide_move(truth, mv) {
        Some(description) => Revision::Taken(description),
        None => Revision::Blocked,
    }
}

/// Square emptied by a capture, the en-passant victim included.
pub fn capture_square_of_move(mover: Color, description: &MoveDescription) -> Option<Square> {
    if !description.is_capture() {
        return None;
    }
    if description.is_en_passant() {
        Some(en_passant_victim_square(mover, description.to()))
    } else {
        Some(description.to())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::move_generator::PseudoLegalMoveGenerator;

    fn board(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn speculative_moves_cover_pseudo_legal_moves() {
        let truth = GameState::new_game();
        let speculative = speculative_moves(&truth, Color::White);
        for mv in PseudoLegalMoveGenerator.generate_bare_moves(&truth) {
            assert!(speculative.contains(&mv), "{mv} missing");
        }
        // a2 may request a capture on b3 even though nothing is there.
        assert!(speculative.contains(&Move::new(8, 17)));
    }

    #[test]
    fn speculative_moves_ignore_enemy_blockers() {
        let truth = board("4k3/8/8/8/4K3/8/8/R5n1 w - - 0 1");
        let speculative = speculative_moves(&truth, Color::White);
        // Black's knight on g1 is invisible; a1-h1 is still on offer.
        assert!(speculative.contains(&Move::new(0, 7)));
        let unique: std::collections::HashSet<_> = speculative.iter().collect();
        assert_eq!(unique.len(), speculative.len());
    }

    #[test]
    fn speculative_moves_offer_diagonal_promotions() {
        let truth = board("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let speculative = speculative_moves(&truth, Color::White);
        assert!(speculative.contains(&Move::new(49, 56)));
        for kind in PROMOTION_KINDS {
            assert!(speculative.contains(&Move::with_promotion(49, 56, kind)));
            assert!(speculative.contains(&Move::with_promotion(49, 58, kind)));
        }
    }

    #[test]
    fn slide_stops_on_first_blocker() {
        let truth = board("4k3/8/8/8/8/8/8/R3K1n1 w - - 0 1");
        // a1-h1 is blocked by the own king on e1, so the rook stops on d1.
        match revise_move(&truth, Move::new(0, 7)) {
            Revision::Taken(description) => assert_eq!(description.mv, Move::new(0, 3)),
            other => panic!("expected a truncated slide, got {other:?}"),
        }

        let truth = board("4k3/8/8/8/8/8/8/R5nK w - - 0 1");
        // With the path open up to g1 the rook captures there.
        match revise_move(&truth, Move::new(0, 7)) {
            Revision::Taken(description) => {
                assert_eq!(description.mv, Move::new(0, 6));
                assert!(description.is_capture());
            }
            other => panic!("expected a capture on g1, got {other:?}"),
        }
    }

    #[test]
    fn open_slide_is_taken_unchanged() {
        let truth = board("4k3/8/8/8/8/8/8/R6K w - - 0 1");
        assert_eq!(
            revise_move(&truth, Move::new(0, 6)),
            Revision::Taken(find_pseudo_legal(&truth, Move::new(0, 6)).expect("a1g1 is open"))
        );
    }

    #[test]
    fn blocked_castle_is_illegal() {
        let truth = board("4k3/8/8/8/8/8/8/4K1nR w K - 0 1");
        assert!(is_castling(&truth, Move::new(4, 6)));
        assert!(is_kingside_castling(&truth, Move::new(4, 6)));
        assert!(is_illegal_castle(&truth, Move::new(4, 6)));
        assert_eq!(revise_move(&truth, Move::new(4, 6)), Revision::IllegalCastle);
    }

    #[test]
    fn castle_without_right_is_illegal() {
        let truth = board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert!(is_illegal_castle(&truth, Move::new(4, 2)));
    }

    #[test]
    fn pawn_push_into_piece_is_blocked() {
        let truth = board("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert_eq!(revise_move(&truth, Move::new(12, 20)), Revision::Blocked);
        // The double push stops nowhere either: e3 is occupied.
        assert_eq!(revise_move(&truth, Move::new(12, 28)), Revision::Blocked);
    }

    #[test]
    fn empty_diagonal_is_blocked() {
        let truth = GameState::new_game();
        assert_eq!(revise_move(&truth, Move::new(8, 17)), Revision::Blocked);
    }

    #[test]
    fn knight_moves_never_slide() {
        let truth = board("4k3/8/8/8/8/8/3N4/4K3 w - - 0 1");
        assert_eq!(slide_move(&truth, Move::new(11, 4)), None);
    }

    #[test]
    fn queen_promotion_is_filled_in() {
        let truth = board("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            add_pawn_queen_promotion(&truth, Move::new(48, 56)),
            Move::with_promotion(48, 56, PieceKind::Queen)
        );
        assert_eq!(
            add_pawn_queen_promotion(&truth, Move::with_promotion(48, 56, PieceKind::Knight)),
            Move::with_promotion(48, 56, PieceKind::Knight)
        );
        assert_eq!(add_pawn_queen_promotion(&truth, Move::new(4, 5)), Move::new(4, 5));
    }

    #[test]
    fn en_passant_captures_behind_the_destination() {
        let truth = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let description = find_pseudo_legal(&truth, Move::new(36, 43)).expect("exd6 is playable");
        assert_eq!(capture_square_of_move(Color::White, &description), Some(35));
    }
}
