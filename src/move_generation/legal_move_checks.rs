use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::{LegalMoveGenerator, MoveGenerator};
use crate::moves::attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces_of(PieceKind::King, color);
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let occ = game_state.occupancy_all;
    let attacker = |kind: PieceKind| game_state.pieces_of(kind, attacker_color);

    // A pawn of `attacker_color` hits `square` iff a defender pawn there would hit it back.
    if pawn_attacks(attacker_color.opposite(), square) & attacker(PieceKind::Pawn) != 0 {
        return true;
    }
    if knight_attacks(square) & attacker(PieceKind::Knight) != 0 {
        return true;
    }
    if king_attacks(square) & attacker(PieceKind::King) != 0 {
        return true;
    }

    let diagonal = attacker(PieceKind::Bishop) | attacker(PieceKind::Queen);
    if bishop_attacks(square, occ) & diagonal != 0 {
        return true;
    }

    let straight = attacker(PieceKind::Rook) | attacker(PieceKind::Queen);
    rook_attacks(square, occ) & straight != 0
}

/// Side to move is in check and has no legal reply.
pub fn is_checkmate(game_state: &GameState) -> bool {
    is_king_in_check(game_state, game_state.side_to_move)
        && LegalMoveGenerator.generate_moves(game_state).is_empty()
}

/// Side to move is not in check and has no legal reply.
pub fn is_stalemate(game_state: &GameState) -> bool {
    !is_king_in_check(game_state, game_state.side_to_move)
        && LegalMoveGenerator.generate_moves(game_state).is_empty()
}
