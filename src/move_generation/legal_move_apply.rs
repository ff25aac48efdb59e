//! Applying generated moves and null moves to a position.
//!
//! Every function returns a fresh `GameState`; the input is never mutated.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::find_pseudo_legal;
use crate::moves::move_descriptions::MoveDescription;

pub fn apply_move(game_state: &GameState, description: &MoveDescription) -> GameState {
    let from = description.from();
    let to = description.to();
    let from_mask = 1u64 << from;
    let to_mask = 1u64 << to;

    let moving_color = game_state.side_to_move;
    let enemy_color = moving_color.opposite();
    let moved_piece = description.moved_piece;

    let mut next = game_state.clone();

    next.pieces[moving_color.index()][moved_piece.index()] &= !from_mask;

    if description.is_en_passant() {
        let capture_sq = en_passant_victim_square(moving_color, to);
        next.pieces[enemy_color.index()][PieceKind::Pawn.index()] &= !(1u64 << capture_sq);
    } else if description.is_capture() {
        for bb in next.pieces[enemy_color.index()].iter_mut() {
            *bb &= !to_mask;
        }
    }

    let placed = description.promotion().unwrap_or(moved_piece);
    next.pieces[moving_color.index()][placed.index()] |= to_mask;

    if description.is_castling() {
        let (rook_from, rook_to) = castle_rook_squares(moving_color, to > from);
        let rooks = &mut next.pieces[moving_color.index()][PieceKind::Rook.index()];
        *rooks &= !(1u64 << rook_from);
        *rooks |= 1u64 << rook_to;
    }

    update_castling_rights(&mut next, moving_color, from, to, moved_piece);

    next.en_passant_square = if description.is_double_pawn_push() {
        Some((from + to) / 2)
    } else {
        None
    };

    if moved_piece == PieceKind::Pawn || description.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    finish_ply(&mut next, moving_color);

    next
}

/// Pass: hand the move to the opponent without touching any piece.
pub fn apply_null_move(game_state: &GameState) -> GameState {
    let mut next = game_state.clone();
    let moving_color = next.side_to_move;
    next.en_passant_square = None;
    next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    finish_ply(&mut next, moving_color);
    next
}

/// Play a bare `Move` if it is pseudo-legal here, otherwise pass.
///
/// Returns the new position and whether the move was actually played.
pub fn play_move(game_state: &GameState, mv: Move) -> (GameState, bool) {
    if mv.is_null() {
        return (apply_null_move(game_state), false);
    }
    match find_pseudo_legal(game_state, mv) {
        Some(description) => (apply_move(game_state, &description), true),
        None => (apply_null_move(game_state), false),
    }
}

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline]
pub fn en_passant_victim_square(moving_color: Color, to: Square) -> Square {
    match moving_color {
        Color::White => to - 8,
        Color::Black => to + 8,
    }
}

/// Rook origin and destination for a castle of `color` on the given wing.
#[inline]
pub fn castle_rook_squares(color: Color, kingside: bool) -> (Square, Square) {
    let back_rank = match color {
        Color::White => 0,
        Color::Black => 56,
    };
    if kingside {
        (back_rank + 7, back_rank + 5)
    } else {
        (back_rank, back_rank + 3)
    }
}

fn finish_ply(next: &mut GameState, moving_color: Color) {
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.side_to_move = moving_color.opposite();
    next.ply = next.ply.saturating_add(1);
    next.recalc_occupancy();
}

pub fn update_castling_rights(
    game_state: &mut GameState,
    moving_color: Color,
    from: Square,
    to: Square,
    moved_piece: PieceKind,
) {
    if moved_piece == PieceKind::King {
        game_state.castling_rights &= match moving_color {
            Color::White => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
            Color::Black => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
        };
    }

    // Moving a rook off, or capturing on, a corner clears that corner's right.
    for square in [from, to] {
        game_state.castling_rights &= match square {
            0 => !CASTLE_WHITE_QUEENSIDE,
            7 => !CASTLE_WHITE_KINGSIDE,
            56 => !CASTLE_BLACK_QUEENSIDE,
            63 => !CASTLE_BLACK_KINGSIDE,
            _ => CastlingRights::MAX,
        };
    }
}
