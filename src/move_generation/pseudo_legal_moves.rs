//! Pseudo-legal move generation for the side to move.
//!
//! Moves ignore self-check. Kings are ordinary capture targets. Castling is
//! emitted whenever the right is held, the rook is home and the squares
//! between king and rook are empty; attacked transit squares are only
//! filtered by the legal generator.

use crate::game_state::chess_rules::PROMOTION_KINDS;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::moves::attacks::{between, pawn_attacks, piece_attacks, squares_of};
use crate::moves::move_descriptions::{
    MoveDescription, FLAG_CAPTURE, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};

pub fn generate_pseudo_legal_moves(game_state: &GameState, out: &mut Vec<MoveDescription>) {
    generate_pawn_moves(game_state, out);
    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        generate_piece_moves(game_state, kind, out);
    }
    generate_castling_moves(game_state, out);
}

pub fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<MoveDescription>) {
    let side = game_state.side_to_move;
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let empty = !game_state.occupancy_all;
    let (forward, start_rank, promotion_rank): (i8, u8, u8) = match side {
        Color::White => (8, 1, 7),
        Color::Black => (-8, 6, 0),
    };

    for from in squares_of(game_state.pieces_of(PieceKind::Pawn, side)) {
        let one_step = (from as i8 + forward) as Square;
        if one_step <= 63 && (1u64 << one_step) & empty != 0 {
            push_pawn_move(out, from, one_step, None, promotion_rank, 0);

            if from / 8 == start_rank {
                let two_step = (one_step as i8 + forward) as Square;
                if (1u64 << two_step) & empty != 0 {
                    out.push(MoveDescription::new(
                        from,
                        two_step,
                        PieceKind::Pawn,
                        None,
                        None,
                        FLAG_DOUBLE_PAWN_PUSH,
                    ));
                }
            }
        }

        for to in squares_of(pawn_attacks(side, from)) {
            let to_mask = 1u64 << to;
            if to_mask & enemy_occ != 0 {
                let captured = enemy_piece_on(game_state, to);
                push_pawn_move(out, from, to, captured, promotion_rank, FLAG_CAPTURE);
            } else if game_state.en_passant_square == Some(to) {
                out.push(MoveDescription::new(
                    from,
                    to,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

fn push_pawn_move(
    out: &mut Vec<MoveDescription>,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    promotion_rank: u8,
    flags: u8,
) {
    if to / 8 == promotion_rank {
        for promo in PROMOTION_KINDS {
            out.push(MoveDescription::new(
                from,
                to,
                PieceKind::Pawn,
                captured,
                Some(promo),
                flags,
            ));
        }
    } else {
        out.push(MoveDescription::new(from, to, PieceKind::Pawn, captured, None, flags));
    }
}

/// Knight, bishop, rook, queen and king steps (castling excluded).
pub fn generate_piece_moves(game_state: &GameState, kind: PieceKind, out: &mut Vec<MoveDescription>) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let occ = game_state.occupancy_all;

    for from in squares_of(game_state.pieces_of(kind, side)) {
        let targets = match kind {
            PieceKind::Pawn => 0,
            _ => piece_attacks(kind, side, from, occ),
        } & !own_occ;

        for to in squares_of(targets) {
            let is_capture = (1u64 << to) & enemy_occ != 0;
            let captured = if is_capture {
                enemy_piece_on(game_state, to)
            } else {
                None
            };
            out.push(MoveDescription::new(
                from,
                to,
                kind,
                captured,
                None,
                if is_capture { FLAG_CAPTURE } else { 0 },
            ));
        }
    }
}

/// (king from, king to, rook home, right) for each castle of `color`.
pub fn castling_options(color: Color) -> [(Square, Square, Square, CastlingRights); 2] {
    match color {
        Color::White => [
            (4, 6, 7, CASTLE_WHITE_KINGSIDE),
            (4, 2, 0, CASTLE_WHITE_QUEENSIDE),
        ],
        Color::Black => [
            (60, 62, 63, CASTLE_BLACK_KINGSIDE),
            (60, 58, 56, CASTLE_BLACK_QUEENSIDE),
        ],
    }
}

pub fn generate_castling_moves(game_state: &GameState, out: &mut Vec<MoveDescription>) {
    let side = game_state.side_to_move;
    let kings = game_state.pieces_of(PieceKind::King, side);
    let rooks = game_state.pieces_of(PieceKind::Rook, side);

    for (king_from, king_to, rook_home, right) in castling_options(side) {
        if game_state.castling_rights & right == 0
            || kings & (1u64 << king_from) == 0
            || rooks & (1u64 << rook_home) == 0
        {
            continue;
        }
        if game_state.occupancy_all & between(king_from, rook_home) != 0 {
            continue;
        }
        out.push(MoveDescription::new(
            king_from,
            king_to,
            PieceKind::King,
            None,
            None,
            FLAG_CASTLING,
        ));
    }
}
