//! Bitboard board position.
//!
//! `GameState` is the unit the rules library operates on: piece bitboards,
//! occupancy caches, side to move, castling rights, en-passant target and the
//! move counters. The game engine keeps three independent copies of it (the
//! truth board and one view per color) and replaces them wholesale instead of
//! sharing mutable state.

use crate::errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub ply: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
            ply: 0,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        // The literal is covered by `starting_position_parses`.
        parse_fen(STARTING_POSITION_FEN).unwrap_or_default()
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Piece placement field of the FEN only.
    pub fn board_fen(&self) -> String {
        let fen = self.get_fen();
        fen.split_whitespace().next().unwrap_or_default().to_owned()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if square > 63 {
            return None;
        }
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in Color::BOTH {
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(kind, color));
                }
            }
        }
        None
    }

    /// Replace whatever stands on `square` with `piece` (or nothing).
    pub fn set_piece_at(&mut self, square: Square, piece: Option<Piece>) {
        if square > 63 {
            return;
        }
        let mask = 1u64 << square;
        for side in self.pieces.iter_mut() {
            for bb in side.iter_mut() {
                *bb &= !mask;
            }
        }
        if let Some(piece) = piece {
            self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        }
        self.recalc_occupancy();
    }

    /// Copy of this position with every piece of `color` removed.
    pub fn without_pieces_of(&self, color: Color) -> GameState {
        let mut out = self.clone();
        out.pieces[color.index()] = [0; 6];
        out.recalc_occupancy();
        out
    }

    #[inline]
    pub fn pieces_of(&self, kind: PieceKind, color: Color) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    /// Number of kings of either color still on the board.
    #[inline]
    pub fn king_count(&self) -> u32 {
        self.pieces_of(PieceKind::King, Color::White).count_ones()
            + self.pieces_of(PieceKind::King, Color::Black).count_ones()
    }

    pub fn recalc_occupancy(&mut self) {
        for color in Color::BOTH {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}
