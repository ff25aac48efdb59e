//! Annotated moves emitted by the generators.
//!
//! A `MoveDescription` wraps the bare `Move` with what the generator already
//! knew when it produced it: which piece moved, what it captured and which
//! special rule applied. Applying and classifying moves reads these flags
//! instead of re-deriving them from the board.

use crate::game_state::chess_types::{Move, PieceKind, Square};

pub const FLAG_CAPTURE: u8 = 1 << 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u8 = 1 << 1;
pub const FLAG_EN_PASSANT: u8 = 1 << 2;
pub const FLAG_CASTLING: u8 = 1 << 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDescription {
    pub mv: Move,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,
    pub flags: u8,
}

impl MoveDescription {
    #[inline]
    pub fn new(
        from: Square,
        to: Square,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion: Option<PieceKind>,
        flags: u8,
    ) -> Self {
        Self {
            mv: Move {
                from,
                to,
                promotion,
            },
            moved_piece,
            captured_piece,
            flags,
        }
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.mv.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.mv.to
    }

    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        self.mv.promotion
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.flags & FLAG_CASTLING != 0
    }

    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PAWN_PUSH != 0
    }
}
