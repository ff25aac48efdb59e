//! Value types shared by the rules library, the game engine and the search.
//!
//! Squares are `0..=63` with `0 == a1`, `7 == h1` and `63 == h8`, so
//! `file = square % 8` and `rank = square / 8`.

use std::fmt;

pub use crate::game_state::game_state::GameState;

/// Player color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Upper-case name used in win reasons.
    pub const fn shout(self) -> &'static str {
        match self {
            Color::White => "WHITE",
            Color::Black => "BLACK",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shout())
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Pieces that travel along a line and can be stopped short by a blocker.
    #[inline]
    pub const fn is_sliding(self) -> bool {
        matches!(
            self,
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen
        )
    }

    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// FEN letter: upper case for White, lower case for Black.
    pub fn symbol(self) -> char {
        match self.color {
            Color::White => self.kind.fen_char().to_ascii_uppercase(),
            Color::Black => self.kind.fen_char(),
        }
    }

    pub fn from_symbol(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };
        PieceKind::from_fen_char(ch).map(|kind| Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Board square index (`0..=63`).
pub type Square = u8;

/// A requested or played move. `Move::NULL` is the pass sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub const NULL: Move = Move {
        from: 0,
        to: 0,
        promotion: None,
    };

    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        *self == Move::NULL
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("0000");
        }
        for sq in [self.from, self.to] {
            write!(
                f,
                "{}{}",
                char::from(b'a' + sq % 8),
                char::from(b'1' + sq / 8)
            )?;
        }
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.fen_char())?;
        }
        Ok(())
    }
}

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub type CastlingRights = u8;

#[cfg(test)]
mod tests {
    use super::{Color, Move, Piece, PieceKind};

    #[test]
    fn move_display_uses_long_algebraic() {
        assert_eq!(Move::new(12, 28).to_string(), "e2e4");
        assert_eq!(
            Move::with_promotion(48, 56, PieceKind::Knight).to_string(),
            "a7a8n"
        );
        assert_eq!(Move::NULL.to_string(), "0000");
    }

    #[test]
    fn piece_symbols_follow_fen_case() {
        let piece = Piece::from_symbol('Q').expect("Q is a piece letter");
        assert_eq!(piece, Piece::new(PieceKind::Queen, Color::White));
        assert_eq!(Piece::new(PieceKind::Knight, Color::Black).symbol(), 'n');
        assert!(Piece::from_symbol('x').is_none());
    }
}
