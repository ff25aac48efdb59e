//! Canonical chess-rule constants.
//!
//! Static literals shared by position setup, move revision and the game clock.

use crate::game_state::chess_types::PieceKind;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Ranks 1 and 8.
pub const BACK_RANKS: u64 = 0xFF00_0000_0000_00FF;

/// Clock allotment per color for a fresh game.
pub const DEFAULT_SECONDS_PER_PLAYER: f64 = 600.0;

/// Pieces a pawn may promote to, in generation order.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];
