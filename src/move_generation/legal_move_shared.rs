//! Board lookups shared by the per-piece generators.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Kind of the opponent piece (relative to the side to move) on `square`.
#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    let enemy = game_state.side_to_move.opposite();
    let mask = 1u64 << square;
    if game_state.occupancy_by_color[enemy.index()] & mask == 0 {
        return None;
    }
    PieceKind::ALL
        .into_iter()
        .find(|kind| game_state.pieces_of(*kind, enemy) & mask != 0)
}
