//! Fixed-width ASCII board renderer used in game transcripts.
//!
//! Produces 9 rows of 34 columns: a header with files A-H, then one row per
//! rank from 8 down to 1. Each square is `| X ` for a piece letter `X`, or
//! `|   ` when empty, and every rank row is closed by a trailing `|`.

use crate::game_state::game_state::GameState;

pub const RENDER_ROWS: usize = 9;
pub const RENDER_COLUMNS: usize = 34;

const HEADER: &str = "   A   B   C   D   E   F   G   H  ";

/// Render `game_state` as the 9 x 34 transcript block (newline-terminated rows).
pub fn format_board(game_state: &GameState) -> String {
    let mut out = String::with_capacity(RENDER_ROWS * (RENDER_COLUMNS + 1));
    out.push_str(HEADER);
    out.push('\n');

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        for file in 0..8u8 {
            match game_state.piece_at(rank * 8 + file) {
                Some(piece) => {
                    out.push_str("| ");
                    out.push(piece.symbol());
                    out.push(' ');
                }
                None => out.push_str("|   "),
            }
        }
        out.push_str("|\n");
    }

    out
}
