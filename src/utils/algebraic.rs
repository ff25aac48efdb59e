//! Square name conversions (`e4` <-> 28).

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let &[file, rank] = square.as_bytes() else {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    };

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    if square > 63 {
        return Err(ChessError::InvalidSquare(format!("index {square}")));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    Ok(format!("{file_char}{rank_char}"))
}
