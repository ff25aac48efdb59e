//! FEN-to-GameState parser.
//!
//! Builds a fully-populated position from a Forsyth-Edwards Notation string,
//! including piece bitboards, rights, counters and occupancies.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();
    let mut field = |name: &str| {
        parts
            .next()
            .ok_or_else(|| ChessError::InvalidFen(format!("missing {name} in '{fen}'")))
    };

    let board_part = field("board layout")?;
    let side_part = field("side to move")?;
    let castling_part = field("castling rights")?;
    let en_passant_part = field("en-passant square")?;
    let halfmove_part = field("halfmove clock")?;
    let fullmove_part = field("fullmove number")?;

    if parts.next().is_some() {
        return Err(ChessError::InvalidFen(format!("extra trailing fields in '{fen}'")));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::InvalidFen(format!("halfmove clock '{halfmove_part}'")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::InvalidFen(format!("fullmove number '{fullmove_part}'")))?;

    game_state.recalc_occupancy();

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidFen(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = Piece::from_symbol(ch).ok_or_else(|| {
                ChessError::InvalidFen(format!("invalid piece character '{ch}'"))
            })?;

            if file >= 8 {
                return Err(ChessError::InvalidFen(format!(
                    "rank '{rank_str}' has too many files"
                )));
            }

            let sq = board_rank * 8 + file;
            game_state.pieces[piece.color.index()][piece.kind.index()] |= 1u64 << sq;
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::InvalidFen(format!(
                "rank '{rank_str}' does not sum to 8 files"
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::InvalidFen(format!(
            "side-to-move field '{side_part}'"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    castling_part.chars().try_fold(0, |rights, ch| {
        let right = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => {
                return Err(ChessError::InvalidFen(format!(
                    "castling rights character '{ch}'"
                )))
            }
        };
        Ok(rights | right)
    })
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Ok(Some(algebraic_to_square(en_passant_part)?))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, CASTLE_BLACK_KINGSIDE, CASTLE_WHITE_QUEENSIDE};

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move, Color::White);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.occupancy_all.count_ones(), 32);
    }

    #[test]
    fn parse_rights_and_en_passant() {
        let game_state =
            parse_fen("4k2r/8/8/3pP3/8/8/8/R3K3 w Qk d6 0 12").expect("FEN should parse");
        assert_eq!(
            game_state.castling_rights,
            CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_KINGSIDE
        );
        assert_eq!(game_state.en_passant_square, Some(43));
        assert_eq!(game_state.fullmove_number, 12);
    }

    #[test]
    fn reject_malformed_fen() {
        assert!(parse_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/9 w - - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 x - - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - -").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - - 0 1 extra").is_err());
    }
}
