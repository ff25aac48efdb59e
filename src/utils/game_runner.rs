//! Local two-player game runner.
//!
//! Drives two `Player` implementations through a full game against the
//! referee, in-process and without any network layer. Board renderings go
//! to the trace log when enabled.

use tracing::{debug, info};

use crate::errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::players::player_trait::Player;
use crate::recon::game::{Game, GameConfig};
use crate::recon::sense::all_squares;
use crate::utils::render_game_state::format_board;

pub const TURN_LIMIT_REASON: &str = "Draw by turn limit.";

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub game: GameConfig,
    /// End the game as a draw after this many turns.
    pub max_turns: Option<u32>,
    /// Render the mover's view and the truth board into the log every turn.
    pub show_boards: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            max_turns: None,
            show_boards: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub turn_number: u32,
    pub color: Color,
    pub sense: Square,
    pub requested: Option<Move>,
    pub taken: Option<Move>,
    pub capture_square: Option<Square>,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub winner: Option<Color>,
    pub reason: String,
    pub turns: Vec<TurnRecord>,
    pub final_fen: String,
}

impl GameOutcome {
    pub fn report(&self) -> String {
        match self.winner {
            Some(_) => format!("{} after {} turns", self.reason, self.turns.len()),
            None => format!("Draw! {} after {} turns", self.reason, self.turns.len()),
        }
    }
}

/// One turn for the side to move: opponent capture notice, sense, move,
/// move result, then the clock moves on.
pub fn play_turn(game: &mut Game, player: &mut dyn Player, turn_number: u32, show_boards: bool) -> TurnRecord {
    let color = game.turn();
    let move_actions = game.get_moves();
    let sense_actions = all_squares();

    let capture_square = game.opponent_move_result();
    player.handle_opponent_move_result(capture_square.is_some(), capture_square);

    let sense = player.choose_sense(&sense_actions, &move_actions, game.get_seconds_left());
    let observations = game.handle_sense(sense);
    player.handle_sense_result(&observations);
    if show_boards {
        info!("{} sensed around {}\n{}", color.shout(), sense, format_board(game.view(color)));
    }

    let requested = player.choose_move(&move_actions, game.get_seconds_left());
    let outcome = game.handle_move(requested);
    player.handle_move_result(
        outcome.requested,
        outcome.taken,
        &outcome.reason,
        outcome.capture_square.is_some(),
        outcome.capture_square,
    );

    debug!(
        turn = turn_number,
        color = %color,
        sense,
        requested = %outcome.requested.map_or_else(|| "None".to_owned(), |mv| mv.to_string()),
        taken = %outcome.taken.map_or_else(|| "None".to_owned(), |mv| mv.to_string()),
        reason = %outcome.reason,
        "turn played"
    );
    if show_boards {
        info!("truth board after turn {}\n{}", turn_number, format_board(game.truth_board()));
    }

    game.end_turn();

    TurnRecord {
        turn_number,
        color,
        sense,
        requested: outcome.requested,
        taken: outcome.taken,
        capture_square: outcome.capture_square,
        reason: outcome.reason,
    }
}

/// Play a full game, `white` against `black`.
pub fn play_local_game(white: &mut dyn Player, black: &mut dyn Player, config: &MatchConfig) -> ChessResult<GameOutcome> {
    let mut game = Game::with_config(&config.game)?;
    info!("Starting game between {}-WHITE and {}-BLACK", white.name(), black.name());

    white.handle_game_start(Color::White, game.truth_board());
    black.handle_game_start(Color::Black, game.truth_board());
    game.start();

    let mut turns = Vec::new();
    let mut turn_number = 1u32;
    let mut hit_turn_limit = false;

    while !game.is_over() {
        if config.max_turns.is_some_and(|cap| turn_number > cap) {
            hit_turn_limit = true;
            break;
        }
        if config.show_boards {
            let color = game.turn();
            info!("{}'s Turn [{}]\n{}", color.shout(), turn_number, format_board(game.view(color)));
        }

        let player: &mut dyn Player = match game.turn() {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        turns.push(play_turn(&mut game, player, turn_number, config.show_boards));
        turn_number += 1;
    }

    let (winner, reason) = match game.get_winner() {
        Some((winner, reason)) => (Some(winner), reason.to_string()),
        None if hit_turn_limit => (None, TURN_LIMIT_REASON.to_owned()),
        None => (None, "Draw!".to_owned()),
    };
    game.end();

    white.handle_game_end(winner, &reason);
    black.handle_game_end(winner, &reason);

    let outcome = GameOutcome {
        winner,
        reason,
        turns,
        final_fen: game.truth_board().get_fen(),
    };
    info!("Game over! {}", outcome.report());
    Ok(outcome)
}
