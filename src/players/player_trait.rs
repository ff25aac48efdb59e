//! Player abstraction used by the turn orchestrator.
//!
//! The orchestrator drives every player through the same callback sequence
//! each turn, so scripted, random and search-driven players can be mixed
//! freely behind `Box<dyn Player>`.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::recon::sense::Observation;

pub trait Player: Send {
    fn name(&self) -> &str;

    fn handle_game_start(&mut self, _color: Color, _board: &GameState) {}

    /// Called at the start of each turn with where, if anywhere, the
    /// opponent's last move captured one of our pieces.
    fn handle_opponent_move_result(&mut self, _captured_my_piece: bool, _capture_square: Option<Square>) {}

    /// Center of the 3x3 window to sense.
    fn choose_sense(&mut self, sense_actions: &[Square], move_actions: &[Move], seconds_left: f64) -> Square;

    fn handle_sense_result(&mut self, _observations: &[Observation]) {}

    /// Move to request, or `None` to pass.
    fn choose_move(&mut self, move_actions: &[Move], seconds_left: f64) -> Option<Move>;

    fn handle_move_result(
        &mut self,
        _requested: Option<Move>,
        _taken: Option<Move>,
        _reason: &str,
        _captured_opponent_piece: bool,
        _capture_square: Option<Square>,
    ) {
    }

    fn handle_game_end(&mut self, _winner: Option<Color>, _reason: &str) {}
}
