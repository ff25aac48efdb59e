//! The referee.
//!
//! `Game` owns the truth board, one partial view per color, the clocks and
//! the last capture square. Players never touch the truth board: they sense
//! through [`Game::handle_sense`] and request moves through
//! [`Game::handle_move`], which revises each request into whatever the true
//! position allows.
//!
//! Views are rebuilt from the truth board after every move, so sensed enemy
//! pieces disappear from a view as soon as anyone moves.

use std::fmt;

use tracing::{debug, trace};

use crate::errors::ChessResult;
use crate::game_state::chess_rules::{DEFAULT_SECONDS_PER_PLAYER, STARTING_POSITION_FEN};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, apply_null_move};
use crate::moves::move_descriptions::MoveDescription;
use crate::recon::clock::GameClock;
use crate::recon::move_revision::{
    add_pawn_queen_promotion, capture_square_of_move, revise_move, speculative_moves, Revision,
};
use crate::recon::sense::{observe, Observation};

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub seconds_per_player: f64,
    pub starting_fen: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seconds_per_player: DEFAULT_SECONDS_PER_PLAYER,
            starting_fen: STARTING_POSITION_FEN.to_owned(),
        }
    }
}

/// What happened to a requested move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub requested: Option<Move>,
    /// `None` when the request resolved to a pass.
    pub taken: Option<Move>,
    pub capture_square: Option<Square>,
    /// Empty when a move was taken.
    pub reason: String,
}

/// How a game was won. Displays as the transcript's verdict line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    Timeout(Color),
    KingCapture(Color),
}

impl WinReason {
    pub fn winner(self) -> Color {
        match self {
            WinReason::Timeout(color) | WinReason::KingCapture(color) => color,
        }
    }
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinReason::Timeout(winner) => write!(f, "{} won by timeout", winner.shout()),
            WinReason::KingCapture(winner) => write!(f, "{} won by king capture.", winner.shout()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    turn: Color,
    truth_board: GameState,
    views: [GameState; 2],
    is_finished: bool,
    clock: GameClock,
    move_result: Option<Square>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_state(GameState::new_game(), DEFAULT_SECONDS_PER_PLAYER)
    }

    pub fn with_config(config: &GameConfig) -> ChessResult<Self> {
        Self::from_fen(&config.starting_fen, config.seconds_per_player)
    }

    pub fn from_fen(fen: &str, seconds_per_player: f64) -> ChessResult<Self> {
        Ok(Self::from_state(GameState::from_fen(fen)?, seconds_per_player))
    }

    fn from_state(truth_board: GameState, seconds_per_player: f64) -> Self {
        let views = [
            truth_board.without_pieces_of(Color::Black),
            truth_board.without_pieces_of(Color::White),
        ];
        Self {
            turn: truth_board.side_to_move,
            truth_board,
            views,
            is_finished: false,
            clock: GameClock::new(seconds_per_player),
            move_result: None,
        }
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn truth_board(&self) -> &GameState {
        &self.truth_board
    }

    /// `color`'s partial view of the board.
    #[inline]
    pub fn view(&self, color: Color) -> &GameState {
        &self.views[color.index()]
    }

    pub fn start(&mut self) {
        self.clock.start_turn();
    }

    /// Freeze the mover's clock and mark the game finished.
    pub fn end(&mut self) {
        if self.clock.is_running() {
            self.clock.freeze(self.turn);
        }
        self.is_finished = true;
    }

    /// The mover's remaining seconds, live while the game runs.
    pub fn get_seconds_left(&self) -> f64 {
        if !self.is_finished && self.clock.is_running() {
            self.clock.live_seconds(self.turn)
        } else {
            self.clock.stored_seconds(self.turn)
        }
    }

    pub fn seconds_left_of(&self, color: Color) -> f64 {
        if color == self.turn {
            self.get_seconds_left()
        } else {
            self.clock.stored_seconds(color)
        }
    }

    pub fn set_seconds_left(&mut self, color: Color, seconds: f64) {
        self.clock.set_stored_seconds(color, seconds);
    }

    /// Charge the mover for this turn and hand the move to the opponent.
    pub fn end_turn(&mut self) {
        self.clock.charge_turn(self.turn);
        trace!(
            color = %self.turn,
            seconds_left = self.clock.stored_seconds(self.turn),
            "turn ended"
        );
        self.turn = self.turn.opposite();
    }

    /// Speculative moves for the side to move; empty once the game is over.
    pub fn get_moves(&self) -> Vec<Move> {
        if self.is_finished {
            return Vec::new();
        }
        speculative_moves(&self.truth_board, self.turn)
    }

    /// Resolve a sense for the side to move and record it in that side's view.
    pub fn handle_sense(&mut self, square: Square) -> Vec<Observation> {
        let observations = observe(&self.truth_board, square);
        let view = &mut self.views[self.turn.index()];
        for &(sq, piece) in &observations {
            view.set_piece_at(sq, piece);
        }
        debug!(color = %self.turn, square, observed = observations.len(), "sense resolved");
        observations
    }

    /// Revise and play `requested` for the side to move.
    ///
    /// The truth board advances exactly one ply: the taken move, or a pass.
    pub fn handle_move(&mut self, requested: Option<Move>) -> MoveOutcome {
        if self.is_finished {
            return MoveOutcome {
                requested,
                taken: None,
                capture_square: None,
                reason: String::new(),
            };
        }

        let mover = self.turn;
        let (taken, capture_square, reason) = self.resolve_move(requested);

        self.truth_board = match &taken {
            Some(description) => apply_move(&self.truth_board, description),
            None => apply_null_move(&self.truth_board),
        };
        self.views = [
            self.truth_board.without_pieces_of(Color::Black),
            self.truth_board.without_pieces_of(Color::White),
        ];
        self.move_result = capture_square;

        let taken = taken.map(|description| description.mv);
        debug!(
            color = %mover,
            requested = ?requested.map(|mv| mv.to_string()),
            taken = ?taken.map(|mv| mv.to_string()),
            capture_square = ?capture_square,
            "move resolved"
        );

        MoveOutcome {
            requested,
            taken,
            capture_square,
            reason,
        }
    }

    fn resolve_move(
        &self,
        requested: Option<Move>,
    ) -> (Option<MoveDescription>, Option<Square>, String) {
        let Some(requested) = requested else {
            return (None, None, "Ran out of time or no move was requested".to_owned());
        };
        if requested.is_null() {
            return (None, None, "Passed".to_owned());
        }
        if !self.get_moves().contains(&requested) {
            return (None, None, format!("{requested} is an illegal move made."));
        }

        let mv = add_pawn_queen_promotion(&self.truth_board, requested);
        match revise_move(&self.truth_board, mv) {
            Revision::Taken(description) => {
                let capture_square = capture_square_of_move(self.turn, &description);
                (Some(description), capture_square, String::new())
            }
            Revision::IllegalCastle => (None, None, format!("{requested} is an illegal castle.")),
            Revision::Blocked => (None, None, format!("{requested} could not be completed.")),
        }
    }

    /// Square where the previous move captured, for the side now to move.
    #[inline]
    pub fn opponent_move_result(&self) -> Option<Square> {
        self.move_result
    }

    pub fn is_over(&self) -> bool {
        self.is_finished || self.get_winner().is_some()
    }

    /// Timeouts are checked before king captures, White before Black.
    pub fn get_winner(&self) -> Option<(Color, WinReason)> {
        let reason = if self.seconds_left_of(Color::White) <= 0.0 {
            WinReason::Timeout(Color::Black)
        } else if self.seconds_left_of(Color::Black) <= 0.0 {
            WinReason::Timeout(Color::White)
        } else if self.truth_board.pieces_of(PieceKind::King, Color::White) == 0 {
            WinReason::KingCapture(Color::Black)
        } else if self.truth_board.pieces_of(PieceKind::King, Color::Black) == 0 {
            WinReason::KingCapture(Color::White)
        } else {
            return None;
        };
        Some((reason.winner(), reason))
    }
}
