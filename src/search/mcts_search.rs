//! Time-boxed Monte Carlo tree search.
//!
//! Each iteration selects a node, expands one action, plays a uniformly
//! random rollout from the new child and backs the result up to the root.
//! Rollouts end when a king is gone, the only terminal test in
//! reconnaissance chess, or after the configured ply cap.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::errors::SearchError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::play_move;
use crate::move_generation::move_generator::{LegalMoveGenerator, MoveGenerator, PseudoLegalMoveGenerator};
use crate::search::mcts_config::MctsConfig;
use crate::search::mcts_tree::MctsTree;

pub const ROLLOUT_WIN: f64 = 1.0;
pub const ROLLOUT_DRAW: f64 = 0.5;
pub const ROLLOUT_LOSS: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloutOutcome {
    /// 1, 0.5 or 0 for the search's team.
    pub result: f64,
    pub plies: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub iterations: usize,
    pub nodes: usize,
    pub elapsed: Duration,
}

pub struct Mcts {
    config: MctsConfig,
    team: Color,
    root_state: GameState,
    root_actions: Vec<Move>,
    rng: StdRng,
    tree: Option<MctsTree>,
}

impl Mcts {
    /// Search from `root_state` for `team`. Root actions default to the
    /// legal moves of `root_state`.
    pub fn new(root_state: GameState, team: Color, config: MctsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let root_actions = LegalMoveGenerator.generate_bare_moves(&root_state);
        Self {
            config,
            team,
            root_state,
            root_actions,
            rng,
            tree: None,
        }
    }

    /// Restrict the root to `actions`.
    pub fn with_root_actions(mut self, actions: Vec<Move>) -> Self {
        self.root_actions = actions;
        self
    }

    #[inline]
    pub fn team(&self) -> Color {
        self.team
    }

    /// Tree built by the last `search`.
    #[inline]
    pub fn tree(&self) -> Option<&MctsTree> {
        self.tree.as_ref()
    }

    /// Grow a fresh tree until the time limit (or iteration cap) is reached.
    pub fn search(&mut self) -> Result<SearchStats, SearchError> {
        let started = Instant::now();
        let mut tree = MctsTree::new(self.root_state.clone(), self.team, self.root_actions.clone());
        let mut iterations = 0usize;

        while started.elapsed() < self.config.time_limit {
            if self.config.max_iterations.is_some_and(|cap| iterations >= cap) {
                break;
            }

            let selected = tree.select(self.config.exploration)?;
            let child = tree.expand(selected, &mut self.rng)?;
            let board = tree.node(child)?.state.clone();
            let outcome = self.simulate(&board);
            tree.backpropagate(child, outcome.result, self.team)?;
            iterations += 1;
        }

        let stats = SearchStats {
            iterations,
            nodes: tree.len(),
            elapsed: started.elapsed(),
        };
        debug!(
            team = %self.team,
            iterations = stats.iterations,
            nodes = stats.nodes,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "search finished"
        );
        self.tree = Some(tree);
        Ok(stats)
    }

    /// Action of the root child with the lowest win rate.
    pub fn pick_move(&self) -> Option<Move> {
        self.tree.as_ref()?.best_child()?.action
    }

    /// Random playout from `board`, scored for the search's team.
    pub fn simulate(&mut self, board: &GameState) -> RolloutOutcome {
        let mut state = board.clone();
        let mut plies = 0usize;

        loop {
            if state.king_count() < 2 {
                let winner = if state.pieces_of(PieceKind::King, Color::White) != 0 {
                    Color::White
                } else {
                    Color::Black
                };
                let result = if winner == self.team { ROLLOUT_WIN } else { ROLLOUT_LOSS };
                return RolloutOutcome { result, plies };
            }
            if plies >= self.config.rollout_ply_cap {
                return RolloutOutcome {
                    result: ROLLOUT_DRAW,
                    plies,
                };
            }

            let mut moves = PseudoLegalMoveGenerator.generate_bare_moves(&state);
            moves.push(Move::NULL);
            let next = moves.choose(&mut self.rng).copied().unwrap_or(Move::NULL);
            state = play_move(&state, next).0;
            plies += 1;
        }
    }
}
