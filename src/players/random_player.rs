//! Uniform random player.
//!
//! Senses and moves uniformly at random from whatever the orchestrator
//! offers. Used as a sparring partner and in orchestrator tests.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::*;
use crate::players::player_trait::Player;

pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_sense(&mut self, sense_actions: &[Square], _move_actions: &[Move], _seconds_left: f64) -> Square {
        match sense_actions.choose(&mut self.rng) {
            Some(&square) => square,
            None => self.rng.random_range(0..64),
        }
    }

    fn choose_move(&mut self, move_actions: &[Move], _seconds_left: f64) -> Option<Move> {
        move_actions.choose(&mut self.rng).copied()
    }
}
