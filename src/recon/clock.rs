//! Per-color chess clock.
//!
//! Stored balances only change at turn boundaries (`charge_turn`) or when the
//! game ends (`freeze`). While a turn is running the live balance of the
//! side to move is the stored balance minus the time since the turn began.

use chrono::{DateTime, Utc};

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone)]
pub struct GameClock {
    seconds_left: [f64; 2],
    turn_started_at: Option<DateTime<Utc>>,
}

impl GameClock {
    pub fn new(seconds_per_player: f64) -> Self {
        Self {
            seconds_left: [seconds_per_player; 2],
            turn_started_at: None,
        }
    }

    /// Start timing the current turn from now.
    pub fn start_turn(&mut self) {
        self.turn_started_at = Some(Utc::now());
    }

    pub fn is_running(&self) -> bool {
        self.turn_started_at.is_some()
    }

    /// Seconds since the current turn began; zero if no turn was started.
    pub fn elapsed_seconds(&self) -> f64 {
        self.turn_started_at
            .and_then(|start| (Utc::now() - start).to_std().ok())
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or(0.0)
    }

    pub fn stored_seconds(&self, color: Color) -> f64 {
        self.seconds_left[color.index()]
    }

    pub fn set_stored_seconds(&mut self, color: Color, seconds: f64) {
        self.seconds_left[color.index()] = seconds;
    }

    /// Balance of `mover` if it is on the clock right now.
    pub fn live_seconds(&self, mover: Color) -> f64 {
        self.stored_seconds(mover) - self.elapsed_seconds()
    }

    /// Deduct the running turn from `mover` and restart timing for the next turn.
    pub fn charge_turn(&mut self, mover: Color) {
        let elapsed = self.elapsed_seconds();
        self.seconds_left[mover.index()] -= elapsed;
        self.start_turn();
    }

    /// Store `mover`'s live balance and stop the clock.
    pub fn freeze(&mut self, mover: Color) {
        self.seconds_left[mover.index()] = self.live_seconds(mover);
        self.turn_started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::GameClock;
    use crate::game_state::chess_types::Color;

    #[test]
    fn idle_clock_does_not_tick() {
        let clock = GameClock::new(60.0);
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed_seconds(), 0.0);
        assert_eq!(clock.live_seconds(Color::White), 60.0);
    }

    #[test]
    fn charging_only_touches_the_mover() {
        let mut clock = GameClock::new(60.0);
        clock.start_turn();
        clock.charge_turn(Color::White);

        assert!(clock.stored_seconds(Color::White) <= 60.0);
        assert!(clock.stored_seconds(Color::White) > 59.0);
        assert_eq!(clock.stored_seconds(Color::Black), 60.0);
        assert!(clock.is_running());
    }

    #[test]
    fn freeze_stops_the_clock() {
        let mut clock = GameClock::new(5.0);
        clock.start_turn();
        clock.freeze(Color::Black);
        let frozen = clock.stored_seconds(Color::Black);

        assert!(!clock.is_running());
        assert!(frozen <= 5.0);
        assert_eq!(clock.live_seconds(Color::Black), frozen);
    }
}
