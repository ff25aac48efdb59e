//! Per-move search budgets derived from the game clock.
//!
//! The orchestrator hands players their remaining clock in seconds; the
//! search-driven player turns it into a wall-clock budget for one search.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeManagementStrategy {
    /// Spend 1/20th of the remaining clock.
    Fraction20,
    /// Scale with the expected number of moves left, keeping a reserve.
    #[default]
    Adaptive,
}

/// Budget for one search, never above `limit`.
pub fn search_budget(seconds_left: f64, ply: u16, limit: Duration, strategy: TimeManagementStrategy) -> Duration {
    if !seconds_left.is_finite() || seconds_left <= 0.0 {
        return Duration::ZERO;
    }

    let remaining_ms = (seconds_left * 1000.0) as u64;
    let budget_ms = match strategy {
        TimeManagementStrategy::Fraction20 => (remaining_ms / 20).max(1),
        TimeManagementStrategy::Adaptive => adaptive_budget_ms(remaining_ms, ply),
    };
    Duration::from_millis(budget_ms).min(limit)
}

fn adaptive_budget_ms(remaining_ms: u64, ply: u16) -> u64 {
    let expected_moves_left = if ply < 20 {
        40
    } else if ply < 60 {
        28
    } else {
        18
    };

    let reserve = (remaining_ms / 25).max(100).min(remaining_ms.saturating_sub(1));
    let usable = remaining_ms.saturating_sub(reserve);
    let base = usable / expected_moves_left;
    let panic = if remaining_ms < 2_000 {
        remaining_ms / 12
    } else {
        0
    };
    let target = base.saturating_add(panic);

    let min_budget = if remaining_ms < 1_000 { 5 } else { 15 };
    let max_budget = (remaining_ms / 4).max(1);
    target.clamp(min_budget.min(max_budget), max_budget).max(1)
}

#[cfg(test)]
mod tests {
    use super::{search_budget, TimeManagementStrategy};
    use std::time::Duration;

    const LIMIT: Duration = Duration::from_secs(10);

    #[test]
    fn fraction_spends_a_twentieth() {
        let budget = search_budget(60.0, 0, LIMIT, TimeManagementStrategy::Fraction20);
        assert_eq!(budget, Duration::from_millis(3_000));
    }

    #[test]
    fn budget_is_capped_by_limit() {
        let budget = search_budget(600.0, 0, Duration::from_millis(500), TimeManagementStrategy::Fraction20);
        assert_eq!(budget, Duration::from_millis(500));
        let budget = search_budget(600.0, 0, Duration::from_millis(500), TimeManagementStrategy::Adaptive);
        assert_eq!(budget, Duration::from_millis(500));
    }

    #[test]
    fn adaptive_spends_less_early_than_late() {
        let early = search_budget(120.0, 4, LIMIT, TimeManagementStrategy::Adaptive);
        let late = search_budget(120.0, 80, LIMIT, TimeManagementStrategy::Adaptive);
        assert!(early < late);
        assert!(late <= Duration::from_secs(30));
    }

    #[test]
    fn low_clock_stays_positive_and_small() {
        let budget = search_budget(0.5, 10, LIMIT, TimeManagementStrategy::Adaptive);
        assert!(budget > Duration::ZERO);
        assert!(budget <= Duration::from_millis(125));
    }

    #[test]
    fn exhausted_clock_means_no_search() {
        assert_eq!(search_budget(0.0, 0, LIMIT, TimeManagementStrategy::Adaptive), Duration::ZERO);
        assert_eq!(search_budget(-3.0, 0, LIMIT, TimeManagementStrategy::Fraction20), Duration::ZERO);
    }
}
