//! Canonical score derivation.
//!
//! The score is `max(0, remaining_time - moves)` where
//! `remaining_time = max(0, TIME_LIMIT - elapsed_seconds)`. Both terms floor at
//! zero, so neither a slow game nor an excessive move count can go negative.

/// Seconds a player has to clear the board.
pub const TIME_LIMIT: u32 = 120;

/// Number of card pairs on a full board.
pub const TOTAL_PAIRS: u32 = 8;

/// Score derived from one game's telemetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ScoreResult {
    pub remaining_time: u32,
    pub score: u32,
}

/// Computes the canonical score for a game.
pub const fn compute(moves: u32, elapsed_seconds: u32) -> ScoreResult {
    let remaining_time = TIME_LIMIT.saturating_sub(elapsed_seconds);
    let score = remaining_time.saturating_sub(moves);
    ScoreResult {
        remaining_time,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_within_time_limit() {
        let result = compute(10, 80);
        assert_eq!(result.remaining_time, 40);
        assert_eq!(result.score, 30);
    }

    #[test]
    fn both_terms_floor_at_zero() {
        let result = compute(200, 150);
        assert_eq!(result.remaining_time, 0);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn moves_exceeding_remaining_time_scores_zero() {
        let result = compute(50, 100);
        assert_eq!(result.remaining_time, 20);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn exactly_at_time_limit() {
        assert_eq!(compute(0, TIME_LIMIT).remaining_time, 0);
        assert_eq!(compute(0, 0).score, TIME_LIMIT);
    }

    #[test]
    fn formula_holds_for_small_domain() {
        for moves in 0..=1000u32 {
            for time in (0..=1000u32).step_by(7) {
                let expected_remaining = (120i64 - time as i64).max(0);
                let expected_score = (expected_remaining - moves as i64).max(0);
                let result = compute(moves, time);
                assert_eq!(result.remaining_time as i64, expected_remaining);
                assert_eq!(result.score as i64, expected_score);
            }
        }
    }

    #[test]
    fn compute_is_idempotent() {
        assert_eq!(compute(13, 57), compute(13, 57));
    }
}
