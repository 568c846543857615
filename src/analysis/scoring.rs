use crate::analysis::metrics::{ActivityMetrics, BalanceRatios};

/// Composite scores derived from the base metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompositeScores {
    pub recommendation_score: u32,
    pub work_life_balance: f64,
    pub productivity_score: f64,
}

// Productivity component caps
const COMMIT_SCORE_CAP: f64 = 40.0;
const COMMIT_SCORE_PER_AVG: f64 = 10.0;
const STREAK_SCORE_CAP: f64 = 30.0;
const STREAK_SCORE_PER_DAY: f64 = 2.0;
const BALANCE_WEIGHT: f64 = 0.3;

pub struct ScoreComposer;

impl ScoreComposer {
    pub fn compose(metrics: &ActivityMetrics) -> CompositeScores {
        if metrics.is_empty() {
            return CompositeScores::default();
        }

        let work_life_balance = metrics
            .push_balance_ratios
            .map(Self::work_life_balance)
            .unwrap_or(0.0);

        CompositeScores {
            recommendation_score: Self::recommendation_score(
                metrics.average_commits_per_day,
                metrics.late_night_commits,
                metrics.weekend_commit_ratio,
                metrics.consecutive_days,
            ),
            work_life_balance,
            productivity_score: Self::productivity_score(
                metrics.average_commits_per_day,
                metrics.consecutive_days,
                work_life_balance,
            ),
        }
    }

    /// Additive 0-100 score; each component is tiered independently.
    pub fn recommendation_score(
        average_commits: f64,
        late_night_commits: u32,
        weekend_ratio: f64,
        consecutive_days: u32,
    ) -> u32 {
        let cadence = if average_commits > 3.0 {
            30
        } else if average_commits > 1.0 {
            20
        } else if average_commits > 0.5 {
            10
        } else {
            0
        };

        let late_night = match late_night_commits {
            0..=4 => 20,
            5..=9 => 10,
            _ => 0,
        };

        let weekend = if weekend_ratio < 20.0 {
            20
        } else if weekend_ratio < 40.0 {
            10
        } else {
            0
        };

        let streak = match consecutive_days {
            d if d > 7 => 30,
            d if d > 3 => 20,
            d if d > 1 => 10,
            _ => 0,
        };

        cadence + late_night + weekend + streak
    }

    pub fn work_life_balance(ratios: BalanceRatios) -> f64 {
        (100.0 - (ratios.weekend_ratio + ratios.late_night_ratio) / 2.0).max(0.0)
    }

    /// Sum of three capped components; not normalized to 100.
    pub fn productivity_score(
        average_commits: f64,
        consecutive_days: u32,
        work_life_balance: f64,
    ) -> f64 {
        let commit_score = (average_commits * COMMIT_SCORE_PER_AVG).min(COMMIT_SCORE_CAP);
        let consistency_score =
            (consecutive_days as f64 * STREAK_SCORE_PER_DAY).min(STREAK_SCORE_CAP);
        let balance_score = work_life_balance * BALANCE_WEIGHT;

        commit_score + consistency_score + balance_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_tiers() {
        assert_eq!(ScoreComposer::recommendation_score(3.5, 0, 0.0, 10), 100);
        assert_eq!(ScoreComposer::recommendation_score(2.0, 5, 20.0, 4), 60);
        assert_eq!(ScoreComposer::recommendation_score(0.6, 9, 39.9, 2), 40);
        assert_eq!(ScoreComposer::recommendation_score(0.5, 10, 40.0, 1), 0);
    }

    #[test]
    fn test_recommendation_boundaries_are_strict() {
        // Exactly on a threshold falls to the lower tier
        assert_eq!(ScoreComposer::recommendation_score(3.0, 100, 100.0, 0), 20);
        assert_eq!(ScoreComposer::recommendation_score(1.0, 100, 100.0, 0), 10);
        assert_eq!(ScoreComposer::recommendation_score(0.0, 100, 100.0, 7), 20);
        assert_eq!(ScoreComposer::recommendation_score(0.0, 100, 100.0, 3), 10);
    }

    #[test]
    fn test_work_life_balance() {
        let balanced = BalanceRatios {
            weekend_ratio: 0.0,
            late_night_ratio: 0.0,
        };
        assert_eq!(ScoreComposer::work_life_balance(balanced), 100.0);

        let mixed = BalanceRatios {
            weekend_ratio: 50.0,
            late_night_ratio: 30.0,
        };
        assert_eq!(ScoreComposer::work_life_balance(mixed), 60.0);

        let worst = BalanceRatios {
            weekend_ratio: 100.0,
            late_night_ratio: 100.0,
        };
        assert_eq!(ScoreComposer::work_life_balance(worst), 0.0);
    }

    #[test]
    fn test_productivity_caps() {
        assert!((ScoreComposer::productivity_score(10.0, 50, 100.0) - 100.0).abs() < 1e-9);
        assert!((ScoreComposer::productivity_score(1.0, 3, 50.0) - 31.0).abs() < 1e-9);
        assert_eq!(ScoreComposer::productivity_score(0.0, 0, 0.0), 0.0);
    }
}
