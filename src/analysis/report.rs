use chrono::{DateTime, Utc};

use crate::analysis::metrics::ActivityMetrics;
use crate::analysis::scoring::CompositeScores;
use crate::models::analysis::{AnalysisReport, SummaryReport};

/// Assembles output records from already-computed values.
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn full(
        username: &str,
        metrics: &ActivityMetrics,
        scores: &CompositeScores,
        advice: String,
    ) -> AnalysisReport {
        AnalysisReport {
            username: username.to_string(),
            average_commits_per_day: metrics.average_commits_per_day,
            late_night_commits: metrics.late_night_commits,
            weekend_commit_ratio: metrics.weekend_commit_ratio,
            consecutive_days: metrics.consecutive_days,
            idle_days: metrics.idle_days,
            suspect_words: Vec::new(),
            trend: metrics.trend,
            recommendation_score: scores.recommendation_score,
            advice,
            commit_frequency: metrics.commit_frequency,
            work_life_balance: scores.work_life_balance,
            productivity_score: scores.productivity_score,
            commit_patterns: metrics.commit_patterns,
            activity_hours: metrics.activity_hours.clone(),
            project_diversity: metrics.project_diversity,
        }
    }

    pub fn summary(
        username: &str,
        total_commits: u32,
        repo_count: u32,
        average_commits_per_repo: f64,
        analysis_date: DateTime<Utc>,
    ) -> SummaryReport {
        SummaryReport {
            username: username.to_string(),
            total_commits,
            total_repositories: repo_count,
            average_commits_per_repo,
            analysis_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_copies_fields() {
        let now: DateTime<Utc> = "2024-01-10T00:00:00Z".parse().unwrap();
        let report = ReportBuilder::summary("octocat", 12, 0, 0.0, now);

        assert_eq!(report.username, "octocat");
        assert_eq!(report.total_commits, 12);
        assert_eq!(report.total_repositories, 0);
        assert_eq!(report.average_commits_per_repo, 0.0);
        assert_eq!(report.analysis_date, now);
    }

    #[test]
    fn test_summary_takes_average_as_given() {
        let now: DateTime<Utc> = "2024-01-10T00:00:00Z".parse().unwrap();
        // The builder does not recompute from the counts
        let report = ReportBuilder::summary("octocat", 9, 3, 2.5, now);
        assert_eq!(report.average_commits_per_repo, 2.5);
    }
}
