use chrono::{DateTime, Utc};
use futures::try_join;

use crate::analysis::analyzer::{analyze, summarize};
use crate::error::Result;
use crate::github::EventSource;
use crate::models::{AnalysisReport, SummaryReport};

/// Fetches a user's activity from an `EventSource` and runs the analysis core.
///
/// Fetch failures are returned as-is; the core is only invoked with a complete
/// list of events.
pub struct AnalysisPipeline<S: EventSource> {
    source: S,
}

impl<S: EventSource> AnalysisPipeline<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn analyze_user(&self, username: &str, now: DateTime<Utc>) -> Result<AnalysisReport> {
        tracing::info!("Received request to analyze user: {}", username);

        let events = self.source.user_events(username).await?;
        tracing::info!(
            "Fetched {} events for {} from {}",
            events.len(),
            username,
            self.source.name()
        );

        let report = analyze(username, &events, now);
        tracing::info!(
            "Analysis completed for {}: score {}, trend {}",
            username,
            report.recommendation_score,
            report.trend
        );

        Ok(report)
    }

    pub async fn report_user(&self, username: &str, now: DateTime<Utc>) -> Result<SummaryReport> {
        tracing::info!("Received request for report of user: {}", username);

        let (repos, events) = try_join!(
            self.source.user_repositories(username),
            self.source.user_events(username)
        )?;
        tracing::info!(
            "Fetched {} repositories and {} events for {}",
            repos.len(),
            events.len(),
            username
        );

        Ok(summarize(username, &events, repos.len(), now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{Event, Repository, Trend};
    use async_trait::async_trait;

    struct StaticSource {
        events: Vec<Event>,
        repos: Vec<Repository>,
    }

    #[async_trait]
    impl EventSource for StaticSource {
        async fn user_events(&self, _username: &str) -> Result<Vec<Event>> {
            Ok(self.events.clone())
        }

        async fn user_repositories(&self, _username: &str) -> Result<Vec<Repository>> {
            Ok(self.repos.clone())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    struct MissingUser;

    #[async_trait]
    impl EventSource for MissingUser {
        async fn user_events(&self, username: &str) -> Result<Vec<Event>> {
            Err(Error::UserNotFound(username.to_string()))
        }

        async fn user_repositories(&self, username: &str) -> Result<Vec<Repository>> {
            Err(Error::UserNotFound(username.to_string()))
        }

        fn name(&self) -> &str {
            "missing"
        }
    }

    fn repo(id: u64, name: &str) -> Repository {
        Repository {
            id,
            name: name.to_string(),
            full_name: None,
            fork: false,
        }
    }

    fn now() -> DateTime<Utc> {
        "2024-01-10T12:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn test_analyze_user_runs_core() {
        let pipeline = AnalysisPipeline::new(StaticSource {
            events: vec![
                Event::new("PushEvent", "2024-01-05T23:00:00Z"),
                Event::new("PushEvent", "2024-01-06T10:00:00Z"),
                Event::new("PushEvent", "2024-01-07T10:00:00Z"),
            ],
            repos: Vec::new(),
        });

        let report = pipeline.analyze_user("octocat", now()).await.unwrap();
        assert_eq!(report.username, "octocat");
        assert_eq!(report.consecutive_days, 3);
        assert_eq!(report.late_night_commits, 1);
        assert_eq!(report.trend, Trend::Negative);
    }

    #[tokio::test]
    async fn test_report_user_uses_repository_count() {
        let pipeline = AnalysisPipeline::new(StaticSource {
            events: vec![
                Event::new("PushEvent", "2024-01-05T23:00:00Z"),
                Event::new("CreateEvent", "2024-01-06T10:00:00Z"),
                Event::new("ForkEvent", "2024-01-06T11:00:00Z"),
            ],
            repos: vec![repo(1, "a"), repo(2, "b"), repo(3, "c"), repo(4, "d")],
        });

        let summary = pipeline.report_user("octocat", now()).await.unwrap();
        assert_eq!(summary.total_commits, 2);
        assert_eq!(summary.total_repositories, 4);
        assert_eq!(summary.average_commits_per_repo, 0.5);
        assert_eq!(summary.analysis_date, now());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let pipeline = AnalysisPipeline::new(MissingUser);

        let err = pipeline.analyze_user("ghost", now()).await.unwrap_err();
        assert!(matches!(err, Error::UserNotFound(ref u) if u == "ghost"));

        let err = pipeline.report_user("ghost", now()).await.unwrap_err();
        assert!(matches!(err, Error::UserNotFound(_)));
    }
}
