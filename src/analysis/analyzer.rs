use chrono::{DateTime, Utc};

use crate::analysis::advice::AdviceGenerator;
use crate::analysis::classifier::EventClassifier;
use crate::analysis::metrics::{average_commits_per_repo, MetricAggregator};
use crate::analysis::report::ReportBuilder;
use crate::analysis::scoring::ScoreComposer;
use crate::models::analysis::{AnalysisReport, SummaryReport};
use crate::models::event::Event;

/// Full behavioral analysis of one events page.
///
/// Pure given `now`: the same events and clock always produce the same report.
pub fn analyze(username: &str, events: &[Event], now: DateTime<Utc>) -> AnalysisReport {
    let classified = EventClassifier::classify(events);
    let metrics = MetricAggregator::new(&classified, now).collect();
    let scores = ScoreComposer::compose(&metrics);
    let advice = AdviceGenerator::generate(&metrics);

    ReportBuilder::full(username, &metrics, &scores, advice)
}

pub fn summarize(
    username: &str,
    events: &[Event],
    repo_count: usize,
    now: DateTime<Utc>,
) -> SummaryReport {
    let classified = EventClassifier::classify(events);
    let total_commits = MetricAggregator::new(&classified, now).countable_count();
    let repo_count = u32::try_from(repo_count).unwrap_or(u32::MAX);

    let average = average_commits_per_repo(total_commits, repo_count);

    ReportBuilder::summary(username, total_commits, repo_count, average, now)
}
