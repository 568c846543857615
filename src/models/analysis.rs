use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Stable,
    Negative,
    Indeterminate,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Positive => write!(f, "positive"),
            Trend::Stable => write!(f, "stable"),
            Trend::Negative => write!(f, "negative"),
            Trend::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CommitFrequency {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

/// Share of Push events per part of the day, in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CommitPatterns {
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
    pub night: f64,
}

/// Push events per hour of day, keyed "00:00" through "23:00".
pub type ActivityHours = BTreeMap<String, u32>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub username: String,
    pub average_commits_per_day: f64,
    pub late_night_commits: u32,
    pub weekend_commit_ratio: f64,
    pub consecutive_days: u32,
    pub idle_days: u32,
    pub suspect_words: Vec<String>,
    pub trend: Trend,
    pub recommendation_score: u32,
    pub advice: String,
    pub commit_frequency: CommitFrequency,
    pub work_life_balance: f64,
    pub productivity_score: f64,
    pub commit_patterns: CommitPatterns,
    pub activity_hours: ActivityHours,
    pub project_diversity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub username: String,
    pub total_commits: u32,
    pub total_repositories: u32,
    pub average_commits_per_repo: f64,
    pub analysis_date: DateTime<Utc>,
}
