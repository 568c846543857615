use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::analysis::{ActivityHours, CommitFrequency, CommitPatterns, Trend};
use crate::models::event::{ClassifiedEvent, EventTiming};

/// Fixed denominator for the per-day average. The events feed only covers a
/// recent window, so this approximates a month rather than filtering to one.
pub const AVERAGE_WINDOW_DAYS: f64 = 30.0;
pub const WEEKS_PER_MONTH: f64 = 4.0;

const TREND_WINDOW_DAYS: i64 = 30;
const TREND_POSITIVE_ABOVE: usize = 20;
const TREND_STABLE_ABOVE: usize = 10;

const SECONDS_PER_DAY: i64 = 86_400;

/// Every base metric for one batch of events, computed once and shared by
/// scoring, advice and report assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityMetrics {
    pub event_count: usize,
    pub total_commits: u32,
    pub average_commits_per_day: f64,
    pub late_night_commits: u32,
    pub weekend_commit_ratio: f64,
    pub consecutive_days: u32,
    pub idle_days: u32,
    pub trend: Trend,
    pub commit_frequency: CommitFrequency,
    /// Push-only ratios feeding the work-life balance score.
    /// `None` when no Push event carries a usable timestamp.
    pub push_balance_ratios: Option<BalanceRatios>,
    pub commit_patterns: CommitPatterns,
    pub activity_hours: ActivityHours,
    pub project_diversity: u32,
}

impl ActivityMetrics {
    pub fn is_empty(&self) -> bool {
        self.event_count == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceRatios {
    pub weekend_ratio: f64,
    pub late_night_ratio: f64,
}

pub struct MetricAggregator<'a> {
    events: &'a [ClassifiedEvent],
    now: DateTime<Utc>,
}

impl<'a> MetricAggregator<'a> {
    pub fn new(events: &'a [ClassifiedEvent], now: DateTime<Utc>) -> Self {
        Self { events, now }
    }

    pub fn collect(&self) -> ActivityMetrics {
        let metrics = ActivityMetrics {
            event_count: self.events.len(),
            total_commits: self.countable_count(),
            average_commits_per_day: self.average_commits_per_day(),
            late_night_commits: self.late_night_commits(),
            weekend_commit_ratio: self.weekend_ratio(),
            consecutive_days: self.consecutive_days(),
            idle_days: self.idle_days(),
            trend: self.trend(),
            commit_frequency: self.commit_frequency(),
            push_balance_ratios: self.push_balance_ratios(),
            commit_patterns: self.commit_patterns(),
            activity_hours: self.activity_hours(),
            project_diversity: self.project_diversity(),
        };

        tracing::debug!(
            "Aggregated {} events: {} countable, streak {}, idle {} days, trend {}",
            metrics.event_count,
            metrics.total_commits,
            metrics.consecutive_days,
            metrics.idle_days,
            metrics.trend
        );

        metrics
    }

    fn countable(&self) -> impl Iterator<Item = &'a ClassifiedEvent> {
        countable(self.events)
    }

    fn pushes(&self) -> impl Iterator<Item = &'a ClassifiedEvent> {
        pushes(self.events)
    }

    fn timed_countable(&self) -> impl Iterator<Item = &'a EventTiming> {
        countable(self.events).filter_map(|e| e.timing.as_ref())
    }

    fn timed_pushes(&self) -> impl Iterator<Item = &'a EventTiming> {
        pushes(self.events).filter_map(|e| e.timing.as_ref())
    }

    /// Type-only count; events with bad timestamps still count here.
    pub fn countable_count(&self) -> u32 {
        self.countable().count() as u32
    }

    pub fn push_count(&self) -> u32 {
        self.pushes().count() as u32
    }

    pub fn average_commits_per_day(&self) -> f64 {
        self.countable_count() as f64 / AVERAGE_WINDOW_DAYS
    }

    pub fn late_night_commits(&self) -> u32 {
        self.timed_countable().filter(|t| t.is_late_night).count() as u32
    }

    pub fn weekend_ratio(&self) -> f64 {
        let (weekend, total) = self
            .timed_countable()
            .fold((0, 0), |(w, n), t| (w + t.is_weekend as usize, n + 1));
        percentage(weekend, total)
    }

    /// Longest run of calendar-consecutive days with countable activity.
    ///
    /// Dates are re-sorted here, so input order never matters. Repeats on the
    /// same date neither extend nor break a run.
    pub fn consecutive_days(&self) -> u32 {
        let mut dates: Vec<NaiveDate> = self.timed_countable().map(|t| t.date).collect();
        dates.sort_unstable();
        dates.dedup();

        if dates.is_empty() {
            return 0;
        }

        let mut longest = 1;
        let mut current = 1;
        for pair in dates.windows(2) {
            if pair[0].succ_opt() == Some(pair[1]) {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 1;
            }
        }

        longest
    }

    /// Whole days since the latest Push event; 0 when there is none.
    pub fn idle_days(&self) -> u32 {
        let latest = self
            .timed_pushes()
            .map(|t| t.timestamp.with_timezone(&Utc))
            .max();

        match latest {
            Some(last_push) => {
                let elapsed = (self.now - last_push).num_seconds();
                elapsed.div_euclid(SECONDS_PER_DAY).max(0) as u32
            }
            None => 0,
        }
    }

    pub fn trend(&self) -> Trend {
        if self.events.is_empty() {
            return Trend::Indeterminate;
        }

        let window_start = self.now - Duration::days(TREND_WINDOW_DAYS);
        let recent = self
            .timed_countable()
            .filter(|t| t.timestamp.with_timezone(&Utc) > window_start)
            .count();

        if recent > TREND_POSITIVE_ABOVE {
            Trend::Positive
        } else if recent > TREND_STABLE_ABOVE {
            Trend::Stable
        } else {
            Trend::Negative
        }
    }

    pub fn commit_frequency(&self) -> CommitFrequency {
        let pushes = self.push_count() as f64;
        CommitFrequency {
            daily: pushes / AVERAGE_WINDOW_DAYS,
            weekly: pushes / WEEKS_PER_MONTH,
            monthly: pushes,
        }
    }

    pub fn push_balance_ratios(&self) -> Option<BalanceRatios> {
        let (weekend, late_night, total) =
            self.timed_pushes()
                .fold((0, 0, 0), |(w, l, n), t| {
                    (w + t.is_weekend as usize, l + t.is_late_night as usize, n + 1)
                });

        if total == 0 {
            return None;
        }

        Some(BalanceRatios {
            weekend_ratio: percentage(weekend, total),
            late_night_ratio: percentage(late_night, total),
        })
    }

    pub fn commit_patterns(&self) -> CommitPatterns {
        let mut counts = [0usize; 4];
        for timing in self.timed_pushes() {
            let slot = match timing.hour {
                6..=11 => 0,
                12..=17 => 1,
                18..=21 => 2,
                _ => 3,
            };
            counts[slot] += 1;
        }

        let total: usize = counts.iter().sum();
        CommitPatterns {
            morning: percentage(counts[0], total),
            afternoon: percentage(counts[1], total),
            evening: percentage(counts[2], total),
            night: percentage(counts[3], total),
        }
    }

    pub fn activity_hours(&self) -> ActivityHours {
        let mut hours: ActivityHours = (0..24).map(|h| (hour_label(h), 0)).collect();
        for timing in self.timed_pushes() {
            if let Some(count) = hours.get_mut(&hour_label(timing.hour)) {
                *count += 1;
            }
        }
        hours
    }

    pub fn project_diversity(&self) -> u32 {
        self.pushes()
            .filter_map(|e| e.repo_name.as_deref())
            .collect::<HashSet<_>>()
            .len() as u32
    }
}

fn countable(events: &[ClassifiedEvent]) -> impl Iterator<Item = &ClassifiedEvent> {
    events.iter().filter(|e| e.is_countable())
}

fn pushes(events: &[ClassifiedEvent]) -> impl Iterator<Item = &ClassifiedEvent> {
    events.iter().filter(|e| e.is_push())
}

pub fn average_commits_per_repo(total_commits: u32, repo_count: u32) -> f64 {
    if repo_count == 0 {
        return 0.0;
    }
    total_commits as f64 / repo_count as f64
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}
