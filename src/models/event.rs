use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single entry from the GitHub user events feed.
///
/// `created_at` is kept as the raw string so that malformed timestamps survive
/// deserialization and can be skipped per event during classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub repo: Option<EventRepo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRepo {
    #[serde(default)]
    pub name: Option<String>,
}

impl Event {
    pub fn new(event_type: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            created_at: Some(created_at.into()),
            repo: None,
        }
    }

    pub fn with_repo(mut self, name: impl Into<String>) -> Self {
        self.repo = Some(EventRepo {
            name: Some(name.into()),
        });
        self
    }

    pub fn repo_name(&self) -> Option<&str> {
        self.repo.as_ref().and_then(|r| r.name.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Push,
    Create,
    CommitComment,
    Other,
}

impl EventCategory {
    /// Push, Create and CommitComment events count as commit activity.
    pub fn is_countable(self) -> bool {
        !matches!(self, EventCategory::Other)
    }

    pub fn is_push(self) -> bool {
        matches!(self, EventCategory::Push)
    }
}

impl From<&str> for EventCategory {
    fn from(s: &str) -> Self {
        match s {
            "PushEvent" => EventCategory::Push,
            "CreateEvent" => EventCategory::Create,
            "CommitCommentEvent" => EventCategory::CommitComment,
            _ => EventCategory::Other,
        }
    }
}

/// Temporal attributes derived from a parseable `created_at`.
///
/// Hour, weekday and date are the wall-clock values in the timestamp's own offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTiming {
    pub timestamp: DateTime<FixedOffset>,
    pub date: NaiveDate,
    pub hour: u32,
    /// ISO weekday, 1 = Monday .. 7 = Sunday
    pub weekday: u32,
    pub is_weekend: bool,
    pub is_late_night: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEvent {
    pub category: EventCategory,
    pub repo_name: Option<String>,
    pub timing: Option<EventTiming>,
}

impl ClassifiedEvent {
    pub fn is_countable(&self) -> bool {
        self.category.is_countable()
    }

    pub fn is_push(&self) -> bool {
        self.category.is_push()
    }
}
