use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::models::event::{ClassifiedEvent, Event, EventCategory, EventTiming};

/// Late-night window is [22:00, 06:00).
const LATE_NIGHT_START: u32 = 22;
const LATE_NIGHT_END: u32 = 6;

pub struct EventClassifier;

impl EventClassifier {
    /// Classify every event in one pass.
    ///
    /// Never fails: events with a missing or malformed `created_at` come back
    /// with `timing: None` and are left for each metric to exclude.
    pub fn classify(events: &[Event]) -> Vec<ClassifiedEvent> {
        events.iter().map(Self::classify_one).collect()
    }

    pub fn classify_one(event: &Event) -> ClassifiedEvent {
        let timing = event.created_at.as_deref().and_then(|raw| {
            let timing = parse_timing(raw);
            if timing.is_none() {
                tracing::debug!(
                    "Skipping unparseable created_at {:?} on {}",
                    raw,
                    event.event_type
                );
            }
            timing
        });

        ClassifiedEvent {
            category: EventCategory::from(event.event_type.as_str()),
            repo_name: event.repo_name().map(str::to_string),
            timing,
        }
    }
}

/// ISO 8601 date-time with an offset, seconds optional.
const MINUTE_PRECISION_FORMAT: &str = "%Y-%m-%dT%H:%M%#z";

fn parse_timing(raw: &str) -> Option<EventTiming> {
    let timestamp = parse_timestamp(raw)?;
    let local = timestamp.naive_local();
    let hour = local.hour();
    let weekday = local.weekday().number_from_monday();

    Some(EventTiming {
        timestamp,
        date: local.date(),
        hour,
        weekday,
        is_weekend: weekday >= 6,
        is_late_night: is_late_night(hour),
    })
}

/// Parse an offset date-time. A trailing region id such as `[Europe/Paris]`
/// is dropped; the explicit offset before it is authoritative.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let mut value = raw.trim();
    if value.ends_with(']') {
        if let Some(start) = value.rfind('[') {
            value = &value[..start];
        }
    }

    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, MINUTE_PRECISION_FORMAT))
        .ok()
}

pub fn is_late_night(hour: u32) -> bool {
    hour >= LATE_NIGHT_START || hour < LATE_NIGHT_END
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_classify_friday_late_night() {
        let event = Event::new("PushEvent", "2024-01-05T23:00:00Z").with_repo("a/b");
        let classified = EventClassifier::classify_one(&event);

        assert_eq!(classified.category, EventCategory::Push);
        assert_eq!(classified.repo_name.as_deref(), Some("a/b"));

        let timing = classified.timing.unwrap();
        assert_eq!(timing.hour, 23);
        assert_eq!(timing.weekday, 5);
        assert_eq!(timing.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert!(!timing.is_weekend);
        assert!(timing.is_late_night);
    }

    #[test]
    fn test_classify_uses_wall_clock_of_offset() {
        // 02:30 UTC on a Sunday is still Saturday evening at -05:00
        let event = Event::new("CreateEvent", "2024-01-06T21:30:00-05:00");
        let timing = EventClassifier::classify_one(&event).timing.unwrap();

        assert_eq!(timing.hour, 21);
        assert_eq!(timing.weekday, 6);
        assert!(timing.is_weekend);
        assert!(!timing.is_late_night);
    }

    #[test]
    fn test_classify_minute_precision_timestamp() {
        let event = Event::new("PushEvent", "2024-01-05T23:00Z");
        let timing = EventClassifier::classify_one(&event).timing.unwrap();

        assert_eq!(timing.hour, 23);
        assert_eq!(timing.weekday, 5);
        assert!(timing.is_late_night);

        let offset = Event::new("PushEvent", "2024-01-06T09:15+02:00");
        let timing = EventClassifier::classify_one(&offset).timing.unwrap();
        assert_eq!(timing.hour, 9);
        assert!(timing.is_weekend);
    }

    #[test]
    fn test_classify_drops_region_id_suffix() {
        let event = Event::new("PushEvent", "2024-01-05T23:00:00+01:00[Europe/Paris]");
        let timing = EventClassifier::classify_one(&event).timing.unwrap();

        assert_eq!(timing.hour, 23);
        assert_eq!(timing.timestamp.offset().local_minus_utc(), 3600);
        assert_eq!(timing.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_classify_fractional_seconds() {
        let event = Event::new("PushEvent", "2024-01-05T23:00:00.123Z");
        let timing = EventClassifier::classify_one(&event).timing.unwrap();
        assert_eq!(timing.hour, 23);
    }

    #[test]
    fn test_parse_timestamp_rejects_missing_offset() {
        assert!(parse_timestamp("2024-01-05T23:00:00").is_none());
        assert!(parse_timestamp("2024-01-05T23:00").is_none());
        assert!(parse_timestamp("[Europe/Paris]").is_none());
    }

    #[test]
    fn test_unparseable_timestamp_has_no_timing() {
        let event = Event::new("PushEvent", "yesterday at noon");
        let classified = EventClassifier::classify_one(&event);
        assert_eq!(classified.category, EventCategory::Push);
        assert!(classified.timing.is_none());

        let missing = Event {
            event_type: "PushEvent".to_string(),
            created_at: None,
            repo: None,
        };
        assert!(EventClassifier::classify_one(&missing).timing.is_none());
    }

    #[test]
    fn test_late_night_window_bounds() {
        assert!(is_late_night(22));
        assert!(is_late_night(0));
        assert!(is_late_night(5));
        assert!(!is_late_night(6));
        assert!(!is_late_night(21));
    }

    #[test]
    fn test_classify_preserves_order_and_length() {
        let events = vec![
            Event::new("WatchEvent", "2024-01-01T10:00:00Z"),
            Event::new("PushEvent", "2024-01-02T10:00:00Z"),
        ];
        let classified = EventClassifier::classify(&events);
        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].category, EventCategory::Other);
        assert_eq!(classified[1].category, EventCategory::Push);
    }
}
