use serde::Serialize;

use mission_core::timestamp::relative_label;
use mission_core::{EventSource, TimelineEvent};
use mission_ingest::normalize::{activity_event, session_event};
use mission_ingest::{ActivityRecord, SessionSummary};

use crate::merge::merge_events;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedOptions {
    pub limit: usize,
    /// Activity-log lines read from the end of the file.
    pub activity_tail: usize,
    /// Newest session files considered.
    pub session_limit: usize,
    pub source: Option<EventSource>,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            limit: 50,
            activity_tail: 50,
            session_limit: 20,
            source: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub event: TimelineEvent,
    /// `3d ago`, `Just now`, `Unknown`...
    pub age: String,
}

/// Build the feed from already-loaded records. `activities` are in file
/// order and are reversed so the newest line comes first.
pub fn build_feed(
    activities: &[ActivityRecord],
    sessions: &[SessionSummary],
    options: &FeedOptions,
    now: f64,
) -> Vec<FeedItem> {
    let wants = |source: EventSource| options.source.map_or(true, |s| s == source);

    let activity_events = if wants(EventSource::Activity) {
        activities.iter().rev().map(activity_event).collect()
    } else {
        Vec::new()
    };
    let session_events = if wants(EventSource::Session) {
        sessions.iter().map(session_event).collect()
    } else {
        Vec::new()
    };

    merge_events(activity_events, session_events)
        .into_iter()
        .take(options.limit)
        .map(|event| FeedItem {
            age: relative_label(event.timestamp, now),
            event,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn activity(ts: f64, task: &str) -> ActivityRecord {
        let raw = json!({"timestamp": ts, "task": task});
        ActivityRecord {
            timestamp: Value::from(ts),
            task: Some(task.to_string()),
            message: None,
            agent: None,
            raw: raw.as_object().cloned().unwrap(),
        }
    }

    fn session(id: &str, ts: f64) -> SessionSummary {
        SessionSummary {
            id: id.into(),
            timestamp: ts,
            started_at: None,
            cwd: String::new(),
            message_count: 2,
            preview: format!("session {id}"),
        }
    }

    #[test]
    fn newest_first_with_labels() {
        let feed = build_feed(
            &[activity(100.0, "old"), activity(7200.0, "new")],
            &[session("s1", 3700.0)],
            &FeedOptions::default(),
            7300.0,
        );
        let titles: Vec<&str> = feed.iter().map(|i| i.event.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "session s1", "old"]);
        assert_eq!(feed[0].age, "1m ago");
        assert_eq!(feed[1].age, "1h ago");
    }

    #[test]
    fn equal_timestamps_keep_reversed_file_order() {
        let feed = build_feed(
            &[activity(5.0, "first-line"), activity(5.0, "second-line")],
            &[],
            &FeedOptions::default(),
            10.0,
        );
        assert_eq!(feed[0].event.title, "second-line");
    }

    #[test]
    fn source_filter_and_limit() {
        let options = FeedOptions {
            limit: 1,
            source: Some(EventSource::Session),
            ..FeedOptions::default()
        };
        let feed = build_feed(
            &[activity(900.0, "a")],
            &[session("s1", 10.0), session("s2", 20.0)],
            &options,
            1000.0,
        );
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].event.origin_id, "s2");
    }

    #[test]
    fn zero_timestamp_reads_unknown() {
        let feed = build_feed(&[activity(0.0, "x")], &[], &FeedOptions::default(), 1000.0);
        assert_eq!(feed[0].age, "Unknown");
    }

    #[test]
    fn serializes_flat() {
        let feed = build_feed(&[activity(1.0, "x")], &[], &FeedOptions::default(), 100.0);
        let v = serde_json::to_value(&feed[0]).unwrap();
        assert_eq!(v["source"], "activity");
        assert_eq!(v["title"], "x");
        assert_eq!(v["age"], "1m ago");
    }
}
