//! Native records → canonical `TimelineEvent` / `ScheduledJob` / `TaskCard`.

use serde_json::Value;

use mission_core::hash::content_id;
use mission_core::text::truncate_chars;
use mission_core::timestamp::coerce_timestamp;
use mission_core::{
    CardKind, Column, EventSource, ScheduledJob, SourceDocument, TaskCard, TimelineEvent,
};

use crate::activity::ActivityRecord;
use crate::checklist::ChecklistItem;
use crate::jobs::CronJob;
use crate::session::SessionSummary;
use crate::status_doc::AgentSection;

const SESSION_TITLE_MAX_CHARS: usize = 60;

pub fn activity_event(record: &ActivityRecord) -> TimelineEvent {
    let title = record
        .task
        .as_deref()
        .or(record.message.as_deref())
        .unwrap_or("Activity");
    TimelineEvent {
        source: EventSource::Activity,
        timestamp: coerce_timestamp(&record.timestamp),
        title: title.to_string(),
        detail: format!("@{}", record.agent.as_deref().unwrap_or("Unknown")),
        origin_id: String::new(),
    }
}

pub fn session_event(summary: &SessionSummary) -> TimelineEvent {
    TimelineEvent {
        source: EventSource::Session,
        timestamp: summary.timestamp,
        title: truncate_chars(&summary.preview, SESSION_TITLE_MAX_CHARS)
            .0
            .to_string(),
        detail: format!("{} messages", summary.message_count),
        origin_id: summary.id.clone(),
    }
}

pub fn scheduled_job(job: &CronJob) -> ScheduledJob {
    ScheduledJob {
        name: job.name.clone().unwrap_or_else(|| "Unnamed".to_string()),
        next_run: job.next_run_ms.map(|ms| ms / 1000.0),
        schedule_description: format!("Cron: {}", job.expr.as_deref().unwrap_or("Unknown")),
        payload: job
            .payload
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default())),
    }
}

/// Cards from the status document, in agent order: current, next, then
/// one blocked card per item.
pub fn status_cards(sections: &[AgentSection]) -> Vec<TaskCard> {
    let mut cards = Vec::new();
    for section in sections {
        let slug = section.agent.slug();
        let card = |prefix: &str, title: &str, column: Column| TaskCard {
            id: content_id(prefix, title),
            title: title.to_string(),
            agent: section.agent,
            column,
            source_document: SourceDocument::StatusDoc,
            project: None,
            kind: CardKind::AgentTask,
        };
        if let Some(current) = &section.current {
            cards.push(card(
                &format!("{slug}-current"),
                current,
                Column::coerce(&section.status),
            ));
        }
        if let Some(next) = &section.next {
            cards.push(card(&format!("{slug}-next"), next, Column::Todo));
        }
        for item in &section.blocked {
            cards.push(card("blocked", item, Column::Blocked));
        }
    }
    cards
}

pub fn checklist_cards(items: &[ChecklistItem]) -> Vec<TaskCard> {
    items
        .iter()
        .map(|item| TaskCard {
            id: content_id("checklist", &item.title),
            title: item.title.clone(),
            agent: item.agent,
            column: if item.checked { Column::Done } else { Column::Todo },
            source_document: SourceDocument::ChecklistDoc,
            project: item.project.clone(),
            kind: CardKind::ChecklistTask,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mission_core::Agent;
    use serde_json::json;

    fn activity(raw: Value) -> ActivityRecord {
        let obj = raw.as_object().cloned().unwrap();
        ActivityRecord {
            timestamp: obj.get("timestamp").cloned().unwrap_or(Value::Null),
            task: obj.get("task").and_then(|v| v.as_str()).map(String::from),
            message: obj.get("message").and_then(|v| v.as_str()).map(String::from),
            agent: obj.get("agent").and_then(|v| v.as_str()).map(String::from),
            raw: obj,
        }
    }

    #[test]
    fn activity_title_fallbacks() {
        let e = activity_event(&activity(json!({"timestamp": 1000, "task": "Build started", "agent": "lead"})));
        assert_eq!(e.title, "Build started");
        assert_eq!(e.detail, "@lead");
        assert_eq!(e.timestamp, 1000.0);
        assert_eq!(e.source, EventSource::Activity);

        let e = activity_event(&activity(json!({"message": "hello"})));
        assert_eq!(e.title, "hello");
        assert_eq!(e.detail, "@Unknown");
        assert_eq!(e.timestamp, 0.0);

        let e = activity_event(&activity(json!({"timestamp": "garbage"})));
        assert_eq!(e.title, "Activity");
        assert_eq!(e.timestamp, 0.0);
    }

    #[test]
    fn session_event_cuts_title() {
        let summary = SessionSummary {
            id: "abc".into(),
            timestamp: 2000.0,
            started_at: None,
            cwd: String::new(),
            message_count: 4,
            preview: "p".repeat(80),
        };
        let e = session_event(&summary);
        assert_eq!(e.title.chars().count(), 60);
        assert_eq!(e.detail, "4 messages");
        assert_eq!(e.origin_id, "abc");
    }

    #[test]
    fn job_defaults() {
        let job = scheduled_job(&CronJob {
            name: None,
            expr: None,
            next_run_ms: Some(1_700_000_000_000.0),
            payload: None,
        });
        assert_eq!(job.name, "Unnamed");
        assert_eq!(job.schedule_description, "Cron: Unknown");
        assert_eq!(job.next_run, Some(1_700_000_000.0));
        assert_eq!(job.payload, json!({}));
    }

    #[test]
    fn status_cards_columns_and_ids() {
        let sections = vec![AgentSection {
            agent: Agent::Lead,
            status: "review".into(),
            current: Some("Review PR #42".into()),
            next: Some("Plan sprint".into()),
            blocked: vec!["Waiting on API key".into()],
        }];
        let cards = status_cards(&sections);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].column, Column::Review);
        assert_eq!(cards[0].id, content_id("lead-current", "Review PR #42"));
        assert_eq!(cards[1].column, Column::Todo);
        assert!(cards[1].id.starts_with("lead-next-"));
        assert_eq!(cards[2].column, Column::Blocked);
        assert!(cards[2].id.starts_with("blocked-"));
        assert!(cards.iter().all(|c| c.kind == CardKind::AgentTask));
    }

    #[test]
    fn idle_status_lands_in_todo() {
        let sections = vec![AgentSection {
            agent: Agent::Writing,
            status: "idle".into(),
            current: Some("Draft intro".into()),
            next: None,
            blocked: Vec::new(),
        }];
        assert_eq!(status_cards(&sections)[0].column, Column::Todo);
    }

    #[test]
    fn checklist_cards_map_checked_to_done() {
        let items = crate::checklist::parse_checklist("- [x] Ship v1 #launch\n- [ ] Write docs @writing\n");
        let cards = checklist_cards(&items);
        assert_eq!(cards[0].column, Column::Done);
        assert_eq!(cards[0].project.as_deref(), Some("launch"));
        assert_eq!(cards[1].column, Column::Todo);
        assert_eq!(cards[1].agent, Agent::Writing);
        assert_eq!(cards[1].source_document, SourceDocument::ChecklistDoc);
    }
}
