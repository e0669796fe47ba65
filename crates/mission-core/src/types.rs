use serde::{Deserialize, Serialize};

use crate::text::title_key;

/// Where a timeline event was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Activity,
    Session,
}

impl EventSource {
    pub const ALL: [EventSource; 2] = [EventSource::Activity, EventSource::Session];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventSource::Activity => "activity",
            EventSource::Session => "session",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "activity" => Some(EventSource::Activity),
            "session" => Some(EventSource::Session),
            _ => None,
        }
    }
}

/// Kanban workflow column. The declaration order is the board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Todo,
    InProgress,
    Review,
    Done,
    Blocked,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Todo,
        Column::InProgress,
        Column::Review,
        Column::Done,
        Column::Blocked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Todo => "todo",
            Column::InProgress => "in_progress",
            Column::Review => "review",
            Column::Done => "done",
            Column::Blocked => "blocked",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Todo => "To Do",
            Column::InProgress => "In Progress",
            Column::Review => "Review",
            Column::Done => "Done",
            Column::Blocked => "Blocked",
        }
    }

    /// Strict parse, used for query parameters.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "todo" => Some(Column::Todo),
            "in_progress" => Some(Column::InProgress),
            "review" => Some(Column::Review),
            "done" => Some(Column::Done),
            "blocked" => Some(Column::Blocked),
            _ => None,
        }
    }

    /// Lenient coercion for status strings found in documents.
    /// Anything unrecognized (including "idle") lands in `Todo`.
    pub fn coerce(s: &str) -> Self {
        Self::parse(s).unwrap_or(Column::Todo)
    }
}

/// Task owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Agent {
    Lead,
    Research,
    Writing,
    ProductOwner,
}

impl Agent {
    /// Fixed scan order for the status document.
    pub const ALL: [Agent; 4] = [
        Agent::Lead,
        Agent::Research,
        Agent::Writing,
        Agent::ProductOwner,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Agent::Lead => "lead",
            Agent::Research => "research",
            Agent::Writing => "writing",
            Agent::ProductOwner => "product-owner",
        }
    }

    /// Name as it appears in status-document headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Agent::Lead => "Lead",
            Agent::Research => "Research",
            Agent::Writing => "Writing",
            Agent::ProductOwner => "Product Owner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceDocument {
    StatusDoc,
    ChecklistDoc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardKind {
    AgentTask,
    ChecklistTask,
}

/// An observed occurrence, shown in the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub source: EventSource,
    /// Epoch seconds. `0.0` when the source timestamp could not be read.
    pub timestamp: f64,
    pub title: String,
    pub detail: String,
    /// Session id for session events, empty for activity events.
    #[serde(default)]
    pub origin_id: String,
}

/// A future unit of work derived from a cron-like definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub name: String,
    /// Epoch seconds.
    pub next_run: Option<f64>,
    pub schedule_description: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// A unit of work with a workflow status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCard {
    /// Content-addressed; changes whenever the title text changes.
    pub id: String,
    pub title: String,
    pub agent: Agent,
    pub column: Column,
    pub source_document: SourceDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(rename = "type")]
    pub kind: CardKind,
}

impl TaskCard {
    /// Identity used for board-wide deduplication.
    pub fn dedup_key(&self) -> String {
        title_key(&self.title)
    }
}

/// A ranked hit from the document search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub path: String,
    pub title: String,
    pub preview: String,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_coerce_defaults_to_todo() {
        assert_eq!(Column::coerce("in_progress"), Column::InProgress);
        assert_eq!(Column::coerce("In-Progress"), Column::InProgress);
        assert_eq!(Column::coerce("BLOCKED"), Column::Blocked);
        assert_eq!(Column::coerce("idle"), Column::Todo);
        assert_eq!(Column::coerce(""), Column::Todo);
    }

    #[test]
    fn column_parse_is_strict() {
        assert_eq!(Column::parse("review"), Some(Column::Review));
        assert_eq!(Column::parse("idle"), None);
    }

    #[test]
    fn column_serializes_snake_case() {
        let json = serde_json::to_string(&Column::InProgress).unwrap();
        assert_eq!(json, r#""in_progress""#);
    }

    #[test]
    fn agent_serializes_kebab_case() {
        let json = serde_json::to_string(&Agent::ProductOwner).unwrap();
        assert_eq!(json, r#""product-owner""#);
        assert_eq!(Agent::ProductOwner.slug(), "product-owner");
    }

    #[test]
    fn event_source_parse() {
        assert_eq!(EventSource::parse("Session"), Some(EventSource::Session));
        assert_eq!(EventSource::parse("cron"), None);
    }

    #[test]
    fn dedup_key_ignores_case_and_whitespace() {
        let card = |title: &str| TaskCard {
            id: "x".into(),
            title: title.into(),
            agent: Agent::Lead,
            column: Column::Todo,
            source_document: SourceDocument::ChecklistDoc,
            project: None,
            kind: CardKind::ChecklistTask,
        };
        assert_eq!(
            card("Write report").dedup_key(),
            card("write  report ").dedup_key()
        );
    }

    #[test]
    fn task_card_serializes_kind_as_type() {
        let card = TaskCard {
            id: "x".into(),
            title: "Ship".into(),
            agent: Agent::Lead,
            column: Column::Done,
            source_document: SourceDocument::ChecklistDoc,
            project: None,
            kind: CardKind::ChecklistTask,
        };
        let v = serde_json::to_value(&card).unwrap();
        assert_eq!(v["type"], "checklist-task");
        assert!(v.get("kind").is_none());
        let back: TaskCard = serde_json::from_value(v).unwrap();
        assert_eq!(back, card);
    }
}
