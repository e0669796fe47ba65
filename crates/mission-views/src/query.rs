//! Read-only query interface.
//!
//! Every call re-reads its sources; nothing is cached between calls. Source
//! problems surface as empty results. Only caller mistakes are errors.

use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use mission_core::memory::MemoryType;
use mission_core::timestamp::now_epoch;
use mission_core::{EventSource, SearchHit};
use mission_external::{DocumentSearcher, JobLister, MemoryStore};
use mission_ingest::document::{read_capped, read_document, resolve_document_path, DocumentView};
use mission_ingest::{
    count_activity_lines, count_markdown_files, count_session_files, load_activities,
    load_sessions, read_session_messages, session_file, SessionMessage,
};

use crate::feed::{build_feed, FeedItem, FeedOptions};
use crate::kanban::{build_kanban, KanbanBoard};
use crate::memories::{listed_types, order_memories, MemoryItem, MEMORY_SEARCH_MIN_CONFIDENCE};
use crate::stats::Stats;
use crate::upcoming::{build_upcoming, UpcomingJob, UPCOMING_LIMIT};

pub const DOCUMENT_MAX_CHARS: usize = 50_000;
/// Cap on the status and checklist documents read for the board.
pub const PLANNING_DOC_MAX_CHARS: usize = 200_000;
pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const DEFAULT_MEMORY_LIMIT: usize = 50;

// ── Errors ──────────────────────────────────────────────────────────

/// Caller mistakes. "Nothing found" is never an error.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("unknown view '{0}' (expected one of: {views})", views = View::names())]
    UnknownView(String),
    #[error("unknown source filter '{0}' (expected activity or session)")]
    UnknownSource(String),
    #[error("unknown memory type '{0}' (expected personal or document)")]
    UnknownMemoryType(String),
    #[error("search query is empty")]
    EmptyQuery,
    #[error("session id must be a plain file name, got '{0}'")]
    InvalidSessionId(String),
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),
    #[error("failed to serialize view: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ── View names and filters ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Feed,
    Upcoming,
    Kanban,
    Search,
    Memories,
    Session,
    Document,
    Stats,
}

impl View {
    pub const ALL: [View; 8] = [
        View::Feed,
        View::Upcoming,
        View::Kanban,
        View::Search,
        View::Memories,
        View::Session,
        View::Document,
        View::Stats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Feed => "feed",
            View::Upcoming => "upcoming",
            View::Kanban => "kanban",
            View::Search => "search",
            View::Memories => "memories",
            View::Session => "session",
            View::Document => "document",
            View::Stats => "stats",
        }
    }

    fn names() -> String {
        View::ALL.map(|v| v.as_str()).join(", ")
    }
}

impl FromStr for View {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        View::ALL
            .into_iter()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| QueryError::UnknownView(s.to_string()))
    }
}

pub fn parse_source(s: &str) -> Result<EventSource, QueryError> {
    EventSource::parse(s).ok_or_else(|| QueryError::UnknownSource(s.to_string()))
}

pub fn parse_memory_type(s: &str) -> Result<MemoryType, QueryError> {
    MemoryType::parse(s).ok_or_else(|| QueryError::UnknownMemoryType(s.to_string()))
}

/// A session id names exactly one file inside the sessions directory.
fn validate_session_id(id: &str) -> Result<(), QueryError> {
    let mut components = Path::new(id).components();
    let plain = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !id.contains(['/', '\\']);
    if plain {
        Ok(())
    } else {
        Err(QueryError::InvalidSessionId(id.to_string()))
    }
}

// ── Sources ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePaths {
    pub activity_log: PathBuf,
    pub sessions_dir: PathBuf,
    pub status_doc: PathBuf,
    pub checklist_doc: PathBuf,
    /// Root for document references and `qmd://obsidian/` URIs.
    pub notes_dir: PathBuf,
    /// Root whose markdown files are counted in stats.
    pub planning_dir: PathBuf,
}

fn read_planning_doc(path: &Path) -> Option<String> {
    match read_capped(path, PLANNING_DOC_MAX_CHARS) {
        Ok((content, truncated)) => {
            if truncated {
                tracing::debug!(path = %path.display(), "planning document truncated");
            }
            Some(content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "planning document unreadable");
            None
        }
    }
}

// ── Results ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionTranscript {
    pub id: String,
    pub message_count: usize,
    pub messages: Vec<SessionMessage>,
}

/// String-typed parameters for [`Dashboard::query`].
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub limit: Option<usize>,
    pub source: Option<String>,
    pub memory_type: Option<String>,
    pub query: Option<String>,
    pub id: Option<String>,
    pub path: Option<String>,
    /// Memories view: list memories awaiting review instead.
    pub pending: bool,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ── Dashboard ───────────────────────────────────────────────────────

pub struct Dashboard {
    paths: SourcePaths,
    jobs: Box<dyn JobLister>,
    searcher: Box<dyn DocumentSearcher>,
    memory: Box<dyn MemoryStore>,
    fixed_now: Option<f64>,
}

impl Dashboard {
    pub fn new(
        paths: SourcePaths,
        jobs: impl JobLister + 'static,
        searcher: impl DocumentSearcher + 'static,
        memory: impl MemoryStore + 'static,
    ) -> Self {
        Self {
            paths,
            jobs: Box::new(jobs),
            searcher: Box::new(searcher),
            memory: Box::new(memory),
            fixed_now: None,
        }
    }

    /// Pin the clock used for relative labels and the imminent flag.
    pub fn with_fixed_now(mut self, now: f64) -> Self {
        self.fixed_now = Some(now);
        self
    }

    pub fn paths(&self) -> &SourcePaths {
        &self.paths
    }

    fn now(&self) -> f64 {
        self.fixed_now.unwrap_or_else(now_epoch)
    }

    pub fn feed(&self, options: &FeedOptions) -> Vec<FeedItem> {
        let activities = load_activities(&self.paths.activity_log, options.activity_tail);
        let sessions = load_sessions(&self.paths.sessions_dir, options.session_limit);
        build_feed(&activities, &sessions, options, self.now())
    }

    pub async fn upcoming(&self, limit: usize) -> Vec<UpcomingJob> {
        let listing = self.jobs.list_jobs().await;
        build_upcoming(&listing, self.now(), limit)
    }

    pub fn kanban(&self) -> KanbanBoard {
        let status = read_planning_doc(&self.paths.status_doc);
        let checklist = read_planning_doc(&self.paths.checklist_doc);
        build_kanban(status.as_deref(), checklist.as_deref())
    }

    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, QueryError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        Ok(self.searcher.search(query, limit).await)
    }

    /// With a non-blank `query`, similarity search (minimum confidence 0.5)
    /// narrowed to `memory_type` when given. Otherwise the newest memories
    /// of the selected types.
    pub async fn memories(
        &self,
        limit: usize,
        memory_type: Option<MemoryType>,
        query: Option<&str>,
    ) -> Vec<MemoryItem> {
        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            return match self
                .memory
                .search(query, limit, MEMORY_SEARCH_MIN_CONFIDENCE)
                .await
            {
                Ok(records) => records
                    .into_iter()
                    .filter(|r| memory_type.map_or(true, |t| r.memory_type == t))
                    .take(limit)
                    .map(MemoryItem::from)
                    .collect(),
                Err(e) => {
                    tracing::warn!(error = %e, "memory search failed");
                    Vec::new()
                }
            };
        }

        let mut records = Vec::new();
        for t in listed_types(memory_type) {
            match self.memory.list(t).await {
                Ok(mut listed) => {
                    // Records carry the type of the table they came from.
                    listed.iter_mut().for_each(|r| r.memory_type = t);
                    records.extend(listed);
                }
                Err(e) => {
                    tracing::warn!(memory_type = t.as_str(), error = %e, "memory listing failed");
                    return Vec::new();
                }
            }
        }
        order_memories(records, limit)
    }

    /// Memories awaiting review, in store order.
    pub async fn pending_memories(&self, limit: usize) -> Vec<MemoryItem> {
        match self.memory.pending().await {
            Ok(records) => records.into_iter().take(limit).map(MemoryItem::from).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "pending memory listing failed");
                Vec::new()
            }
        }
    }

    /// Full transcript of one session. `Ok(None)` when no such file exists.
    pub fn session(&self, id: &str) -> Result<Option<SessionTranscript>, QueryError> {
        validate_session_id(id)?;
        let Some(path) = session_file(&self.paths.sessions_dir, id) else {
            return Ok(None);
        };
        match read_session_messages(&path) {
            Ok(messages) => Ok(Some(SessionTranscript {
                id: id.to_string(),
                message_count: messages.len(),
                messages,
            })),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "session transcript unreadable");
                Ok(None)
            }
        }
    }

    pub fn document(&self, reference: &str) -> Option<DocumentView> {
        let path = resolve_document_path(&self.paths.notes_dir, reference);
        match read_document(&path, DOCUMENT_MAX_CHARS) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "document unreadable");
                None
            }
        }
    }

    pub async fn stats(&self) -> Stats {
        let memories = self.memory.stats().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "memory stats unavailable");
            Default::default()
        });
        Stats {
            activities: count_activity_lines(&self.paths.activity_log),
            sessions: count_session_files(&self.paths.sessions_dir),
            cron_jobs: self.jobs.list_jobs().await.len(),
            planning_files: count_markdown_files(&self.paths.planning_dir),
            memories,
        }
    }

    /// Name-addressed entry point: run `view` with string parameters and
    /// return its JSON rendering. Blank filters count as absent.
    pub async fn query(&self, view: &str, params: &QueryParams) -> Result<Value, QueryError> {
        let value = match view.parse::<View>()? {
            View::Feed => {
                let source = non_blank(&params.source).map(parse_source).transpose()?;
                let defaults = FeedOptions::default();
                let options = FeedOptions {
                    limit: params.limit.unwrap_or(defaults.limit),
                    source,
                    ..defaults
                };
                serde_json::to_value(self.feed(&options))?
            }
            View::Upcoming => {
                serde_json::to_value(self.upcoming(params.limit.unwrap_or(UPCOMING_LIMIT)).await)?
            }
            View::Kanban => serde_json::to_value(self.kanban())?,
            View::Search => {
                let query = params.query.as_deref().unwrap_or_default();
                let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
                serde_json::to_value(self.search(query, limit).await?)?
            }
            View::Memories if params.pending => serde_json::to_value(
                self.pending_memories(params.limit.unwrap_or(DEFAULT_MEMORY_LIMIT))
                    .await,
            )?,
            View::Memories => {
                let memory_type = non_blank(&params.memory_type)
                    .map(parse_memory_type)
                    .transpose()?;
                let limit = params.limit.unwrap_or(DEFAULT_MEMORY_LIMIT);
                serde_json::to_value(
                    self.memories(limit, memory_type, params.query.as_deref())
                        .await,
                )?
            }
            View::Session => {
                let id = non_blank(&params.id).ok_or(QueryError::MissingParameter("id"))?;
                serde_json::to_value(self.session(id)?)?
            }
            View::Document => {
                let path = non_blank(&params.path).ok_or(QueryError::MissingParameter("path"))?;
                serde_json::to_value(self.document(path))?
            }
            View::Stats => serde_json::to_value(self.stats().await)?,
        };
        Ok(value)
    }
}
