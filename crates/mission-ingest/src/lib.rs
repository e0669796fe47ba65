pub mod activity;
pub mod checklist;
pub mod document;
pub mod jobs;
pub mod jsonl;
pub mod normalize;
pub mod search;
pub mod session;
pub mod status_doc;

pub use activity::{count_activity_lines, load_activities, ActivityRecord};
pub use checklist::{parse_checklist, ChecklistItem};
pub use document::{
    count_markdown_files, read_capped, read_document, resolve_document_path, DocumentView,
};
pub use jobs::{cron_jobs, parse_job_listing, CronJob};
pub use search::parse_search_output;
pub use session::{
    count_session_files, load_sessions, read_session_messages, session_file, SessionMessage,
    SessionSummary,
};
pub use status_doc::{parse_status_doc, AgentSection};
