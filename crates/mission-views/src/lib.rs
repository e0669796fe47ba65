pub mod feed;
pub mod kanban;
pub mod memories;
pub mod merge;
pub mod query;
pub mod stats;
pub mod upcoming;

pub use feed::{build_feed, FeedItem, FeedOptions};
pub use kanban::{build_kanban, KanbanBoard, KanbanColumn};
pub use memories::MemoryItem;
pub use query::{
    parse_memory_type, parse_source, Dashboard, QueryError, QueryParams, SessionTranscript,
    SourcePaths, View,
};
pub use stats::Stats;
pub use upcoming::{build_upcoming, UpcomingJob, UPCOMING_LIMIT};
