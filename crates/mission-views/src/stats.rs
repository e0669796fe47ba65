use serde::Serialize;

use mission_core::memory::MemoryStats;

/// Source counts shown on the stats page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Non-blank activity-log lines.
    pub activities: usize,
    pub sessions: usize,
    /// Scheduler jobs of every kind.
    pub cron_jobs: usize,
    /// Markdown files under the planning root.
    pub planning_files: usize,
    pub memories: MemoryStats,
}
