use std::time::Duration;

use mission_core::SearchHit;
use mission_ingest::parse_search_output;

use crate::command::run_with_timeout;

pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait::async_trait]
pub trait DocumentSearcher: Send + Sync {
    /// At most `limit` hits for `query`, best first.
    async fn search(&self, query: &str, limit: usize) -> Vec<SearchHit>;
}

/// Searches via `<program> search <query> --json -n <2*limit>`.
pub struct CliDocumentSearcher {
    program: String,
    timeout: Duration,
}

impl CliDocumentSearcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: SEARCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn search_args(query: &str, limit: usize) -> Vec<String> {
    vec![
        "search".to_string(),
        query.to_string(),
        "--json".to_string(),
        "-n".to_string(),
        limit.saturating_mul(2).to_string(),
    ]
}

#[async_trait::async_trait]
impl DocumentSearcher for CliDocumentSearcher {
    async fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        match run_with_timeout(&self.program, &search_args(query, limit), self.timeout).await {
            Some(stdout) => parse_search_output(&stdout, limit),
            None => Vec::new(),
        }
    }
}
