use std::time::Duration;

use serde_json::Value;

use mission_ingest::parse_job_listing;

use crate::command::run_with_timeout;

pub const JOB_LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of the scheduler's job definitions (all kinds, unfiltered).
#[async_trait::async_trait]
pub trait JobLister: Send + Sync {
    async fn list_jobs(&self) -> Vec<Value>;
}

/// Lists jobs via `<program> cron list --json`.
pub struct CliJobLister {
    program: String,
    timeout: Duration,
}

impl CliJobLister {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: JOB_LIST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn args() -> Vec<String> {
        ["cron", "list", "--json"].map(String::from).to_vec()
    }
}

#[async_trait::async_trait]
impl JobLister for CliJobLister {
    async fn list_jobs(&self) -> Vec<Value> {
        match run_with_timeout(&self.program, &Self::args(), self.timeout).await {
            Some(stdout) => parse_job_listing(&stdout),
            None => Vec::new(),
        }
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    fn script(dir: &std::path::Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("fake-scheduler");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[tokio::test]
    async fn parses_listing_from_program() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(
            dir.path(),
            r#"[ "$1 $2 $3" = "cron list --json" ] || exit 2
echo '{"jobs":[{"name":"nightly","schedule":{"kind":"cron","expr":"0 3 * * *"}}]}'"#,
        );
        let jobs = CliJobLister::new(program).list_jobs().await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["name"], "nightly");
    }

    #[tokio::test]
    async fn missing_program_lists_nothing() {
        let jobs = CliJobLister::new("no-such-scheduler-binary").list_jobs().await;
        assert!(jobs.is_empty());
    }
}
