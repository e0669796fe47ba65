use serde_json::Value;

/// The only schedule kind that participates in the upcoming view.
pub const CRON_KIND: &str = "cron";

/// A cron-kind job as read from the scheduler listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CronJob {
    pub name: Option<String>,
    pub expr: Option<String>,
    /// `state.nextRunAtMs`, epoch milliseconds. Zero is treated as absent.
    pub next_run_ms: Option<f64>,
    pub payload: Option<Value>,
}

/// Extract the `jobs` array from the scheduler's JSON listing. Anything
/// unparsable is an empty listing.
pub fn parse_job_listing(stdout: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(stdout) {
        Ok(Value::Object(mut obj)) => match obj.remove("jobs") {
            Some(Value::Array(jobs)) => jobs,
            _ => Vec::new(),
        },
        Ok(_) | Err(_) => {
            tracing::debug!("job listing is not a JSON object with a jobs array");
            Vec::new()
        }
    }
}

/// Keep only jobs whose `schedule.kind` is `cron`.
pub fn cron_jobs(jobs: &[Value]) -> Vec<CronJob> {
    jobs.iter()
        .filter(|job| {
            job.get("schedule")
                .and_then(|s| s.get("kind"))
                .and_then(|k| k.as_str())
                == Some(CRON_KIND)
        })
        .map(|job| CronJob {
            name: job.get("name").and_then(|v| v.as_str()).map(str::to_string),
            expr: job
                .get("schedule")
                .and_then(|s| s.get("expr"))
                .and_then(|v| v.as_str())
                .map(str::to_string),
            next_run_ms: job
                .get("state")
                .and_then(|s| s.get("nextRunAtMs"))
                .and_then(|v| v.as_f64())
                .filter(|ms| *ms != 0.0 && ms.is_finite()),
            payload: job.get("payload").cloned(),
        })
        .collect()
}
