use serde::Serialize;
use serde_json::Value;

use mission_core::timestamp::format_utc;
use mission_core::ScheduledJob;
use mission_ingest::cron_jobs;
use mission_ingest::normalize::scheduled_job;

use crate::merge::order_jobs;

pub const UPCOMING_LIMIT: usize = 10;
/// A job due within this many seconds is imminent.
pub const IMMINENT_WINDOW_SECS: f64 = 3600.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingJob {
    #[serde(flatten)]
    pub job: ScheduledJob,
    pub imminent: bool,
    /// `next_run` as `YYYY-MM-DD HH:MM:SS` UTC.
    pub next_run_utc: String,
}

/// The nearest cron jobs with a known next run, soonest first.
pub fn build_upcoming(listing: &[Value], now: f64, limit: usize) -> Vec<UpcomingJob> {
    let jobs: Vec<ScheduledJob> = cron_jobs(listing)
        .iter()
        .map(scheduled_job)
        .filter(|job| job.next_run.is_some())
        .collect();

    order_jobs(jobs)
        .into_iter()
        .take(limit)
        .filter_map(|job| {
            let next_run = job.next_run?;
            Some(UpcomingJob {
                imminent: next_run - now < IMMINENT_WINDOW_SECS,
                next_run_utc: format_utc(next_run),
                job,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cron(name: &str, next_ms: u64) -> Value {
        json!({
            "name": name,
            "schedule": {"kind": "cron", "expr": "*/5 * * * *"},
            "state": {"nextRunAtMs": next_ms}
        })
    }

    #[test]
    fn sorted_capped_and_flagged() {
        let now = 1_700_000_000.0;
        let mut listing: Vec<Value> = (0..12)
            .map(|i| cron(&format!("job{i}"), (1_700_000_000 + 1000 * (12 - i)) * 1000))
            .collect();
        listing.push(json!({"name": "no-next", "schedule": {"kind": "cron"}}));
        listing.push(json!({"name": "oneshot", "schedule": {"kind": "at"}, "state": {"nextRunAtMs": 1}}));

        let upcoming = build_upcoming(&listing, now, UPCOMING_LIMIT);
        assert_eq!(upcoming.len(), 10);
        assert_eq!(upcoming[0].job.name, "job11");
        assert!(upcoming.windows(2).all(|w| w[0].job.next_run <= w[1].job.next_run));
        assert!(upcoming[0].imminent);
        assert!(upcoming[2].imminent);
        assert!(!upcoming[3].imminent);
        assert!(upcoming.iter().all(|u| u.job.name != "oneshot"));
    }

    #[test]
    fn past_runs_are_imminent() {
        let upcoming = build_upcoming(&[cron("overdue", 1_000_000)], 1_700_000_000.0, 10);
        assert!(upcoming[0].imminent);
    }

    #[test]
    fn utc_rendering() {
        let upcoming = build_upcoming(&[cron("epoch-ish", 86_400_000)], 0.0, 10);
        assert_eq!(upcoming[0].next_run_utc, "1970-01-02 00:00:00");
        assert_eq!(upcoming[0].job.schedule_description, "Cron: */5 * * * *");
    }

    #[test]
    fn empty_listing() {
        assert!(build_upcoming(&[], 0.0, 10).is_empty());
    }
}
