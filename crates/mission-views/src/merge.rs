//! Ordering and deduplication of canonical records.

use std::cmp::Ordering;
use std::collections::HashSet;

use mission_core::{Column, ScheduledJob, TaskCard, TimelineEvent};

/// Concatenate `activities` then `sessions` and sort newest first.
/// The sort is stable: equal timestamps keep input order.
pub fn merge_events(activities: Vec<TimelineEvent>, sessions: Vec<TimelineEvent>) -> Vec<TimelineEvent> {
    let mut events = activities;
    events.extend(sessions);
    events.sort_by(|a, b| b.timestamp.total_cmp(&a.timestamp));
    events
}

/// Stable sort by `next_run` ascending; jobs without one go last.
pub fn order_jobs(mut jobs: Vec<ScheduledJob>) -> Vec<ScheduledJob> {
    jobs.sort_by(|a, b| match (a.next_run, b.next_run) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    jobs
}

/// Accumulator threaded through the column fold.
#[derive(Default)]
struct BoardFold {
    seen: HashSet<String>,
    columns: Vec<(Column, Vec<TaskCard>)>,
}

/// Group cards by column (keeping production order inside each column),
/// then fold over the columns in board order keeping only the first card
/// per title across the whole board.
pub fn dedup_board(cards: Vec<TaskCard>) -> Vec<(Column, Vec<TaskCard>)> {
    let mut grouped: Vec<(Column, Vec<TaskCard>)> =
        Column::ALL.iter().map(|c| (*c, Vec::new())).collect();
    for card in cards {
        if let Some((_, bucket)) = grouped.iter_mut().find(|(c, _)| *c == card.column) {
            bucket.push(card);
        }
    }

    let folded = grouped
        .into_iter()
        .fold(BoardFold::default(), |mut acc, (column, bucket)| {
            let kept: Vec<TaskCard> = bucket
                .into_iter()
                .filter(|card| acc.seen.insert(card.dedup_key()))
                .collect();
            acc.columns.push((column, kept));
            acc
        });
    folded.columns
}
