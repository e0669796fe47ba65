use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::{Map, Value};

use crate::jsonl::{is_blank, parse_objects, read_tail_lines};

/// One line of the append-only activity log.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    /// Raw `timestamp` field; coerced later.
    pub timestamp: Value,
    pub task: Option<String>,
    pub message: Option<String>,
    pub agent: Option<String>,
    pub raw: Map<String, Value>,
}

impl ActivityRecord {
    fn from_object(raw: Map<String, Value>) -> Self {
        let field = |key: &str| raw.get(key).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            timestamp: raw.get("timestamp").cloned().unwrap_or(Value::Null),
            task: field("task"),
            message: field("message"),
            agent: field("agent"),
            raw,
        }
    }
}

/// Load the most recent `tail` activity records, in file order.
pub fn load_activities(path: &Path, tail: usize) -> Vec<ActivityRecord> {
    parse_objects(read_tail_lines(path, tail))
        .into_iter()
        .map(ActivityRecord::from_object)
        .collect()
}

/// Count non-blank lines in the activity log (0 when absent).
pub fn count_activity_lines(path: &Path) -> usize {
    let Ok(file) = std::fs::File::open(path) else {
        return 0;
    };
    BufReader::new(file)
        .split(b'\n')
        .map_while(Result::ok)
        .filter(|line| !is_blank(line))
        .count()
}
