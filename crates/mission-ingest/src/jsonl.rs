use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::{Map, Value};

/// Read at most the last `max_lines` non-blank lines of a file, in file order.
///
/// Memory stays bounded by `max_lines`. A missing or unreadable file yields an
/// empty tail. A read error mid-file keeps what was read so far.
pub fn read_tail_lines(path: &Path, max_lines: usize) -> Vec<Vec<u8>> {
    if max_lines == 0 {
        return Vec::new();
    }
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut tail: VecDeque<Vec<u8>> = VecDeque::with_capacity(max_lines);
    for raw_line in BufReader::new(file).split(b'\n') {
        let Ok(raw_line) = raw_line else {
            break;
        };
        if is_blank(&raw_line) {
            continue;
        }
        if tail.len() == max_lines {
            tail.pop_front();
        }
        tail.push_back(raw_line);
    }
    tail.into()
}

/// Parse each line as a JSON object. Lines that are not JSON, or are JSON but
/// not an object, are skipped; the rest keep their relative order.
pub fn parse_objects<I, L>(lines: I) -> Vec<Map<String, Value>>
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for line in lines {
        match serde_json::from_slice::<Value>(line.as_ref()) {
            Ok(Value::Object(map)) => records.push(map),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "skipped malformed JSON-lines records");
    }
    records
}

pub(crate) fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|b| b.is_ascii_whitespace())
}
