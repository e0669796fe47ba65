use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::Serialize;
use serde_json::Value;

use mission_core::text::truncate_with;
use mission_core::timestamp::coerce_timestamp;

use crate::jsonl::is_blank;

const PREVIEW_MAX_CHARS: usize = 100;
const MESSAGE_MAX_CHARS: usize = 1000;
const DEFAULT_PREVIEW: &str = "Chat session";

/// Summary of one session transcript, as shown in the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub id: String,
    /// Epoch seconds; file mtime when the marker has no timestamp, `0.0` when
    /// the marker's timestamp is unreadable.
    pub timestamp: f64,
    /// The marker's timestamp as written.
    pub started_at: Option<String>,
    pub cwd: String,
    pub message_count: usize,
    pub preview: String,
}

/// One `type: "message"` line of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionMessage {
    pub role: String,
    pub text: String,
    pub timestamp: String,
}

/// Summarize up to `limit` session files, newest-modified first.
///
/// Files that cannot be summarized are skipped individually.
pub fn load_sessions(dir: &Path, limit: usize) -> Vec<SessionSummary> {
    list_session_files(dir)
        .into_iter()
        .take(limit)
        .filter_map(|path| {
            let summary = summarize_session(&path);
            if summary.is_none() {
                tracing::debug!(path = %path.display(), "skipping session file without session marker");
            }
            summary
        })
        .collect()
}

/// Number of `*.jsonl` files in the sessions directory.
pub fn count_session_files(dir: &Path) -> usize {
    list_session_files(dir).len()
}

/// `*.jsonl` files sorted by mtime descending, then by path for a stable order.
fn list_session_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<(f64, PathBuf)> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("jsonl"))
        .map(|p| (mtime_secs(&p).unwrap_or(0.0), p))
        .collect();
    files.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    files.into_iter().map(|(_, p)| p).collect()
}

fn mtime_secs(path: &Path) -> Option<f64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(modified.duration_since(UNIX_EPOCH).ok()?.as_secs_f64())
}

/// Summarize a single transcript. `None` when the first line is not a
/// parsable `type: "session"` marker.
pub fn summarize_session(path: &Path) -> Option<SessionSummary> {
    let file = std::fs::File::open(path).ok()?;
    let mut lines = BufReader::new(file)
        .split(b'\n')
        .map_while(Result::ok)
        .filter(|l| !is_blank(l));

    let first: Value = serde_json::from_slice(&lines.next()?).ok()?;
    if first.get("type").and_then(|v| v.as_str()) != Some("session") {
        return None;
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let marker_ts = first
        .get("timestamp")
        .filter(|v| !v.is_null() && v.as_str() != Some(""));
    let started_at = marker_ts.map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    });
    let timestamp = match marker_ts {
        Some(ts) => coerce_timestamp(ts),
        None => mtime_secs(path).unwrap_or(0.0),
    };

    let mut summary = SessionSummary {
        id: first
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or(stem.as_str())
            .to_string(),
        timestamp,
        started_at,
        cwd: first
            .get("cwd")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        message_count: 0,
        preview: DEFAULT_PREVIEW.to_string(),
    };

    let mut preview_found = false;
    for raw_line in lines {
        let Ok(record) = serde_json::from_slice::<Value>(&raw_line) else {
            continue;
        };
        if record.get("type").and_then(|v| v.as_str()) != Some("message") {
            continue;
        }
        summary.message_count += 1;
        if preview_found || message_role(&record) != Some("user") {
            continue;
        }
        preview_found = true;
        let text = first_block_text(&record);
        if !text.is_empty() {
            summary.preview = truncate_with(&text, PREVIEW_MAX_CHARS, "...");
        }
    }

    Some(summary)
}

fn message_role(record: &Value) -> Option<&str> {
    record
        .get("message")
        .and_then(|m| m.get("role"))
        .and_then(|r| r.as_str())
}

/// Preview text: a plain-string content, or the first structured block's text.
fn first_block_text(record: &Value) -> String {
    match record.get("message").and_then(|m| m.get("content")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(blocks)) => blocks
            .first()
            .and_then(|b| b.get("text"))
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

/// Full message text: a plain-string content, or every `type: "text"` block
/// concatenated.
fn full_text(record: &Value) -> String {
    match record.get("message").and_then(|m| m.get("content")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(blocks)) => blocks
            .iter()
            .filter(|b| b.get("type").and_then(|t| t.as_str()) == Some("text"))
            .filter_map(|b| b.get("text").and_then(|t| t.as_str()))
            .collect(),
        _ => String::new(),
    }
}

/// Locate the transcript for `id`: `<dir>/<id>.jsonl`, falling back to
/// `<dir>/<id>`. The caller is responsible for rejecting ids with path
/// components.
pub fn session_file(dir: &Path, id: &str) -> Option<PathBuf> {
    [dir.join(format!("{id}.jsonl")), dir.join(id)]
        .into_iter()
        .find(|p| p.is_file())
}

/// Every `type: "message"` line of a transcript, in order. Message text over
/// 1000 characters is cut with `...`.
pub fn read_session_messages(path: &Path) -> anyhow::Result<Vec<SessionMessage>> {
    let file = std::fs::File::open(path)?;
    let mut messages = Vec::new();
    for raw_line in BufReader::new(file).split(b'\n') {
        let raw_line = raw_line?;
        if is_blank(&raw_line) {
            continue;
        }
        let Ok(record) = serde_json::from_slice::<Value>(&raw_line) else {
            continue;
        };
        if record.get("type").and_then(|v| v.as_str()) != Some("message") {
            continue;
        }
        messages.push(SessionMessage {
            role: message_role(&record).unwrap_or("unknown").to_string(),
            text: truncate_with(&full_text(&record), MESSAGE_MAX_CHARS, "..."),
            timestamp: record
                .get("timestamp")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
        });
    }
    Ok(messages)
}
