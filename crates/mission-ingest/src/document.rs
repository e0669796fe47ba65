use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

use mission_core::text::truncate_chars;

/// Search-service URI prefix for documents under the notes root.
pub const NOTES_URI_PREFIX: &str = "qmd://obsidian/";
pub const TRUNCATION_MARKER: &str = "\n\n... [truncated]";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentView {
    pub name: String,
    pub path: String,
    pub content: String,
    pub truncated: bool,
}

/// Map a document reference to a filesystem path.
///
/// `qmd://obsidian/<rel>` resolves under `notes_root`, matching path
/// components case-insensitively when the exact path does not exist. Absolute
/// paths are used as-is; anything else is relative to `notes_root`.
pub fn resolve_document_path(notes_root: &Path, reference: &str) -> PathBuf {
    if let Some(rel) = reference.strip_prefix(NOTES_URI_PREFIX) {
        let exact = notes_root.join(rel);
        if exact.exists() {
            return exact;
        }
        return resolve_case_insensitive(notes_root, rel);
    }
    let path = Path::new(reference);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        notes_root.join(path)
    }
}

/// Walk `rel` one component at a time, picking the first directory entry
/// whose name matches ignoring case. Stops at the first miss and appends the
/// remaining component verbatim.
fn resolve_case_insensitive(root: &Path, rel: &str) -> PathBuf {
    let mut current = root.to_path_buf();
    for part in rel.split('/').filter(|p| !p.is_empty()) {
        let lower = part.to_lowercase();
        let found = std::fs::read_dir(&current).ok().and_then(|entries| {
            entries
                .filter_map(|e| e.ok())
                .find(|e| e.file_name().to_string_lossy().to_lowercase() == lower)
        });
        match found {
            Some(entry) => current = entry.path(),
            None => {
                current.push(part);
                break;
            }
        }
    }
    current
}

/// Read at most `max_chars` characters of a file, reading no more bytes than
/// that many characters can occupy. Returns the text and whether it was cut.
pub fn read_capped(path: &Path, max_chars: usize) -> std::io::Result<(String, bool)> {
    let byte_limit = (max_chars as u64).saturating_mul(4).saturating_add(4);
    let mut buf = Vec::new();
    std::fs::File::open(path)?
        .take(byte_limit)
        .read_to_end(&mut buf)?;
    let text = String::from_utf8_lossy(&buf);
    let (kept, truncated) = truncate_chars(&text, max_chars);
    Ok((kept.to_string(), truncated))
}

/// Read a document, keeping at most `max_chars` characters. `None` when the
/// path is not a file.
pub fn read_document(path: &Path, max_chars: usize) -> anyhow::Result<Option<DocumentView>> {
    if !path.is_file() {
        return Ok(None);
    }
    let (kept, truncated) = read_capped(path, max_chars)?;
    let content = if truncated {
        format!("{kept}{TRUNCATION_MARKER}")
    } else {
        kept
    };

    Ok(Some(DocumentView {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        path: path.display().to_string(),
        content,
        truncated,
    }))
}

/// Count `*.md` files below `root`, recursively (0 when absent).
pub fn count_markdown_files(root: &Path) -> usize {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("md"))
        .count()
}
