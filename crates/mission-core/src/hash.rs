use sha2::{Digest, Sha256};

use crate::text::normalize_title;

/// Number of hex chars kept in a content id.
const CONTENT_ID_HEX_LEN: usize = 12;

/// Compute SHA-256 hash of bytes, returning lowercase hex string.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Content-addressed id: `<prefix>-<sha256(normalized text)[..12]>`.
///
/// Pure function of the text, so repeated parses agree. Any edit to the
/// text yields a different id.
pub fn content_id(prefix: &str, text: &str) -> String {
    let digest = sha256_hex(normalize_title(text).as_bytes());
    format!("{prefix}-{}", &digest[..CONTENT_ID_HEX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hello() {
        let h = sha256_hex(b"hello");
        assert_eq!(
            h,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn content_id_is_deterministic() {
        let a = content_id("checklist", "Write report");
        let b = content_id("checklist", "Write report");
        assert_eq!(a, b);
        assert!(a.starts_with("checklist-"));
        assert_eq!(a.len(), "checklist-".len() + 12);
    }

    #[test]
    fn content_id_ignores_surrounding_whitespace() {
        assert_eq!(
            content_id("blocked", "Waiting on API key"),
            content_id("blocked", "  Waiting on API key ")
        );
    }

    #[test]
    fn content_id_changes_with_text() {
        assert_ne!(
            content_id("checklist", "Write report"),
            content_id("checklist", "Write reports")
        );
    }
}
