use serde_json::Value;

use mission_core::text::truncate_with;
use mission_core::SearchHit;

const PREVIEW_MAX_CHARS: usize = 300;

/// Parse the search service's JSON output into at most `limit` hits.
///
/// Two shapes are accepted: a bare array of hits, or an object whose `hits`
/// array may nest path/title under `document` and carry `highlights`
/// instead of `snippet`.
pub fn parse_search_output(stdout: &str, limit: usize) -> Vec<SearchHit> {
    match serde_json::from_str::<Value>(stdout) {
        Ok(Value::Array(hits)) => hits.iter().take(limit).map(flat_hit).collect(),
        Ok(Value::Object(obj)) => obj
            .get("hits")
            .and_then(|h| h.as_array())
            .map(|hits| hits.iter().take(limit).map(nested_hit).collect())
            .unwrap_or_default(),
        Ok(_) | Err(_) => {
            tracing::debug!("search output is not JSON");
            Vec::new()
        }
    }
}

fn str_field<'a>(v: &'a Value, key: &str) -> Option<&'a str> {
    v.get(key).and_then(|x| x.as_str())
}

fn flat_hit(hit: &Value) -> SearchHit {
    build_hit(
        str_field(hit, "file"),
        str_field(hit, "title"),
        str_field(hit, "snippet"),
        hit,
    )
}

fn nested_hit(hit: &Value) -> SearchHit {
    let document = hit.get("document").unwrap_or(&Value::Null);
    let first_highlight = hit
        .get("highlights")
        .and_then(|h| h.as_array())
        .and_then(|h| h.first())
        .and_then(|h| h.as_str());
    build_hit(
        str_field(hit, "file").or_else(|| str_field(document, "path")),
        str_field(hit, "title").or_else(|| str_field(document, "title")),
        str_field(hit, "snippet").or(first_highlight),
        hit,
    )
}

fn build_hit(path: Option<&str>, title: Option<&str>, snippet: Option<&str>, hit: &Value) -> SearchHit {
    SearchHit {
        path: path.unwrap_or("unknown").to_string(),
        title: title.unwrap_or("Untitled").to_string(),
        preview: truncate_with(snippet.unwrap_or_default(), PREVIEW_MAX_CHARS, ""),
        score: hit.get("score").and_then(|s| s.as_f64()).unwrap_or(0.0),
    }
}
