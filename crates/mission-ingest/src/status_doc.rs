//! Status document parser.
//!
//! The document is a sequence of `## <Agent> Tasks` sections carrying
//! `**Status:**`, `**Current:**` and `**Next:**` field lines, plus one
//! top-level `## Blocked` section of bullet items. Parsing runs in two
//! stages: [`tokenize`] classifies each line, then [`parse_status_doc`] folds
//! the tokens into sections and reads the fields of each agent.

use std::sync::OnceLock;

use regex::Regex;

use mission_core::text::normalize_title;
use mission_core::Agent;

const BLOCKED_HEADING: &str = "Blocked";
const DEFAULT_STATUS: &str = "idle";
const BLOCKED_NONE: &str = "_none_";
const CURRENT_PLACEHOLDERS: &[&str] = &["none", "idle", "n/a"];
const NEXT_PLACEHOLDERS: &[&str] = &["none", "idle", "n/a", "available for assignment from gtd"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Status,
    Current,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// A `##`-or-deeper heading. Level-1 headings are plain text.
    Heading { level: usize, text: &'a str },
    Field { key: FieldKey, value: &'a str },
    /// A `- ` bullet, with the marker still attached.
    Bullet(&'a str),
    Text(&'a str),
}

/// What the document says about one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSection {
    pub agent: Agent,
    /// First word of `**Status:**`, lowercased. `idle` when absent.
    pub status: String,
    pub current: Option<String>,
    pub next: Option<String>,
    /// Items of the top-level Blocked section, read again for every agent
    /// section that exists.
    pub blocked: Vec<String>,
}

fn field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\*\*(Status|Current|Next):\*\*(.*)$").expect("static field regex is valid")
    })
}

/// Stage one: classify every line.
pub fn tokenize(content: &str) -> Vec<Token<'_>> {
    content.lines().map(classify_line).collect()
}

fn classify_line(line: &str) -> Token<'_> {
    let trimmed = line.trim();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if hashes >= 2 {
        let rest = &trimmed[hashes..];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return Token::Heading {
                level: hashes,
                text: rest.trim(),
            };
        }
    }
    if let Some(caps) = field_re().captures(trimmed) {
        let key = match &caps[1] {
            "Status" => FieldKey::Status,
            "Current" => FieldKey::Current,
            _ => FieldKey::Next,
        };
        let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
        return Token::Field { key, value };
    }
    if trimmed.starts_with("- ") {
        return Token::Bullet(trimmed);
    }
    Token::Text(trimmed)
}

/// A heading and the tokens up to the next `##`-or-deeper heading.
struct Section<'t, 'a> {
    heading: &'a str,
    body: &'t [Token<'a>],
}

fn sections<'t, 'a>(tokens: &'t [Token<'a>]) -> Vec<Section<'t, 'a>> {
    let starts: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t, Token::Heading { .. }))
        .map(|(i, _)| i)
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(tokens.len());
            let heading = match &tokens[start] {
                Token::Heading { text, .. } => *text,
                _ => "",
            };
            Section {
                heading,
                body: &tokens[start + 1..end],
            }
        })
        .collect()
}

fn find_section<'s, 't, 'a>(
    sections: &'s [Section<'t, 'a>],
    heading: &str,
) -> Option<&'s Section<'t, 'a>> {
    sections
        .iter()
        .find(|s| s.heading.eq_ignore_ascii_case(heading))
}

fn first_field<'a>(body: &[Token<'a>], wanted: FieldKey) -> Option<&'a str> {
    body.iter().find_map(|t| match t {
        Token::Field { key, value } if *key == wanted => Some(*value),
        _ => None,
    })
}

fn task_value(value: Option<&str>, placeholders: &[&str]) -> Option<String> {
    let value = normalize_title(value?);
    if value.is_empty() {
        return None;
    }
    let lower = value.to_lowercase();
    if placeholders.iter().any(|p| *p == lower) {
        return None;
    }
    Some(value)
}

fn leading_word(value: &str) -> String {
    value
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

fn blocked_items(section: &Section<'_, '_>) -> Vec<String> {
    section
        .body
        .iter()
        .filter_map(|t| match t {
            Token::Bullet(line) => Some(normalize_title(line.trim_matches(|c| c == '-' || c == ' '))),
            _ => None,
        })
        .filter(|item| !item.is_empty() && !item.eq_ignore_ascii_case(BLOCKED_NONE))
        .collect()
}

/// Stage two: fold tokens into per-agent records, in fixed agent order.
/// Agents without a `<Agent> Tasks` section contribute nothing.
pub fn parse_status_doc(content: &str) -> Vec<AgentSection> {
    let tokens = tokenize(content);
    let sections = sections(&tokens);

    let mut out = Vec::new();
    for agent in Agent::ALL {
        let heading = format!("{} Tasks", agent.display_name());
        let Some(section) = find_section(&sections, &heading) else {
            continue;
        };

        let status = first_field(section.body, FieldKey::Status)
            .map(leading_word)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());

        // The Blocked section is read once per agent section found, so each
        // blocked item is attributed to every agent present.
        let blocked = find_section(&sections, BLOCKED_HEADING)
            .map(blocked_items)
            .unwrap_or_default();

        out.push(AgentSection {
            agent,
            status,
            current: task_value(first_field(section.body, FieldKey::Current), CURRENT_PLACEHOLDERS),
            next: task_value(first_field(section.body, FieldKey::Next), NEXT_PLACEHOLDERS),
            blocked,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Working

## Lead Tasks
**Status:** in_progress
**Current:** Review PR #42
**Next:** none

## Research Tasks
- **Status:** idle
- **Current:** N/A
- **Next:** Survey vector stores

## Blocked
- Waiting on API key
- _none_
-

## Notes
- not a blocked item
";

    #[test]
    fn tokenize_classifies_lines() {
        let tokens = tokenize("## Lead Tasks\n**Status:** active\n- item\n# Title\nplain");
        assert_eq!(
            tokens,
            vec![
                Token::Heading {
                    level: 2,
                    text: "Lead Tasks"
                },
                Token::Field {
                    key: FieldKey::Status,
                    value: "active"
                },
                Token::Bullet("- item"),
                Token::Text("# Title"),
                Token::Text("plain"),
            ]
        );
    }

    #[test]
    fn agent_fields_are_extracted() {
        let sections = parse_status_doc(DOC);
        assert_eq!(sections.len(), 2);

        let lead = &sections[0];
        assert_eq!(lead.agent, Agent::Lead);
        assert_eq!(lead.status, "in_progress");
        assert_eq!(lead.current.as_deref(), Some("Review PR #42"));
        assert_eq!(lead.next, None);

        let research = &sections[1];
        assert_eq!(research.agent, Agent::Research);
        assert_eq!(research.status, "idle");
        assert_eq!(research.current, None);
        assert_eq!(research.next.as_deref(), Some("Survey vector stores"));
    }

    #[test]
    fn blocked_items_repeat_per_agent() {
        let sections = parse_status_doc(DOC);
        for s in &sections {
            assert_eq!(s.blocked, vec!["Waiting on API key".to_string()]);
        }
    }

    #[test]
    fn subheading_ends_section() {
        let doc = "## Lead Tasks\n**Status:** review\n### History\n**Current:** old task\n";
        let sections = parse_status_doc(doc);
        assert_eq!(sections[0].status, "review");
        assert_eq!(sections[0].current, None);
    }

    #[test]
    fn missing_status_defaults_to_idle() {
        let sections = parse_status_doc("## Writing Tasks\n**Current:** Draft intro\n");
        assert_eq!(sections[0].agent, Agent::Writing);
        assert_eq!(sections[0].status, "idle");
        assert_eq!(sections[0].current.as_deref(), Some("Draft intro"));
        assert!(sections[0].blocked.is_empty());
    }

    #[test]
    fn next_placeholder_for_gtd_pool() {
        let sections = parse_status_doc(
            "## Product Owner Tasks\n**Next:** Available for assignment from GTD\n",
        );
        assert_eq!(sections[0].agent, Agent::ProductOwner);
        assert_eq!(sections[0].next, None);
    }

    #[test]
    fn document_without_sections_is_empty() {
        assert!(parse_status_doc("just some notes\n- a bullet").is_empty());
        assert!(parse_status_doc("").is_empty());
    }
}
