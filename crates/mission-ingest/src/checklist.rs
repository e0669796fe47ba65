//! Checklist document parser: `- [ ] task @context #project` lines.

use std::sync::OnceLock;

use regex::Regex;

use mission_core::text::normalize_title;
use mission_core::Agent;

/// Context marker → owning agent. Earlier entries win when several match.
const CONTEXT_AGENTS: &[(&str, Agent)] = &[
    ("research", Agent::Research),
    ("writing", Agent::Writing),
    ("product-owner", Agent::ProductOwner),
    ("computer", Agent::Lead),
    ("calls", Agent::Lead),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub checked: bool,
    /// Line text after the checkbox, markers included.
    pub raw: String,
    /// Display title with markers and tags removed.
    pub title: String,
    pub agent: Agent,
    pub project: Option<String>,
}

fn checkbox_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*- \[(.)\] (.+)$").expect("static checkbox regex is valid")
    })
}

fn context_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@([\w-]+)").expect("static context regex is valid"))
}

fn project_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#(\w+)").expect("static project regex is valid"))
}

fn agent_for(text: &str) -> Agent {
    let markers: Vec<String> = context_re()
        .captures_iter(text)
        .map(|c| c[1].to_lowercase())
        .collect();
    CONTEXT_AGENTS
        .iter()
        .find(|(marker, _)| markers.iter().any(|m| m == marker))
        .map(|(_, agent)| *agent)
        .unwrap_or(Agent::Lead)
}

fn clean_title(text: &str) -> String {
    let without_context = context_re().replace_all(text, "");
    let without_tags = project_re().replace_all(&without_context, "");
    normalize_title(&without_tags)
}

/// Parse every checkbox line. Items whose title is empty after stripping
/// markers are dropped.
pub fn parse_checklist(content: &str) -> Vec<ChecklistItem> {
    content
        .lines()
        .filter_map(|line| {
            let caps = checkbox_re().captures(line)?;
            let raw = caps[2].trim().to_string();
            let title = clean_title(&raw);
            if title.is_empty() {
                return None;
            }
            Some(ChecklistItem {
                checked: caps[1].eq_ignore_ascii_case("x"),
                agent: agent_for(&raw),
                project: project_re().captures(&raw).map(|c| c[1].to_string()),
                title,
                raw,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_and_unchecked() {
        let items = parse_checklist("- [ ] Write report\n- [x] Ship v1\n- [X] Upper\n");
        assert_eq!(items.len(), 3);
        assert!(!items[0].checked);
        assert!(items[1].checked);
        assert!(items[2].checked);
    }

    #[test]
    fn context_marker_selects_agent() {
        let items = parse_checklist(
            "- [ ] Survey papers @research\n\
             - [ ] Groom backlog @product-owner\n\
             - [ ] Call vendor @calls\n\
             - [ ] Something else\n\
             - [ ] Unknown context @garden\n",
        );
        let agents: Vec<Agent> = items.iter().map(|i| i.agent).collect();
        assert_eq!(
            agents,
            vec![
                Agent::Research,
                Agent::ProductOwner,
                Agent::Lead,
                Agent::Lead,
                Agent::Lead
            ]
        );
    }

    #[test]
    fn table_order_breaks_ties() {
        let items = parse_checklist("- [ ] Outline post @writing @research\n");
        assert_eq!(items[0].agent, Agent::Research);
    }

    #[test]
    fn project_tag_captured_and_markers_stripped() {
        let items = parse_checklist("- [ ] Draft   launch post @writing #launch extra\n");
        assert_eq!(items[0].project.as_deref(), Some("launch"));
        assert_eq!(items[0].title, "Draft launch post extra");
        assert_eq!(items[0].raw, "Draft   launch post @writing #launch extra");
    }

    #[test]
    fn non_checkbox_lines_and_empty_titles_ignored() {
        let items = parse_checklist("# Next\n- plain bullet\n- [ ] @research #x\n  - [ ] Indented\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Indented");
    }
}
