use serde::Serialize;

use mission_core::{Column, TaskCard};
use mission_ingest::normalize::{checklist_cards, status_cards};
use mission_ingest::{parse_checklist, parse_status_doc};

use crate::merge::dedup_board;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanColumn {
    pub column: Column,
    pub label: &'static str,
    pub count: usize,
    pub cards: Vec<TaskCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanBoard {
    pub columns: Vec<KanbanColumn>,
    pub total: usize,
}

/// Build the board from the two planning documents. A missing document
/// contributes no cards. Status-document cards come first, so they win
/// title collisions inside a column.
pub fn build_kanban(status_doc: Option<&str>, checklist_doc: Option<&str>) -> KanbanBoard {
    let mut cards = status_doc
        .map(|doc| status_cards(&parse_status_doc(doc)))
        .unwrap_or_default();
    if let Some(doc) = checklist_doc {
        cards.extend(checklist_cards(&parse_checklist(doc)));
    }
    board_from_cards(cards)
}

pub fn board_from_cards(cards: Vec<TaskCard>) -> KanbanBoard {
    let columns: Vec<KanbanColumn> = dedup_board(cards)
        .into_iter()
        .map(|(column, cards)| KanbanColumn {
            column,
            label: column.label(),
            count: cards.len(),
            cards,
        })
        .collect();
    let total = columns.iter().map(|c| c.count).sum();
    KanbanBoard { columns, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "\
## Lead Tasks
**Status:** in_progress
**Current:** Write report
**Next:** Plan sprint

## Blocked
- Waiting on API key
";

    const CHECKLIST: &str = "\
- [ ] write report
- [x] Ship v1 #launch
- [ ] Plan sprint @research
";

    #[test]
    fn columns_in_fixed_order_with_counts() {
        let board = build_kanban(Some(STATUS), Some(CHECKLIST));
        let order: Vec<Column> = board.columns.iter().map(|c| c.column).collect();
        assert_eq!(order, Column::ALL.to_vec());
        assert_eq!(board.columns[1].label, "In Progress");
        assert_eq!(board.total, board.columns.iter().map(|c| c.cards.len()).sum::<usize>());
    }

    #[test]
    fn todo_column_wins_over_in_progress() {
        // "write report " is todo from the checklist; the status doc puts
        // "Write report" in in_progress. Todo is folded first.
        let board = build_kanban(Some(STATUS), Some(CHECKLIST));
        let todo: Vec<&str> = board.columns[0].cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(todo, vec!["Plan sprint", "write report"]);
        assert!(board.columns[1].cards.is_empty());
        assert_eq!(board.columns[3].cards[0].title, "Ship v1");
        assert_eq!(board.columns[4].cards[0].title, "Waiting on API key");
        assert_eq!(board.total, 4);
    }

    #[test]
    fn status_doc_card_wins_within_column() {
        let board = build_kanban(Some(STATUS), Some(CHECKLIST));
        let plan = &board.columns[0].cards[0];
        assert_eq!(plan.agent, mission_core::Agent::Lead);
        assert_eq!(plan.source_document, mission_core::SourceDocument::StatusDoc);
    }

    #[test]
    fn blocked_items_collapse_across_agents() {
        let doc = "## Lead Tasks\n**Status:** idle\n## Research Tasks\n**Status:** idle\n## Blocked\n- Need GPU\n";
        let board = build_kanban(Some(doc), None);
        assert_eq!(board.columns[4].count, 1);
        assert_eq!(board.columns[4].cards[0].agent, mission_core::Agent::Lead);
    }

    #[test]
    fn missing_documents_give_empty_board() {
        let board = build_kanban(None, None);
        assert_eq!(board.total, 0);
        assert_eq!(board.columns.len(), 5);
    }
}
