use serde::Serialize;

use mission_core::memory::{ConfidenceBand, MemoryRecord, MemoryType};

pub const MEMORY_SEARCH_MIN_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryItem {
    #[serde(flatten)]
    pub record: MemoryRecord,
    pub confidence_band: ConfidenceBand,
}

impl From<MemoryRecord> for MemoryItem {
    fn from(record: MemoryRecord) -> Self {
        Self {
            confidence_band: record.band(),
            record,
        }
    }
}

/// Listing order: newest `created_at` first (stable), capped.
pub fn order_memories(mut records: Vec<MemoryRecord>, limit: usize) -> Vec<MemoryItem> {
    records.sort_by(|a, b| b.created_at.total_cmp(&a.created_at));
    records.into_iter().take(limit).map(MemoryItem::from).collect()
}

/// Types to list for an optional filter, in display order.
pub fn listed_types(filter: Option<MemoryType>) -> Vec<MemoryType> {
    match filter {
        Some(t) => vec![t],
        None => MemoryType::ALL.to_vec(),
    }
}
