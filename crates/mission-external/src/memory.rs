use anyhow::Result;

use mission_core::memory::{MemoryRecord, MemoryStats, MemoryType};

/// Read side of the vector-similarity memory store.
///
/// Callers treat any `Err` as "store unavailable" and show nothing.
#[async_trait::async_trait]
pub trait MemoryStore: Send + Sync {
    /// Memories of one type, in store order.
    async fn list(&self, memory_type: MemoryType) -> Result<Vec<MemoryRecord>>;

    /// Up to `k` memories similar to `query` with at least `min_confidence`.
    async fn search(&self, query: &str, k: usize, min_confidence: f64) -> Result<Vec<MemoryRecord>>;

    /// Memories awaiting review, in store order.
    async fn pending(&self) -> Result<Vec<MemoryRecord>>;

    /// Totals per type plus the pending-review count.
    async fn stats(&self) -> Result<MemoryStats>;
}

/// Store used when none is configured: always empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMemoryStore;

#[async_trait::async_trait]
impl MemoryStore for NoMemoryStore {
    async fn list(&self, _memory_type: MemoryType) -> Result<Vec<MemoryRecord>> {
        Ok(Vec::new())
    }

    async fn search(&self, _query: &str, _k: usize, _min_confidence: f64) -> Result<Vec<MemoryRecord>> {
        Ok(Vec::new())
    }

    async fn pending(&self) -> Result<Vec<MemoryRecord>> {
        Ok(Vec::new())
    }

    async fn stats(&self) -> Result<MemoryStats> {
        Ok(MemoryStats::default())
    }
}
