//! In-memory vector store — the index lives for the process lifetime only.

use async_trait::async_trait;
use ragent_core::error::KnowledgeError;
use ragent_core::knowledge::{IndexedEntry, ScoredEntry, VectorStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use crate::vector::rank_by_similarity;

/// A vector store that keeps entries in a Vec and scans them on search.
pub struct InMemoryVectorStore {
    index: RwLock<Index>,
    next_key: AtomicU64,
}

/// Entries in insertion order, plus each key's position.
#[derive(Default)]
struct Index {
    entries: Vec<IndexedEntry>,
    positions: HashMap<u64, usize>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            index: RwLock::new(Index::default()),
            next_key: AtomicU64::new(1),
        }
    }

    /// Snapshot of every stored entry, in insertion order.
    pub async fn entries(&self) -> Vec<IndexedEntry> {
        self.index.read().await.entries.clone()
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn next_key(&self) -> u64 {
        self.next_key.fetch_add(1, Ordering::Relaxed)
    }

    async fn upsert(&self, entry: IndexedEntry) -> Result<(), KnowledgeError> {
        let mut index = self.index.write().await;
        match index.positions.get(&entry.key).copied() {
            Some(position) => index.entries[position] = entry,
            None => {
                let position = index.entries.len();
                index.positions.insert(entry.key, position);
                index.entries.push(entry);
            }
        }
        Ok(())
    }

    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredEntry>, KnowledgeError> {
        let index = self.index.read().await;
        Ok(rank_by_similarity(&index.entries, vector, top_k))
    }

    async fn count(&self) -> Result<usize, KnowledgeError> {
        Ok(self.index.read().await.entries.len())
    }
}
