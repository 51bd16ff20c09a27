//! Knowledge indexer — chunk, embed, store.

use ragent_core::error::KnowledgeError;
use ragent_core::knowledge::{Embedder, IndexedEntry, VectorStore};
use std::sync::Arc;
use tracing::{debug, info};
use crate::chunking::ChunkingEngine;

/// Stores every chunk of a document under a fresh sequence key.
///
/// Keys come from the store, so several indexers sharing one store never
/// issue the same key. Indexing the same text twice stores it twice.
pub struct KnowledgeIndexer {
    chunking: ChunkingEngine,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl KnowledgeIndexer {
    pub fn new(
        chunking: ChunkingEngine,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            chunking,
            embedder,
            store,
        }
    }

    /// Index `content`, chunk by chunk in order. Returns the number of
    /// entries stored.
    ///
    /// Stops at the first embedding or storage failure; chunks stored before
    /// the failure stay in the store.
    pub async fn index(&self, content: &str) -> Result<usize, KnowledgeError> {
        let expected = self.embedder.dimensions();
        let mut stored = 0;

        for chunk in self.chunking.chunk(content) {
            let key = self.store.next_key();
            let vector = self.embedder.embed(&chunk.content).await?;
            if vector.len() != expected {
                return Err(KnowledgeError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }

            debug!(key, words = chunk.content.split(' ').count(), "Storing chunk");
            self.store
                .upsert(IndexedEntry {
                    key,
                    content: chunk.content,
                    vector,
                })
                .await?;
            stored += 1;
        }

        info!(
            chunks = stored,
            window = self.chunking.window_size(),
            step = self.chunking.step(),
            store = self.store.name(),
            "Indexed document"
        );
        Ok(stored)
    }
}
