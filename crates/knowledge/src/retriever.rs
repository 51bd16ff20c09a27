//! Similarity retriever — query in, grounding text (or nothing) out.

use ragent_core::error::KnowledgeError;
use ragent_core::knowledge::{Embedder, RetrievalOutcome, VectorStore};
use std::sync::Arc;
use tracing::debug;

/// Nearest entries requested from the store per query.
pub const TOP_K: usize = 2;

/// Minimum cosine similarity for a passage to count as relevant.
pub const MIN_SCORE: f32 = 0.7;

/// Retrieves the passages relevant to a query.
///
/// `TOP_K` and `MIN_SCORE` are fixed for every query.
pub struct SimilarityRetriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl SimilarityRetriever {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Accepted passages are joined one per line, in the store's rank order.
    pub async fn retrieve(&self, query: &str) -> Result<RetrievalOutcome, KnowledgeError> {
        let vector = self.embedder.embed(query).await?;
        let candidates = self.store.search(&vector, TOP_K).await?;

        let mut knowledge = String::new();
        let mut accepted = 0;
        for candidate in candidates {
            if candidate.score < MIN_SCORE {
                debug!(key = candidate.key, score = candidate.score, "Rejected passage below threshold");
                continue;
            }
            debug!(key = candidate.key, score = candidate.score, "Accepted passage");
            knowledge.push_str(&candidate.content);
            knowledge.push('\n');
            accepted += 1;
        }

        if accepted == 0 {
            debug!(query, "No relevant knowledge");
            return Ok(RetrievalOutcome::NotFound);
        }
        Ok(RetrievalOutcome::Found(knowledge))
    }
}
