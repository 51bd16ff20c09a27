//! Knowledge base facade — one store, one indexer, one retriever.

use ragent_core::error::KnowledgeError;
use ragent_core::knowledge::{DocumentSource, Embedder, RetrievalOutcome, VectorStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use crate::chunking::ChunkingEngine;
use crate::indexer::KnowledgeIndexer;
use crate::retriever::SimilarityRetriever;

/// Totals from indexing a document source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    pub documents: usize,
    pub chunks: usize,
}

pub struct KnowledgeBase {
    indexer: KnowledgeIndexer,
    retriever: SimilarityRetriever,
    store: Arc<dyn VectorStore>,
}

impl KnowledgeBase {
    pub fn new(
        chunking: ChunkingEngine,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            indexer: KnowledgeIndexer::new(chunking, Arc::clone(&embedder), Arc::clone(&store)),
            retriever: SimilarityRetriever::new(embedder, Arc::clone(&store)),
            store,
        }
    }

    /// Index one piece of text.
    pub async fn index(&self, content: &str) -> Result<usize, KnowledgeError> {
        self.indexer.index(content).await
    }

    /// Index every document the source produces, in order.
    pub async fn index_source(&self, source: &dyn DocumentSource) -> Result<IndexReport, KnowledgeError> {
        let mut report = IndexReport::default();
        for document in source.documents().await? {
            report.chunks += self.indexer.index(&document.text).await?;
            report.documents += 1;
        }
        info!(documents = report.documents, chunks = report.chunks, "Knowledge base indexed");
        Ok(report)
    }

    pub async fn try_find(&self, query: &str) -> Result<RetrievalOutcome, KnowledgeError> {
        self.retriever.retrieve(query).await
    }

    pub async fn len(&self) -> Result<usize, KnowledgeError> {
        self.store.count().await
    }

    pub async fn is_empty(&self) -> Result<bool, KnowledgeError> {
        Ok(self.len().await? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::HashingEmbedder;
    use crate::in_memory::InMemoryVectorStore;
    use crate::source::DirectorySource;

    fn knowledge_base() -> KnowledgeBase {
        KnowledgeBase::new(
            ChunkingEngine::new(200, 30.0).unwrap(),
            Arc::new(HashingEmbedder::new(256).unwrap()),
            Arc::new(InMemoryVectorStore::new()),
        )
    }

    #[tokio::test]
    async fn indexes_folder_and_finds_matching_passage() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("benefits.txt"),
            "Employees can claim a fitness reimbursement of up to 500 USD per year",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("office.md"),
            "Printers are located on the third floor next to the kitchen",
        )
        .unwrap();

        let kb = knowledge_base();
        let report = kb
            .index_source(&DirectorySource::new(dir.path(), ["txt", "md"]))
            .await
            .unwrap();
        assert_eq!(report, IndexReport { documents: 2, chunks: 2 });
        assert_eq!(kb.len().await.unwrap(), 2);

        let outcome = kb
            .try_find("Employees can claim a fitness reimbursement of up to 500 USD per year")
            .await
            .unwrap();
        let text = outcome.text().unwrap();
        assert!(text.contains("fitness reimbursement"));
        assert!(!text.contains("Printers"));
    }

    #[tokio::test]
    async fn unrelated_question_finds_nothing() {
        let kb = knowledge_base();
        kb.index("Printers are located on the third floor").await.unwrap();
        let outcome = kb.try_find("volcanic eruption forecast").await.unwrap();
        assert_eq!(outcome, RetrievalOutcome::NotFound);
    }

    #[tokio::test]
    async fn empty_base_reports_empty() {
        assert!(knowledge_base().is_empty().await.unwrap());
    }
}
