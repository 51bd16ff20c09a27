//! Knowledge-base domain types and collaborator traits.
//!
//! Raw [`Document`]s are split into [`Chunk`]s, each chunk is embedded and
//! stored as an [`IndexedEntry`] under a sequence key, and queries come back
//! as a [`RetrievalOutcome`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::KnowledgeError;

/// Raw text plus the identifier of where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Source identifier (usually a file path)
    pub source: String,

    /// The full text
    pub text: String,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}

/// A windowed slice of a document's words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
}

/// A stored passage. Never mutated once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedEntry {
    /// Sequence key, unique within one store and issued in indexing order
    pub key: u64,

    /// The passage text
    pub content: String,

    /// Embedding of `content`
    pub vector: Vec<f32>,
}

/// A search hit returned by a [`VectorStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub key: u64,
    pub content: String,

    /// Similarity to the query (cosine similarity for the built-in stores)
    pub score: f32,
}

/// Result of a knowledge query: either grounding text or nothing relevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "text", rename_all = "snake_case")]
pub enum RetrievalOutcome {
    /// Accepted passages, one per line, in rank order.
    Found(String),
    NotFound,
}

impl RetrievalOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The retrieved text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Found(text) => Some(text),
            Self::NotFound => None,
        }
    }
}

/// Words a chunking window advances by.
///
/// The overlap is `window_size * overlap_percent / 100` rounded to the nearest
/// word. A window that would not advance (step of zero) or an overlap outside
/// 0..=100 is a configuration error.
pub fn window_step(window_size: usize, overlap_percent: f64) -> std::result::Result<usize, KnowledgeError> {
    let invalid = || KnowledgeError::InvalidChunking {
        window_size,
        overlap_percent,
    };

    if window_size == 0 || !overlap_percent.is_finite() || !(0.0..=100.0).contains(&overlap_percent) {
        return Err(invalid());
    }

    let overlap = (window_size as f64 * overlap_percent / 100.0).round() as usize;
    match window_size.saturating_sub(overlap) {
        0 => Err(invalid()),
        step => Ok(step),
    }
}

/// Turns text into a fixed-length vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Length of every vector this embedder returns.
    fn dimensions(&self) -> usize;

    async fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, KnowledgeError>;
}

/// Nearest-neighbour storage for indexed passages.
///
/// The store owns the key sequence so that every indexer writing into the
/// same store draws from one counter.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// The store name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Reserve the next sequence key. Strictly increasing, safe to call concurrently.
    fn next_key(&self) -> u64;

    /// Insert an entry, replacing any entry with the same key.
    async fn upsert(&self, entry: IndexedEntry) -> std::result::Result<(), KnowledgeError>;

    /// Up to `top_k` entries ordered by descending similarity to `vector`.
    async fn search(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> std::result::Result<Vec<ScoredEntry>, KnowledgeError>;

    /// Number of stored entries.
    async fn count(&self) -> std::result::Result<usize, KnowledgeError>;
}

/// Produces the documents to index (e.g., the files in a folder).
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn documents(&self) -> std::result::Result<Vec<Document>, KnowledgeError>;
}
