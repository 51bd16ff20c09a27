//! Knowledge pipeline for ragent.
//!
//! Documents are split into overlapping word windows ([`ChunkingEngine`]),
//! embedded and stored under sequence keys ([`KnowledgeIndexer`]), and
//! queried by cosine similarity ([`SimilarityRetriever`]).
//!
//! The in-memory store and the hashing embedder need no network, which makes
//! the whole pipeline usable offline and in tests.

pub mod chunking;
pub mod hashing;
pub mod in_memory;
pub mod indexer;
pub mod knowledge_base;
pub mod retriever;
pub mod source;
pub mod vector;

pub use chunking::{ChunkingEngine, Chunks};
pub use hashing::HashingEmbedder;
pub use in_memory::InMemoryVectorStore;
pub use indexer::KnowledgeIndexer;
pub use knowledge_base::{IndexReport, KnowledgeBase};
pub use retriever::SimilarityRetriever;
pub use source::DirectorySource;
pub use vector::cosine_similarity;
