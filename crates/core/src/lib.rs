//! # ragent Core
//!
//! Domain types, collaborator traits, and error definitions for ragent.
//! This crate has **no runtime or transport dependencies** — it defines the
//! domain model that every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (model completion, embedding, vector search,
//! document source, tool handler) is a trait here. Implementations live in
//! their respective crates, which keeps the dispatch loop and the retrieval
//! pipeline testable with scripted stand-ins.

pub mod error;
pub mod knowledge;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{DispatchError, Error, KnowledgeError, ProviderError, Result, ToolError};
pub use knowledge::{
    Chunk, Document, DocumentSource, Embedder, IndexedEntry, RetrievalOutcome, ScoredEntry,
    VectorStore, window_step,
};
pub use message::{Conversation, ConversationId, Message, MessageToolCall, Role};
pub use provider::{
    FinishReason, Provider, ProviderRequest, ProviderResponse, ResponseFormat, ToolDefinition,
};
pub use tool::{FunctionTool, Tool, ToolCall, ToolRegistry, ToolResult};
