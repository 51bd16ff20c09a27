//! Built-in tools for ragent.
//!
//! Tools give the model a way to look things up and act: who the user is,
//! what state their orders are in, and what the knowledge base says.

pub mod knowledge_base_query;
pub mod orders;
pub mod profile;

use ragent_core::error::ToolError;
use ragent_core::tool::ToolRegistry;
use std::sync::Arc;

pub use knowledge_base_query::KnowledgeBaseQueryTool;
pub use orders::{Order, OrderBook, OrderStatus, Shipment, order_tools};

/// Registry with the user profile tools (`GetMyName`, `GetMyAge`).
pub fn profile_registry() -> Result<ToolRegistry, ToolError> {
    ToolRegistry::new()
        .with(profile::get_my_name())?
        .with(profile::get_my_age())
}

/// Registry with the order workflow tools over `book`.
pub fn workflow_registry(book: Arc<OrderBook>) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    for tool in order_tools(book) {
        registry.register(tool)?;
    }
    Ok(registry)
}

/// Every built-in tool except the knowledge base query, which needs a
/// retriever.
pub fn default_registry(book: Arc<OrderBook>) -> Result<ToolRegistry, ToolError> {
    let mut registry = workflow_registry(book)?;
    registry.register(Box::new(profile::get_my_name()))?;
    registry.register(Box::new(profile::get_my_age()))?;
    Ok(registry)
}
