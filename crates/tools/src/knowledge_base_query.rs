//! Knowledge base query tool — lets the model pull grounding text itself.

use async_trait::async_trait;
use ragent_core::error::ToolError;
use ragent_core::knowledge::RetrievalOutcome;
use ragent_core::tool::{Tool, ToolResult};
use ragent_knowledge::SimilarityRetriever;
use std::sync::Arc;

pub struct KnowledgeBaseQueryTool {
    retriever: Arc<SimilarityRetriever>,
}

impl KnowledgeBaseQueryTool {
    pub fn new(retriever: Arc<SimilarityRetriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl Tool for KnowledgeBaseQueryTool {
    fn name(&self) -> &str {
        "knowledge_base_query"
    }

    fn description(&self) -> &str {
        "Query the knowledge base for passages relevant to a question. Returns the matching passages, one per line, or says that nothing relevant was found."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to find relevant knowledge"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments {
                tool_name: self.name().into(),
                reason: "missing 'query' argument".into(),
            })?;

        let outcome = self
            .retriever
            .retrieve(query)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.name().into(),
                reason: e.to_string(),
            })?;

        Ok(match outcome {
            RetrievalOutcome::Found(text) => ToolResult::text(text),
            RetrievalOutcome::NotFound => {
                ToolResult::failure(format!("No relevant knowledge was found for: {query}"))
            }
        })
    }
}
