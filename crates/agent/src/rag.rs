//! Retrieval-augmented answering.
//!
//! The user question is looked up in the knowledge base first. When
//! relevant passages exist they are embedded in the system instructions and
//! the dispatch loop produces the grounded answer. When nothing relevant is
//! found the model is not called at all.

use std::sync::Arc;
use ragent_core::error::Error;
use ragent_core::knowledge::RetrievalOutcome;
use ragent_knowledge::KnowledgeBase;
use tracing::{debug, info};

use crate::assembler;
use crate::dispatch::DispatchLoop;

/// Outcome of one grounded question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RagAnswer {
    Answered {
        answer: String,
        /// The passages the answer was grounded on.
        knowledge: String,
    },
    /// Retrieval found nothing relevant; no model call was made.
    NoKnowledge,
}

/// Answers questions from an indexed knowledge base.
pub struct RagAgent {
    knowledge: Arc<KnowledgeBase>,
    dispatch: DispatchLoop,
    instructions: String,
}

impl RagAgent {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        dispatch: DispatchLoop,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            knowledge,
            dispatch,
            instructions: instructions.into(),
        }
    }

    pub async fn answer(&self, query: &str) -> Result<RagAnswer, Error> {
        let knowledge = match self.knowledge.try_find(query).await? {
            RetrievalOutcome::Found(text) => text,
            RetrievalOutcome::NotFound => {
                info!(query, "No knowledge found, skipping model call");
                return Ok(RagAnswer::NoKnowledge);
            }
        };

        debug!(query, bytes = knowledge.len(), "Grounding answer on retrieved knowledge");

        let mut conversation = assembler::build_grounded(&self.instructions, &knowledge, query);
        let answer = self.dispatch.run(&mut conversation).await?;

        Ok(RagAnswer::Answered { answer, knowledge })
    }
}
