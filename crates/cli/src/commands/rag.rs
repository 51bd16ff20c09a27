//! `ragent rag` — index a folder, then answer questions grounded on it.

use std::path::PathBuf;
use std::sync::Arc;
use ragent_agent::{RagAgent, RagAnswer, assembler};
use ragent_config::{AppConfig, EmbeddingBackend};
use ragent_core::knowledge::{Embedder, VectorStore};
use ragent_core::provider::Provider;
use ragent_core::tool::ToolRegistry;
use ragent_knowledge::{
    ChunkingEngine, DirectorySource, HashingEmbedder, InMemoryVectorStore, KnowledgeBase,
    SimilarityRetriever,
};
use ragent_providers::ProviderEmbedder;
use ragent_tools::KnowledgeBaseQueryTool;

use super::runtime;
use crate::scenarios::{RAG_INSTRUCTIONS, RAG_QUESTIONS, TOOL_RAG_INSTRUCTIONS};

pub async fn run(
    api_key: Option<String>,
    docs: Option<PathBuf>,
    hashing: bool,
    as_tool: bool,
    questions: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = runtime::load_config(api_key)?;
    runtime::require_api_key(&config)?;

    let provider = runtime::default_provider(&config)?;
    let embedder = build_embedder(&config, Arc::clone(&provider), hashing)?;
    let chunking = ChunkingEngine::new(config.chunking.window_size, config.chunking.overlap_percent)?;
    let store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::new());
    let knowledge = Arc::new(KnowledgeBase::new(
        chunking,
        Arc::clone(&embedder),
        Arc::clone(&store),
    ));

    let dir = docs.unwrap_or_else(|| config.knowledge.documents_dir.clone());
    let source = DirectorySource::new(dir.clone(), config.knowledge.extensions.iter().cloned());

    eprint!("  Indexing {}...", dir.display());
    let report = knowledge.index_source(&source).await?;
    eprint!("\r");
    println!(
        "  Indexed {} document(s) into {} chunk(s) from {}",
        report.documents,
        report.chunks,
        dir.display()
    );

    let questions = if questions.is_empty() {
        RAG_QUESTIONS.iter().map(|q| q.to_string()).collect()
    } else {
        questions
    };

    if as_tool {
        let retriever = Arc::new(SimilarityRetriever::new(embedder, store));
        let tools = ToolRegistry::new().with(KnowledgeBaseQueryTool::new(retriever))?;
        let dispatch = runtime::dispatch_loop(&config, provider, tools);
        for question in &questions {
            println!("  You > {question}");
            let mut conv = assembler::build(TOOL_RAG_INSTRUCTIONS, question);
            runtime::print_answer(&dispatch.run(&mut conv).await?);
            runtime::print_separator();
        }
        return Ok(());
    }

    let agent = RagAgent::new(
        knowledge,
        runtime::dispatch_loop(&config, provider, ToolRegistry::new()),
        RAG_INSTRUCTIONS,
    );

    for question in &questions {
        println!("  You > {question}");
        match agent.answer(question).await? {
            RagAnswer::Answered { answer, .. } => runtime::print_answer(&answer),
            RagAnswer::NoKnowledge => runtime::print_answer(&format!(
                "Knowledge was not found for user query: {question}"
            )),
        }
        runtime::print_separator();
    }

    Ok(())
}

/// `--hashing` forces the local embedder; otherwise `[embedding] backend` decides.
fn build_embedder(
    config: &AppConfig,
    provider: Arc<dyn Provider>,
    hashing: bool,
) -> Result<Arc<dyn Embedder>, Box<dyn std::error::Error>> {
    let dimensions = config.embedding.dimensions;
    if hashing || config.embedding.backend == EmbeddingBackend::Hashing {
        return Ok(Arc::new(HashingEmbedder::new(dimensions)?));
    }
    Ok(Arc::new(ProviderEmbedder::new(
        provider,
        &config.embedding.model,
        dimensions,
    )))
}
