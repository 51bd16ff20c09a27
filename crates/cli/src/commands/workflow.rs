//! `ragent workflow` — order requests handled through the order tools.

use std::sync::Arc;
use ragent_agent::assembler;
use ragent_tools::{OrderBook, workflow_registry};
use tracing::error;

use super::runtime;
use crate::scenarios::{WORKFLOW_INSTRUCTIONS, WORKFLOW_MESSAGES};

pub async fn run(
    api_key: Option<String>,
    messages: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = runtime::load_config(api_key)?;
    runtime::require_api_key(&config)?;

    let provider = runtime::default_provider(&config)?;
    let book = Arc::new(OrderBook::sample());
    let dispatch = runtime::dispatch_loop(&config, provider, workflow_registry(Arc::clone(&book))?);

    let messages = if messages.is_empty() {
        WORKFLOW_MESSAGES.iter().map(|m| m.to_string()).collect()
    } else {
        messages
    };

    // Each request gets a fresh conversation over the same order book.
    for message in &messages {
        let mut conv = assembler::build(WORKFLOW_INSTRUCTIONS, message);
        match dispatch.run(&mut conv).await {
            Ok(answer) => runtime::print_answer(&answer),
            Err(e) => {
                error!(error = %e, "Workflow request failed");
                eprintln!("  [Error] {e}");
            }
        }
        runtime::print_separator();
    }

    let reasons = book.reasons().await;
    if !reasons.is_empty() {
        println!("  Steps that could not be performed:");
        for logged in reasons {
            println!("    [{}] {}", logged.logged_at.format("%H:%M:%S"), logged.reason);
        }
    }

    Ok(())
}
