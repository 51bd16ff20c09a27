//! `ragent chat` — one plain exchange, no tools.

use ragent_agent::assembler;
use ragent_core::tool::ToolRegistry;

use super::runtime;
use crate::scenarios::{CHAT_INSTRUCTIONS, CHAT_MESSAGE};

pub async fn run(
    api_key: Option<String>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = runtime::load_config(api_key)?;
    runtime::require_api_key(&config)?;

    let provider = runtime::default_provider(&config)?;
    let dispatch = runtime::dispatch_loop(&config, provider, ToolRegistry::new());

    let message = message.unwrap_or_else(|| CHAT_MESSAGE.to_string());
    let mut conv = assembler::build(CHAT_INSTRUCTIONS, &message);

    eprint!("  Thinking...");
    let answer = dispatch.run(&mut conv).await?;
    eprint!("\r              \r");
    runtime::print_answer(&answer);

    Ok(())
}
