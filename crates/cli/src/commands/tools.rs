//! `ragent tools` — the model looks the user up before answering.

use ragent_agent::assembler;

use super::runtime;
use crate::scenarios::{PROFILE_INSTRUCTIONS, PROFILE_MESSAGE};

pub async fn run(
    api_key: Option<String>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = runtime::load_config(api_key)?;
    runtime::require_api_key(&config)?;

    let provider = runtime::default_provider(&config)?;
    let tools = ragent_tools::profile_registry()?;
    let dispatch = runtime::dispatch_loop(&config, provider, tools);

    let message = message.unwrap_or_else(|| PROFILE_MESSAGE.to_string());
    let mut conv = assembler::build(PROFILE_INSTRUCTIONS, &message);

    eprint!("  Thinking...");
    let answer = dispatch.run(&mut conv).await?;
    eprint!("\r              \r");
    runtime::print_answer(&answer);

    let calls = conv.messages().iter().filter(|m| m.tool_call_id.is_some()).count();
    println!("  ({calls} tool call(s), {} messages)", conv.len());

    Ok(())
}
