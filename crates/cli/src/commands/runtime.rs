//! Shared wiring: config, provider and dispatch loop.

use std::sync::Arc;
use ragent_agent::DispatchLoop;
use ragent_config::AppConfig;
use ragent_core::provider::Provider;
use ragent_core::tool::ToolRegistry;
use ragent_providers::{build_from_config, model_for};

/// Load the config file and apply the `--api-key` override.
pub fn load_config(api_key: Option<String>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        config.api_key = Some(key);
    }
    Ok(config)
}

pub fn require_api_key(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.has_api_key() || config.providers.values().any(|p| p.api_key.is_some()) {
        return Ok(());
    }

    eprintln!();
    eprintln!("  ERROR: No API key configured!");
    eprintln!();
    eprintln!("  Pass --api-key, or set one of these environment variables:");
    eprintln!("    GEMINI_API_KEY   (default provider)");
    eprintln!("    OPENAI_API_KEY");
    eprintln!("    RAGENT_API_KEY   (generic)");
    eprintln!();
    eprintln!("  Or add it to your config file:");
    eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
    eprintln!();
    Err("No API key found. See above for setup instructions.".into())
}

pub fn default_provider(config: &AppConfig) -> Result<Arc<dyn Provider>, Box<dyn std::error::Error>> {
    let router = build_from_config(config);
    Ok(router.default().ok_or("No default provider configured")?)
}

pub fn dispatch_loop(
    config: &AppConfig,
    provider: Arc<dyn Provider>,
    tools: ToolRegistry,
) -> DispatchLoop {
    DispatchLoop::new(
        provider,
        model_for(config, &config.default_provider),
        config.default_temperature,
        Arc::new(tools),
    )
    .with_max_iterations(config.dispatch.max_iterations)
    .with_max_tokens(config.default_max_tokens)
}

pub fn print_answer(answer: &str) {
    println!();
    for line in answer.lines() {
        println!("  Assistant > {line}");
    }
    println!();
}

pub fn print_separator() {
    println!("------------------------------------------------------");
}
