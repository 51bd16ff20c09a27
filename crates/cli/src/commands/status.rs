//! `ragent status` — Show the effective configuration.

use std::sync::Arc;
use ragent_config::AppConfig;
use ragent_knowledge::retriever::{MIN_SCORE, TOP_K};
use ragent_providers::{build_from_config, model_for};
use ragent_tools::{OrderBook, default_registry};

use super::runtime;

pub async fn run(api_key: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = runtime::load_config(api_key)?;
    let router = build_from_config(&config);
    let tools = default_registry(Arc::new(OrderBook::sample()))?;

    println!("ragent Status");
    println!("=============");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Provider:     {}", config.default_provider);
    println!("  Providers:    {}", router.list().join(", "));
    println!("  Model:        {}", model_for(&config, &config.default_provider));
    println!("  Temperature:  {}", config.default_temperature);
    println!("  Max tokens:   {}", config.default_max_tokens);
    println!("  API key:      {}", if config.has_api_key() { "configured" } else { "missing" });
    println!("  Embedding:    {:?} ({}, {} dims)", config.embedding.backend, config.embedding.model, config.embedding.dimensions);
    println!(
        "  Chunking:     {} words, {}% overlap",
        config.chunking.window_size, config.chunking.overlap_percent
    );
    println!("  Retrieval:    top {TOP_K}, min score {MIN_SCORE}");
    println!("  Documents:    {}", config.knowledge.documents_dir.display());
    println!("  Extensions:   {}", config.knowledge.extensions.join(", "));
    println!("  Iterations:   {}", config.dispatch.max_iterations);
    println!("  Timeout:      {}s", config.dispatch.request_timeout_secs);
    println!("  Tools:        {}", tools.names().join(", "));

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  Config file found");
    } else {
        println!("\n  No config file — run `ragent init` first");
    }

    Ok(())
}
