//! Provider router — selects the correct LLM provider based on config.
//!
//! Handles provider creation and routing requests to the right backend.

use ragent_config::AppConfig;
use ragent_core::provider::Provider;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use crate::openai_compat::OpenAiCompatProvider;

/// Routes LLM requests to the correct provider.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    /// Create a new router with a default provider.
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// Register a provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get the default provider.
    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    pub fn default_name(&self) -> &str {
        &self.default_provider
    }

    /// Get a specific provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// List all registered provider names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Build providers from configuration.
///
/// Every `[providers.<name>]` table becomes an OpenAI-compatible provider.
/// The default provider is always present, even when not configured.
pub fn build_from_config(config: &AppConfig) -> ProviderRouter {
    let mut router = ProviderRouter::new(&config.default_provider);
    let timeout = Duration::from_secs(config.dispatch.request_timeout_secs);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let base_url = provider_config
            .api_url
            .clone()
            .unwrap_or_else(|| default_base_url(name));

        let provider = OpenAiCompatProvider::with_timeout(name, base_url, api_key, timeout);
        router.register(name.clone(), Arc::new(provider));
    }

    if router.get(&config.default_provider).is_none() {
        let api_key = config.api_key.clone().unwrap_or_default();
        let provider = OpenAiCompatProvider::with_timeout(
            &config.default_provider,
            default_base_url(&config.default_provider),
            api_key,
            timeout,
        );
        router.register(config.default_provider.clone(), Arc::new(provider));
    }

    router
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "gemini" => "https://generativelanguage.googleapis.com/v1beta/openai".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}

/// The chat model to use for `provider_name`: the provider's own default
/// when configured, otherwise the global default.
pub fn model_for(config: &AppConfig, provider_name: &str) -> String {
    config
        .providers
        .get(provider_name)
        .and_then(|p| p.default_model.clone())
        .unwrap_or_else(|| config.default_model.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragent_config::ProviderConfig;

    #[test]
    fn router_register_and_lookup() {
        let mut router = ProviderRouter::new("gemini");
        router.register("gemini", Arc::new(OpenAiCompatProvider::gemini("key")));

        assert!(router.get("gemini").is_some());
        assert!(router.get("nonexistent").is_none());
        assert!(router.default().is_some());
        assert_eq!(router.default_name(), "gemini");
    }

    #[test]
    fn default_base_urls() {
        assert!(default_base_url("gemini").contains("generativelanguage.googleapis.com"));
        assert!(default_base_url("openai").contains("api.openai.com"));
        assert!(default_base_url("ollama").contains("localhost:11434"));
    }

    #[test]
    fn build_from_default_config() {
        let config = AppConfig::default();
        let router = build_from_config(&config);
        let provider = router.default().unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn configured_providers_are_registered() {
        let mut config = AppConfig::default();
        config.providers.insert(
            "ollama".into(),
            ProviderConfig {
                api_key: None,
                api_url: Some("http://gpu-box:11434/v1".into()),
                default_model: Some("llama3.1".into()),
            },
        );
        let router = build_from_config(&config);
        assert_eq!(router.list(), vec!["gemini", "ollama"]);
        assert_eq!(model_for(&config, "ollama"), "llama3.1");
        assert_eq!(model_for(&config, "gemini"), "gemini-2.5-flash");
    }
}
