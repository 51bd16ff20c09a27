//! Model provider implementations for ragent.
//!
//! All providers implement the `ragent_core::Provider` trait.
//! The router selects the correct provider based on configuration, and
//! [`ProviderEmbedder`] exposes a provider's embedding endpoint to the
//! knowledge pipeline.

pub mod embedding;
pub mod openai_compat;
pub mod router;

pub use embedding::ProviderEmbedder;
pub use openai_compat::OpenAiCompatProvider;
pub use router::{ProviderRouter, build_from_config, model_for};
