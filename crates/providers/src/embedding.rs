//! Adapts a [`Provider`]'s embedding endpoint to the knowledge pipeline's
//! [`Embedder`] trait.

use async_trait::async_trait;
use ragent_core::error::KnowledgeError;
use ragent_core::knowledge::Embedder;
use ragent_core::provider::{EmbeddingRequest, Provider};
use std::sync::Arc;
use tracing::debug;

/// Embeds text one input at a time through a remote provider.
pub struct ProviderEmbedder {
    provider: Arc<dyn Provider>,
    model: String,
    dimensions: usize,
}

impl ProviderEmbedder {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, dimensions: usize) -> Self {
        Self {
            provider,
            model: model.into(),
            dimensions,
        }
    }
}

#[async_trait]
impl Embedder for ProviderEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, KnowledgeError> {
        let request = EmbeddingRequest {
            model: self.model.clone(),
            inputs: vec![text.to_string()],
            dimensions: Some(self.dimensions),
        };

        let response = self
            .provider
            .embed(request)
            .await
            .map_err(|e| KnowledgeError::Embedding(e.to_string()))?;

        let vector = response.embeddings.into_iter().next().ok_or_else(|| {
            KnowledgeError::Embedding(format!(
                "provider '{}' returned no embedding",
                self.provider.name()
            ))
        })?;

        if vector.len() != self.dimensions {
            return Err(KnowledgeError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        debug!(
            provider = %self.provider.name(),
            model = %self.model,
            dims = vector.len(),
            "Embedded text"
        );
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragent_core::error::ProviderError;
    use ragent_core::provider::{EmbeddingResponse, ProviderRequest, ProviderResponse};

    /// Returns a fixed vector for every input.
    struct FixedEmbeddings(Vec<f32>);

    #[async_trait]
    impl Provider for FixedEmbeddings {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            Err(ProviderError::NotConfigured("chat".into()))
        }

        async fn embed(
            &self,
            request: EmbeddingRequest,
        ) -> Result<EmbeddingResponse, ProviderError> {
            assert_eq!(request.inputs.len(), 1);
            Ok(EmbeddingResponse {
                embeddings: vec![self.0.clone()],
                model: request.model,
                usage: None,
            })
        }
    }

    /// A chat-only provider.
    struct NoEmbeddings;

    #[async_trait]
    impl Provider for NoEmbeddings {
        fn name(&self) -> &str {
            "chat-only"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            Err(ProviderError::NotConfigured("chat".into()))
        }
    }

    #[tokio::test]
    async fn returns_provider_vector() {
        let embedder = ProviderEmbedder::new(Arc::new(FixedEmbeddings(vec![0.6, 0.8])), "m", 2);
        assert_eq!(embedder.embed("hello").await.unwrap(), vec![0.6, 0.8]);
        assert_eq!(embedder.dimensions(), 2);
    }

    #[tokio::test]
    async fn wrong_length_is_rejected() {
        let embedder = ProviderEmbedder::new(Arc::new(FixedEmbeddings(vec![1.0; 3])), "m", 4);
        let err = embedder.embed("hello").await.unwrap_err();
        assert!(matches!(
            err,
            KnowledgeError::DimensionMismatch { expected: 4, actual: 3 }
        ));
    }

    #[tokio::test]
    async fn unsupported_provider_surfaces_as_embedding_error() {
        let embedder = ProviderEmbedder::new(Arc::new(NoEmbeddings), "m", 4);
        let err = embedder.embed("hello").await.unwrap_err();
        assert!(matches!(err, KnowledgeError::Embedding(msg) if msg.contains("chat-only")));
    }
}
