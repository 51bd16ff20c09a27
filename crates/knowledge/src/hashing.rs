//! Local feature-hashing embedder.
//!
//! Each lower-cased alphanumeric token is hashed (FNV-1a) into one of
//! `dimensions` buckets with a hash-derived sign, and the result is
//! L2-normalized. Texts sharing vocabulary score high under cosine
//! similarity. No network, fully deterministic.

use async_trait::async_trait;
use ragent_core::error::KnowledgeError;
use ragent_core::knowledge::Embedder;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Result<Self, KnowledgeError> {
        if dimensions == 0 {
            return Err(KnowledgeError::Embedding(
                "hashing embedder needs at least one dimension".into(),
            ));
        }
        Ok(Self { dimensions })
    }

    /// Embed synchronously.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in tokens(text) {
            let hash = fnv1a(token.as_bytes());
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(FNV_OFFSET, |hash, b| (hash ^ *b as u64).wrapping_mul(FNV_PRIME))
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, KnowledgeError> {
        Ok(self.vectorize(text))
    }
}
