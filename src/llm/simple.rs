//! Offline providers for demos and tests

use super::{ChatModelProvider, EmbeddingProvider};
use crate::Result;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Replies with the last turn it was given.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoChatModel;

#[async_trait]
impl ChatModelProvider for EchoChatModel {
    async fn chat(&self, messages: &[String]) -> Result<String> {
        Ok(messages.last().cloned().unwrap_or_default())
    }
}

pub const DEFAULT_DIMENSIONS: usize = 128;

/// Deterministic embedding derived from chained SHA-256 digests.
/// Same text, same vector; values lie in [0, 1].
#[derive(Debug, Clone)]
pub struct HashEmbeddingProvider {
    dimensions: usize,
}

impl HashEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl Default for HashEmbeddingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    async fn embed(&self, input: &str) -> Result<Vec<f32>> {
        let mut vector = Vec::with_capacity(self.dimensions);
        let mut block = Sha256::digest(input.as_bytes());

        while vector.len() < self.dimensions {
            for byte in block.iter() {
                if vector.len() == self.dimensions {
                    break;
                }
                vector.push(f32::from(*byte) / 255.0);
            }
            block = Sha256::digest(block);
        }

        Ok(vector)
    }
}
