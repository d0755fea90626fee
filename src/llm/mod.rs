//! Text-generation capabilities
//!
//! Providers report failures as `Err`; the agent renders them as
//! `Error: ...` text so a turn never aborts on a vendor failure.

use crate::Result;
use async_trait::async_trait;

pub mod gemini;
pub mod ollama;
pub mod simple;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use simple::{EchoChatModel, HashEmbeddingProvider};

/// Single-shot generation
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Multi-turn chat over an ordered list of turns, oldest first
#[async_trait]
pub trait ChatModelProvider: Send + Sync {
    async fn chat(&self, messages: &[String]) -> Result<String>;
}

/// Fixed-length vector embedding of a text
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, input: &str) -> Result<Vec<f32>>;
}
