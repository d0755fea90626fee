//! Agentic Orchestrator
//!
//! Composes agent units into single-step or multi-step workflows. Each unit
//! binds:
//! - a text-generation capability (Gemini, Ollama or any `LlmProvider`)
//! - a scored set of pluggable tools
//! - a conversation memory safe under concurrent turns
//!
//! Units run standalone or as nodes of a linear chain or a conditional graph.
//!
//! TURN:
//! RECORD → EMBED? → SELECT TOOL → RUN TOOL? → PROMPT → GENERATE → PATCH MEMORY

pub mod agent;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod logger;
pub mod memory;
pub mod tools;

#[cfg(test)]
mod testing;

pub use error::{AgentError, Result};

// Re-export common types
pub use agent::AgentUnit;
pub use config::{AgentConfig, Config, ProviderKind};
pub use graph::{AgentGraph, ChainBuilder, ConditionalGraph, ConditionalGraphBuilder, LinearChain};
pub use llm::{ChatModelProvider, EmbeddingProvider, LlmProvider};
pub use logger::Logger;
pub use memory::{ConversationMemory, Exchange};
pub use tools::{ToolHandler, ToolSet};
