//! Agent unit - one decision node
//!
//! RECORD → EMBED? → SELECT TOOL → RUN TOOL? → PROMPT → GENERATE → PATCH MEMORY
//!
//! Capability failures come back as `Error: ...` text on the normal path.
//! Only fatal defects (`AgentError::is_fatal`) leave `converse` as `Err`.

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::graph::AgentGraph;
use crate::llm::{ChatModelProvider, EmbeddingProvider, LlmProvider};
use crate::logger::Logger;
use crate::memory::ConversationMemory;
use crate::tools::{ScoreSelector, ToolSelector, ToolSet};
use crate::Result;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Exact reply the model is told to give for refused requests.
pub const REFUSAL_TEXT: &str = "Not permitted.";

pub const SYSTEM_PREAMBLE: &str = "You are an autonomous AI agent. Reason carefully, use tool \
results when they are provided, and give concise, context-aware answers. If the user asks for \
credentials, personal information, or unsafe actions, refuse and reply with exactly \
'Not permitted.'";

/// Preamble, the user line, an optional tool line, then `AI:`.
pub fn build_prompt(input: &str, tool_result: Option<&str>) -> String {
    match tool_result {
        Some(result) => format!(
            "{}\nUser: {}\nTool Result: {}\nAI:",
            SYSTEM_PREAMBLE, input, result
        ),
        None => format!("{}\nUser: {}\nAI:", SYSTEM_PREAMBLE, input),
    }
}

/// Generation capability, tools and memory bound together.
/// Immutable after construction apart from memory contents.
pub struct AgentUnit {
    name: String,
    llm: Arc<dyn LlmProvider>,
    tools: ToolSet,
    memory: ConversationMemory,
    selector: Arc<dyn ToolSelector>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    chat_model: Option<Arc<dyn ChatModelProvider>>,
    logger: Option<Arc<dyn Logger>>,
    graph: Option<Arc<dyn AgentGraph>>,
    config: AgentConfig,
}

impl AgentUnit {
    pub fn new(llm: Arc<dyn LlmProvider>, tools: ToolSet) -> Self {
        Self {
            name: "agent".to_string(),
            llm,
            tools,
            memory: ConversationMemory::new(),
            selector: Arc::new(ScoreSelector),
            embedder: None,
            chat_model: None,
            logger: None,
            graph: None,
            config: AgentConfig::default(),
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Replace the default score-based selector, e.g. with one that
    /// uses the input embedding.
    pub fn with_selector(self, selector: Arc<dyn ToolSelector>) -> Self {
        Self { selector, ..self }
    }

    pub fn with_embedding_provider(self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder: Some(embedder),
            ..self
        }
    }

    /// With a chat model, replies are generated from the full history
    /// plus the new prompt instead of the prompt alone.
    pub fn with_chat_model(self, chat_model: Arc<dyn ChatModelProvider>) -> Self {
        Self {
            chat_model: Some(chat_model),
            ..self
        }
    }

    pub fn with_logger(self, logger: Arc<dyn Logger>) -> Self {
        Self {
            logger: Some(logger),
            ..self
        }
    }

    /// Route every `chat` call through a workflow graph instead of `converse`.
    pub fn with_graph(self, graph: Arc<dyn AgentGraph>) -> Self {
        Self {
            graph: Some(graph),
            ..self
        }
    }

    pub fn with_config(self, config: AgentConfig) -> Self {
        Self { config, ..self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }

    /// True when one of this agent's tools accepts the input.
    pub fn can_handle(&self, input: &str) -> bool {
        self.tools.any_can_handle(input)
    }

    /// Entry point: the attached graph when there is one, otherwise a
    /// single `converse` turn. Never both.
    pub async fn chat(&self, input: &str) -> Result<String> {
        if let Some(graph) = &self.graph {
            debug!(agent = %self.name, "Delegating turn to workflow graph");
            return graph.run(input).await;
        }
        self.converse(input).await
    }

    /// Run one turn of the decision logic.
    pub async fn converse(&self, input: &str) -> Result<String> {
        info!(agent = %self.name, "Turn started");
        self.log(&format!("{} received: {}", self.name, input)).await;

        // === RECORD ===
        let turn = self.memory.begin_turn(input).await;

        // === EMBED ===
        let embedding = self.embed_input(input).await;
        if let Some(vector) = &embedding {
            self.memory.attach_embedding(&turn, vector).await;
        }

        // === SELECT + RUN TOOL, PROMPT + GENERATE ===
        let reply = match self.respond(input, embedding.as_deref()).await {
            Ok(reply) => reply,
            Err(e) => {
                // only fatal errors get here; the exchange is still closed
                warn!(agent = %self.name, error = %e, "Turn aborted");
                self.memory.complete_turn(turn, &e.to_payload()).await;
                return Err(e);
            }
        };

        // === PATCH MEMORY ===
        self.memory.complete_turn(turn, &reply).await;

        info!(agent = %self.name, reply_chars = reply.len(), "Turn completed");
        self.log(&format!("{} replied: {}", self.name, reply)).await;

        Ok(reply)
    }

    /// Tool selection and generation. Recoverable failures are already
    /// folded into text, so an `Err` here is always fatal.
    async fn respond(&self, input: &str, embedding: Option<&[f32]>) -> Result<String> {
        // === SELECT + RUN TOOL ===
        let tool_result = match self
            .selector
            .select(input, embedding, &self.tools)
        {
            Some(tool) => {
                debug!(agent = %self.name, tool = tool.name(), "Tool selected");
                let outcome = self.timed(tool.handle(input)).await;
                Some(self.fold("tool", outcome)?)
            }
            None => {
                debug!(agent = %self.name, "No tool can handle input");
                None
            }
        };

        // === PROMPT + GENERATE ===
        let prompt = build_prompt(input, tool_result.as_deref());

        match &self.chat_model {
            Some(chat_model) => {
                let mut turns: Vec<String> = self
                    .memory
                    .format_history()
                    .await
                    .split('\n')
                    .map(str::to_string)
                    .collect();
                turns.push(prompt);

                let outcome = self.timed(chat_model.chat(&turns)).await;
                self.fold("chat", outcome)
            }
            None => {
                let outcome = self.timed(self.llm.generate(&prompt)).await;
                self.fold("generate", outcome)
            }
        }
    }

    /// Unavailable embeddings, whatever the cause, mean "no embedding".
    async fn embed_input(&self, input: &str) -> Option<Vec<f32>> {
        let embedder = self.embedder.as_ref()?;

        match self.timed(embedder.embed(input)).await {
            Ok(vector) if !vector.is_empty() => Some(vector),
            Ok(_) => None,
            Err(e) => {
                warn!(agent = %self.name, error = %e, "Embedding unavailable");
                None
            }
        }
    }

    async fn timed<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.config.capability_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| AgentError::Timeout(limit))?,
            None => call.await,
        }
    }

    /// Recoverable failures become text; fatal ones propagate.
    fn fold(&self, capability: &str, outcome: Result<String>) -> Result<String> {
        match outcome {
            Ok(text) => Ok(text),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(agent = %self.name, capability, error = %e, "Capability failed");
                Ok(e.to_payload())
            }
        }
    }

    async fn log(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.log(message).await;
        }
    }
}
