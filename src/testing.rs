//! Scripted collaborators shared by unit tests

use crate::error::AgentError;
use crate::llm::LlmProvider;
use crate::tools::ToolHandler;
use crate::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Generation backed by a plain function of the prompt; counts calls.
pub struct FnLlm<F> {
    reply: F,
    calls: AtomicUsize,
}

impl<F> FnLlm<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    pub fn new(reply: F) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<F> LlmProvider for FnLlm<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(prompt)
    }
}

/// Returns a fixed reply regardless of the prompt.
pub fn fixed_llm(reply: &'static str) -> Arc<dyn LlmProvider> {
    Arc::new(FnLlm::new(move |_: &str| Ok(reply.to_string())))
}

/// The `User:` line of a built prompt.
pub fn user_line(prompt: &str) -> &str {
    prompt
        .lines()
        .find_map(|l| l.strip_prefix("User: "))
        .unwrap_or_default()
}

/// Handles inputs containing a keyword and echoes them back.
pub struct KeywordTool {
    pub name: &'static str,
    pub keyword: &'static str,
    pub score: i32,
}

#[async_trait]
impl ToolHandler for KeywordTool {
    fn name(&self) -> &str {
        self.name
    }

    fn can_handle(&self, input: &str) -> bool {
        input.contains(self.keyword)
    }

    fn score(&self, _input: &str) -> i32 {
        self.score
    }

    async fn handle(&self, input: &str) -> Result<String> {
        Ok(format!("{} saw {}", self.name, input))
    }
}

pub fn keyword_tool(keyword: &'static str) -> Arc<dyn ToolHandler> {
    Arc::new(KeywordTool {
        name: keyword,
        keyword,
        score: 5,
    })
}

/// Handles everything; `handle` returns the input unchanged.
pub struct AlwaysTool;

#[async_trait]
impl ToolHandler for AlwaysTool {
    fn name(&self) -> &str {
        "always"
    }

    fn can_handle(&self, _input: &str) -> bool {
        true
    }

    fn score(&self, _input: &str) -> i32 {
        1
    }

    async fn handle(&self, input: &str) -> Result<String> {
        Ok(input.to_string())
    }
}

/// Handles everything and fails with the given error.
pub struct FailingTool {
    pub fatal: bool,
}

#[async_trait]
impl ToolHandler for FailingTool {
    fn name(&self) -> &str {
        "failing"
    }

    fn can_handle(&self, _input: &str) -> bool {
        true
    }

    fn score(&self, _input: &str) -> i32 {
        1
    }

    async fn handle(&self, _input: &str) -> Result<String> {
        if self.fatal {
            Err(AgentError::ContractViolation("tool raised".to_string()))
        } else {
            Err(AgentError::ToolError("disk on fire".to_string()))
        }
    }
}
