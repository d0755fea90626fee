//! Tool trait and ordered tool set
//!
//! A tool answers certain inputs directly instead of the generation
//! capability. Selection is score-based; see [`selector`].

use crate::error::AgentError;
use crate::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub mod api_caller;
pub mod calculator;
pub mod file_reader;
pub mod selector;
pub mod web_search;

pub use api_caller::ApiCallerTool;
pub use calculator::CalculatorTool;
pub use file_reader::FileReaderTool;
pub use selector::{select_tool, ScoreSelector, ToolSelector};
pub use web_search::WebSearchTool;

/// Capability set every tool exposes.
///
/// `can_handle` and `score` must be pure for selection to be deterministic.
/// `handle` reports expected failures as `Err`; the agent turns those into
/// `Error: ...` text. Only `AgentError::ContractViolation` aborts a turn.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    fn name(&self) -> &str;
    fn can_handle(&self, input: &str) -> bool;
    fn score(&self, input: &str) -> i32;
    async fn handle(&self, input: &str) -> Result<String>;
}

/// Tools in declaration order. Order is the selection tie-break.
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn ToolHandler>) {
        self.tools.push(tool);
    }

    pub fn with(mut self, tool: Arc<dyn ToolHandler>) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    pub fn list(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ToolHandler>> {
        self.tools.iter()
    }

    /// True when any tool accepts the input. Graph routing relies on this.
    pub fn any_can_handle(&self, input: &str) -> bool {
        self.tools.iter().any(|t| t.can_handle(input))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl FromIterator<Arc<dyn ToolHandler>> for ToolSet {
    fn from_iter<I: IntoIterator<Item = Arc<dyn ToolHandler>>>(iter: I) -> Self {
        Self {
            tools: iter.into_iter().collect(),
        }
    }
}

/// Pooled client shared by the HTTP-backed tools.
pub(crate) fn build_http_client() -> Client {
    Client::builder()
        .pool_idle_timeout(Duration::from_secs(60))
        .pool_max_idle_per_host(8)
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Build a tool from its plugin name (case-insensitive).
pub fn load_tool(name: &str) -> Result<Arc<dyn ToolHandler>> {
    let tool: Arc<dyn ToolHandler> = match name.trim().to_lowercase().as_str() {
        "calculator" => Arc::new(CalculatorTool),
        "websearch" => Arc::new(WebSearchTool::new()),
        "filereader" => Arc::new(FileReaderTool),
        "apicaller" => Arc::new(ApiCallerTool::new()),
        other => return Err(AgentError::ToolNotFound(other.to_string())),
    };
    Ok(tool)
}

/// Load every name in order, failing on the first unknown one.
pub fn load_tools<'a, I>(names: I) -> Result<ToolSet>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(load_tool).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_known_tools_in_order() {
        let set = load_tools(["Calculator", "websearch", " filereader ", "APICALLER"]).unwrap();
        assert_eq!(set.list(), vec!["calculator", "web_search", "file_reader", "api_caller"]);
    }

    #[test]
    fn test_load_unknown_tool() {
        let err = load_tool("teleporter").err().unwrap();
        assert!(matches!(err, AgentError::ToolNotFound(name) if name == "teleporter"));
    }

    #[test]
    fn test_any_can_handle() {
        let set = ToolSet::new().with(Arc::new(CalculatorTool));
        assert!(set.any_can_handle("2 + 2"));
        assert!(!set.any_can_handle("hello there"));
        assert!(set.get("calculator").is_some());
        assert!(set.get("web_search").is_none());
    }
}
