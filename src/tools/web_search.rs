//! Web search via the DuckDuckGo instant-answer API

use super::{build_http_client, ToolHandler};
use crate::error::AgentError;
use crate::Result;
use reqwest::Client;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com";

pub struct WebSearchTool {
    client: Client,
    base_url: String,
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: build_http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ToolHandler for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn can_handle(&self, input: &str) -> bool {
        let lower = input.to_lowercase();
        lower.contains("search") || lower.contains("find")
    }

    fn score(&self, input: &str) -> i32 {
        let lower = input.to_lowercase();
        if lower.contains("search") {
            10
        } else if lower.contains("find") {
            7
        } else {
            1
        }
    }

    async fn handle(&self, input: &str) -> Result<String> {
        let url = format!("{}/", self.base_url);
        debug!(query = %input, "Web search request");

        let response = self
            .client
            .get(url)
            .query(&[("q", input), ("format", "json")])
            .send()
            .await
            .map_err(|e| AgentError::ToolError(format!("Web search request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AgentError::ToolError(format!(
                "Web search returned {}: {}",
                status, body
            )));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_scoring() {
        let tool = WebSearchTool::new();
        assert!(tool.can_handle("Search for tokio docs"));
        assert!(tool.can_handle("find me a recipe"));
        assert!(!tool.can_handle("hello"));
        assert_eq!(tool.score("search and find"), 10);
        assert_eq!(tool.score("find it"), 7);
        assert_eq!(tool.score("hello"), 1);
    }
}
