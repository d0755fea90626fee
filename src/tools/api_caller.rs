//! Generic HTTP GET tool

use super::{build_http_client, ToolHandler};
use crate::error::AgentError;
use crate::Result;
use reqwest::Client;
use tracing::debug;

pub struct ApiCallerTool {
    client: Client,
}

impl ApiCallerTool {
    pub fn new() -> Self {
        Self {
            client: build_http_client(),
        }
    }
}

impl Default for ApiCallerTool {
    fn default() -> Self {
        Self::new()
    }
}

/// First whitespace-separated token that looks like an http(s) URL.
fn extract_url(input: &str) -> Option<&str> {
    input
        .split_whitespace()
        .find(|token| token.starts_with("http://") || token.starts_with("https://"))
}

#[async_trait::async_trait]
impl ToolHandler for ApiCallerTool {
    fn name(&self) -> &str {
        "api_caller"
    }

    fn can_handle(&self, input: &str) -> bool {
        input.to_lowercase().contains("call api") || input.starts_with("http")
    }

    fn score(&self, input: &str) -> i32 {
        if input.to_lowercase().contains("call api") {
            10
        } else if input.starts_with("http") {
            8
        } else {
            1
        }
    }

    async fn handle(&self, input: &str) -> Result<String> {
        let url = extract_url(input).ok_or_else(|| {
            AgentError::InvalidToolInput(format!("No http(s) URL found in '{}'", input))
        })?;
        debug!(url = %url, "API call");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AgentError::ToolError(format!("API request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AgentError::ToolError(format!(
                "API returned {} for {}: {}",
                status, url, body
            )));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_url() {
        assert_eq!(
            extract_url("call api https://example.com/data now"),
            Some("https://example.com/data")
        );
        assert_eq!(extract_url("http://localhost:8080/x"), Some("http://localhost:8080/x"));
        assert_eq!(extract_url("call api please"), None);
    }

    #[test]
    fn test_score_tiers() {
        let tool = ApiCallerTool::new();
        assert_eq!(tool.score("Call API https://a.b"), 10);
        assert_eq!(tool.score("https://a.b"), 8);
        assert!(!tool.can_handle("weather today"));
    }

    #[tokio::test]
    async fn test_missing_url_is_invalid_input() {
        let err = ApiCallerTool::new().handle("call api nowhere").await.err().unwrap();
        assert!(matches!(err, AgentError::InvalidToolInput(_)));
    }
}
