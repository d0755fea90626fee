//! Optional event sink attached to an agent
//!
//! `log` returns nothing: a sink's own failure is reported through
//! `tracing` and never reaches the turn that produced the message.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

const PREFIX: &str = "[Agentic]";

#[async_trait]
pub trait Logger: Send + Sync {
    async fn log(&self, message: &str);
}

/// Forwards to the process-wide `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

#[async_trait]
impl Logger for TracingLogger {
    async fn log(&self, message: &str) {
        info!("{} {}", PREFIX, message);
    }
}

/// Appends one line per message.
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Logger for FileLogger {
    async fn log(&self, message: &str) {
        let line = format!("{} {}\n", PREFIX, message);

        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await?;
            file.write_all(line.as_bytes()).await
        }
        .await;

        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "File logger write failed");
        }
    }
}

/// POSTs `{"log": "..."}` to an endpoint without waiting for the reply.
#[derive(Debug, Clone)]
pub struct RemoteLogger {
    client: Client,
    endpoint: String,
}

impl RemoteLogger {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Logger for RemoteLogger {
    async fn log(&self, message: &str) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let body = json!({ "log": format!("{} {}", PREFIX, message) });

        tokio::spawn(async move {
            if let Err(e) = client.post(&endpoint).json(&body).send().await {
                warn!(endpoint = %endpoint, error = %e, "Remote logger post failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_logger_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.log");
        let logger = FileLogger::new(&path);

        logger.log("first").await;
        logger.log("second").await;

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "[Agentic] first\n[Agentic] second\n");
    }

    #[tokio::test]
    async fn test_file_logger_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be opened for append
        let logger = FileLogger::new(dir.path());
        logger.log("ignored").await;
    }
}
