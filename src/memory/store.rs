//! Conversation exchange storage
//!
//! Every read and write takes the same mutex for the duration of that one
//! call. A turn spans two calls (`begin_turn` / `complete_turn`), so the
//! patch targets the exchange named by the handle, never "whatever is last".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// One request/response round for an agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exchange {
    pub exchange_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user_input: String,
    /// `None` until the turn completes
    pub agent_response: Option<String>,
    /// Comma-joined embedding of `user_input`, kept for observability only
    pub input_embedding: Option<String>,
}

impl Exchange {
    pub fn new(user_input: String) -> Self {
        Self {
            exchange_id: Uuid::new_v4(),
            created_at: Utc::now(),
            user_input,
            agent_response: None,
            input_embedding: None,
        }
    }

    /// Response text, empty while the turn is still open
    pub fn response(&self) -> &str {
        self.agent_response.as_deref().unwrap_or_default()
    }

    fn render(&self) -> String {
        format!("User: {}\nAgent: {}", self.user_input, self.response())
    }
}

/// Issued by `begin_turn`; consumed by `complete_turn`.
///
/// Not `Clone`, so a turn can be completed at most once.
#[derive(Debug)]
pub struct TurnHandle {
    exchange_id: Uuid,
}

impl TurnHandle {
    pub fn exchange_id(&self) -> Uuid {
        self.exchange_id
    }
}

/// Ordered, append-only exchange list owned by one agent
#[derive(Debug, Default)]
pub struct ConversationMemory {
    exchanges: Mutex<Vec<Exchange>>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    // =============================
    // Turn-scoped API
    // =============================

    /// Append a new exchange with an empty response and hand back its token.
    pub async fn begin_turn(&self, user_input: &str) -> TurnHandle {
        let exchange = Exchange::new(user_input.to_string());
        let exchange_id = exchange.exchange_id;

        let mut exchanges = self.exchanges.lock().await;
        exchanges.push(exchange);

        debug!(%exchange_id, count = exchanges.len(), "Turn opened");
        TurnHandle { exchange_id }
    }

    /// Record the serialized input embedding on the turn's exchange.
    pub async fn attach_embedding(&self, turn: &TurnHandle, embedding: &[f32]) {
        let serialized = embedding
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut exchanges = self.exchanges.lock().await;
        if let Some(exchange) = find_mut(&mut exchanges, turn.exchange_id) {
            exchange.input_embedding = Some(serialized);
        }
    }

    /// Patch the response of exactly the exchange this turn opened.
    pub async fn complete_turn(&self, turn: TurnHandle, response: &str) {
        let mut exchanges = self.exchanges.lock().await;

        match find_mut(&mut exchanges, turn.exchange_id) {
            Some(exchange) => {
                exchange.agent_response = Some(response.to_string());
                debug!(exchange_id = %turn.exchange_id, "Turn completed");
            }
            None => {
                warn!(exchange_id = %turn.exchange_id, "Turn handle refers to unknown exchange");
            }
        }
    }

    // =============================
    // Last-exchange API
    // =============================

    /// Append a new exchange with an empty response.
    pub async fn record_user_input(&self, text: &str) {
        let mut exchanges = self.exchanges.lock().await;
        exchanges.push(Exchange::new(text.to_string()));
    }

    /// Replace the response of the most recent exchange. No-op when empty.
    ///
    /// Two concurrent turns using this pair can patch each other's exchange;
    /// agents go through `begin_turn` / `complete_turn` instead.
    pub async fn record_agent_response(&self, text: &str) {
        let mut exchanges = self.exchanges.lock().await;
        match exchanges.last_mut() {
            Some(last) => last.agent_response = Some(text.to_string()),
            None => debug!("Dropping agent response: no exchange recorded yet"),
        }
    }

    // =============================
    // Reads
    // =============================

    /// `User: ..\nAgent: ..` blocks joined by newlines, oldest first.
    pub async fn format_history(&self) -> String {
        let exchanges = self.exchanges.lock().await;
        exchanges
            .iter()
            .map(Exchange::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Owned copy, safe to iterate without the lock.
    pub async fn snapshot(&self) -> Vec<Exchange> {
        self.exchanges.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.exchanges.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.exchanges.lock().await.is_empty()
    }
}

/// Turns complete roughly in order, so scan from the back.
fn find_mut(exchanges: &mut [Exchange], exchange_id: Uuid) -> Option<&mut Exchange> {
    exchanges
        .iter_mut()
        .rev()
        .find(|e| e.exchange_id == exchange_id)
}
