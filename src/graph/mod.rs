//! Multi-agent workflow graphs
//!
//! Two traversal strategies over shared [`AgentUnit`]s:
//! - [`LinearChain`]: routes by which agent's tools accept the current text,
//!   bounded at [`chain::MAX_CHAIN_STEPS`] steps.
//! - [`ConditionalGraph`]: id-keyed nodes plus an ordered edge list whose
//!   predicates run against each response; first match wins.
//!
//! Nodes and edges are plain data. Steps of one traversal run strictly in
//! sequence; traversal state lives only inside `run`.

use crate::agent::AgentUnit;
use crate::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

pub mod chain;
pub mod conditional;

pub use chain::{ChainBuilder, LinearChain};
pub use conditional::{ConditionalGraph, ConditionalGraphBuilder};

#[async_trait]
pub trait AgentGraph: Send + Sync {
    async fn run(&self, input: &str) -> Result<String>;
}

/// Id plus a shared agent; the agent may also be used standalone.
#[derive(Clone)]
pub struct GraphNode {
    pub id: String,
    pub agent: Arc<AgentUnit>,
}

impl fmt::Debug for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphNode")
            .field("id", &self.id)
            .field("agent", &self.agent.name())
            .finish()
    }
}

/// Routing condition evaluated against a node's response text.
///
/// Any `Fn(&str) -> bool` closure is a predicate; the named structs below
/// also describe themselves in traces.
pub trait EdgePredicate: Send + Sync {
    fn matches(&self, response: &str) -> bool;

    fn describe(&self) -> String {
        "custom".to_string()
    }
}

impl<F> EdgePredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, response: &str) -> bool {
        self(response)
    }
}

/// Fires when the response contains a substring.
#[derive(Debug, Clone)]
pub struct Contains(pub String);

impl Contains {
    pub fn new(needle: impl Into<String>) -> Self {
        Self(needle.into())
    }
}

impl EdgePredicate for Contains {
    fn matches(&self, response: &str) -> bool {
        response.contains(self.0.as_str())
    }

    fn describe(&self) -> String {
        format!("contains({:?})", self.0)
    }
}

/// Fires when the response starts with a prefix, e.g. `"Error:"`.
#[derive(Debug, Clone)]
pub struct StartsWith(pub String);

impl StartsWith {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }
}

impl EdgePredicate for StartsWith {
    fn matches(&self, response: &str) -> bool {
        response.starts_with(self.0.as_str())
    }

    fn describe(&self) -> String {
        format!("starts_with({:?})", self.0)
    }
}

/// Fires unconditionally.
#[derive(Debug, Clone, Copy)]
pub struct Always;

impl EdgePredicate for Always {
    fn matches(&self, _response: &str) -> bool {
        true
    }

    fn describe(&self) -> String {
        "always".to_string()
    }
}

#[derive(Clone)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub predicate: Arc<dyn EdgePredicate>,
}

impl GraphEdge {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        predicate: impl EdgePredicate + 'static,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            predicate: Arc::new(predicate),
        }
    }
}

impl fmt::Debug for GraphEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphEdge")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("predicate", &self.predicate.describe())
            .finish()
    }
}
