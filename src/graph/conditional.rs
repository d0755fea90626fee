//! Conditional graph traversal
//!
//! Nodes are keyed by id. After a node replies, the edges leaving it are
//! checked in declaration order and the first whose predicate accepts the
//! reply decides the next node; the reply becomes that node's input.

use super::{AgentGraph, EdgePredicate, GraphEdge, GraphNode};
use crate::agent::AgentUnit;
use crate::config::Config;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_GRAPH_STEPS: usize = 50;

pub struct ConditionalGraph {
    nodes: HashMap<String, Arc<AgentUnit>>,
    edges: Vec<GraphEdge>,
    start_id: String,
    max_steps: Option<usize>,
}

impl ConditionalGraph {
    pub fn start_id(&self) -> &str {
        &self.start_id
    }

    pub fn max_steps(&self) -> Option<usize> {
        self.max_steps
    }

    pub fn node(&self, id: &str) -> Option<&Arc<AgentUnit>> {
        self.nodes.get(id)
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    fn next_hop(&self, from: &str, response: &str) -> Option<&GraphEdge> {
        self.edges
            .iter()
            .filter(|edge| edge.from == from)
            .find(|edge| edge.predicate.matches(response))
    }
}

#[async_trait]
impl AgentGraph for ConditionalGraph {
    async fn run(&self, input: &str) -> Result<String> {
        let mut current_id = self.start_id.clone();
        let mut current_input = input.to_string();
        let mut steps = 0usize;

        info!(start = %self.start_id, nodes = self.nodes.len(), "Graph traversal started");

        loop {
            if self.max_steps.is_some_and(|limit| steps >= limit) {
                warn!(
                    node = %current_id,
                    steps,
                    "Graph step bound reached - returning current input"
                );
                return Ok(current_input);
            }

            let Some(agent) = self.nodes.get(&current_id) else {
                debug!(node = %current_id, "Node not found - returning current input");
                return Ok(current_input);
            };

            let response = agent.converse(&current_input).await?;
            steps += 1;

            let Some(edge) = self.next_hop(&current_id, &response) else {
                info!(node = %current_id, steps, "Graph reached terminal node");
                return Ok(response);
            };

            debug!(
                from = %edge.from,
                to = %edge.to,
                predicate = %edge.predicate.describe(),
                "Following edge"
            );
            current_id = edge.to.clone();
            current_input = response;
        }
    }
}

/// Fluent construction of a [`ConditionalGraph`].
pub struct ConditionalGraphBuilder {
    nodes: HashMap<String, Arc<AgentUnit>>,
    edges: Vec<GraphEdge>,
    max_steps: Option<usize>,
}

impl Default for ConditionalGraphBuilder {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            max_steps: Some(DEFAULT_MAX_GRAPH_STEPS),
        }
    }
}

impl ConditionalGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from `AGENTIC_MAX_GRAPH_STEPS` when it was set.
    pub fn from_config(config: &Config) -> Self {
        let builder = Self::new();
        match config.max_graph_steps {
            Some(steps) => builder.max_steps(steps),
            None => builder,
        }
    }

    /// Re-adding an id replaces the earlier agent.
    pub fn add_node(mut self, id: impl Into<String>, agent: Arc<AgentUnit>) -> Self {
        self.nodes.insert(id.into(), agent);
        self
    }

    pub fn add_graph_node(self, node: GraphNode) -> Self {
        self.add_node(node.id, node.agent)
    }

    /// Edges are not validated against nodes; a hop to an unknown id ends
    /// the traversal with that hop's input.
    pub fn add_edge(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        predicate: impl EdgePredicate + 'static,
    ) -> Self {
        self.edges.push(GraphEdge::new(from, to, predicate));
        self
    }

    pub fn add_graph_edge(mut self, edge: GraphEdge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Maximum number of node invocations per traversal. Once it is spent
    /// the traversal returns the input the next node would have received,
    /// which is the last response; with `0` no node runs and the caller's
    /// input comes back unchanged.
    pub fn max_steps(mut self, steps: usize) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.max_steps = None;
        self
    }

    pub fn build(self, start_id: impl Into<String>) -> ConditionalGraph {
        ConditionalGraph {
            nodes: self.nodes,
            edges: self.edges,
            start_id: start_id.into(),
            max_steps: self.max_steps,
        }
    }
}
