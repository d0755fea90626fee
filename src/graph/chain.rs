//! Linear chain traversal
//!
//! Each step runs the first agent (in list order) with a tool that accepts
//! the current text. A response no *other* agent can handle is terminal.
//! After `MAX_CHAIN_STEPS` steps the last agent that ran is invoked once
//! more on the current text and that reply is returned.

use super::AgentGraph;
use crate::agent::AgentUnit;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MAX_CHAIN_STEPS: usize = 10;

pub struct LinearChain {
    agents: Vec<Arc<AgentUnit>>,
}

impl LinearChain {
    pub fn new(agents: Vec<Arc<AgentUnit>>) -> Self {
        Self { agents }
    }

    pub fn agents(&self) -> &[Arc<AgentUnit>] {
        &self.agents
    }

    fn first_handler(&self, input: &str) -> Option<&Arc<AgentUnit>> {
        self.agents.iter().find(|agent| agent.can_handle(input))
    }

    fn another_can_handle(&self, current: &Arc<AgentUnit>, response: &str) -> bool {
        self.agents
            .iter()
            .any(|agent| !Arc::ptr_eq(agent, current) && agent.can_handle(response))
    }
}

#[async_trait]
impl AgentGraph for LinearChain {
    async fn run(&self, input: &str) -> Result<String> {
        let mut current_input = input.to_string();
        let mut last_agent: Option<&Arc<AgentUnit>> = None;
        let mut steps = 0;

        info!(agents = self.agents.len(), "Chain traversal started");

        while steps < MAX_CHAIN_STEPS {
            let Some(agent) = self.first_handler(&current_input) else {
                debug!(step = steps, "No agent can handle input - stopping");
                return Ok(current_input);
            };

            debug!(step = steps, agent = %agent.name(), "Chain step");
            last_agent = Some(agent);

            let response = agent.converse(&current_input).await?;

            if !self.another_can_handle(agent, &response) {
                info!(steps = steps + 1, agent = %agent.name(), "Chain reached terminal response");
                return Ok(response);
            }

            current_input = response;
            steps += 1;
        }

        match last_agent {
            Some(agent) => {
                warn!(
                    max_steps = MAX_CHAIN_STEPS,
                    agent = %agent.name(),
                    "Chain step bound reached - finalizing with last agent"
                );
                agent.converse(&current_input).await
            }
            None => Ok(current_input),
        }
    }
}

/// Fluent construction of a [`LinearChain`].
#[derive(Default)]
pub struct ChainBuilder {
    agents: Vec<Arc<AgentUnit>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_agent(mut self, agent: Arc<AgentUnit>) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn build(self) -> LinearChain {
        LinearChain::new(self.agents)
    }
}
