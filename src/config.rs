//! Environment-driven configuration
//!
//! The binary loads `.env` first; library callers may build these structs
//! directly.

use crate::error::AgentError;
use crate::llm::{gemini, ollama};
use crate::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TOOLS: &str = "calculator,websearch,filereader,apicaller";

/// Per-agent knobs
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    /// Deadline for each generate / chat / embed / tool call.
    /// Expiry is reported as an `Error:` payload, not a hang.
    pub capability_timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Ollama,
}

impl FromStr for ProviderKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "ollama" => Ok(ProviderKind::Ollama),
            other => Err(AgentError::ConfigError(format!(
                "Unknown provider '{}', expected 'gemini' or 'ollama'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderKind,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub tools: Vec<String>,
    pub agent: AgentConfig,
    /// Step bound for conditional graphs; `None` keeps the builder default
    pub max_graph_steps: Option<usize>,
    pub log_file: Option<String>,
    pub log_endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            gemini_api_key: String::new(),
            gemini_model: gemini::DEFAULT_MODEL.to_string(),
            ollama_base_url: ollama::DEFAULT_BASE_URL.to_string(),
            ollama_model: ollama::DEFAULT_MODEL.to_string(),
            tools: split_list(DEFAULT_TOOLS),
            agent: AgentConfig::default(),
            max_graph_steps: None,
            log_file: None,
            log_endpoint: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get("AGENTIC_PROVIDER") {
            Some(value) => value.parse()?,
            None => defaults.provider,
        };

        let capability_timeout = get("AGENTIC_CAPABILITY_TIMEOUT_SECS")
            .map(|v| parse_number::<u64>("AGENTIC_CAPABILITY_TIMEOUT_SECS", &v))
            .transpose()?
            .map(Duration::from_secs);

        let max_graph_steps = get("AGENTIC_MAX_GRAPH_STEPS")
            .map(|v| parse_number::<usize>("AGENTIC_MAX_GRAPH_STEPS", &v))
            .transpose()?;

        Ok(Self {
            provider,
            gemini_api_key: get("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            ollama_base_url: get("OLLAMA_BASE_URL").unwrap_or(defaults.ollama_base_url),
            ollama_model: get("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            tools: get("AGENTIC_TOOLS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.tools),
            agent: AgentConfig { capability_timeout },
            max_graph_steps,
            log_file: get("AGENTIC_LOG_FILE"),
            log_endpoint: get("AGENTIC_LOG_ENDPOINT"),
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        AgentError::ConfigError(format!("{} must be a non-negative integer, got '{}'", key, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.provider, ProviderKind::Ollama);
        assert_eq!(config.ollama_base_url, "http://localhost:11434");
        assert_eq!(config.tools, vec!["calculator", "websearch", "filereader", "apicaller"]);
        assert!(config.agent.capability_timeout.is_none());
        assert!(config.max_graph_steps.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("AGENTIC_PROVIDER", "Gemini"),
            ("GEMINI_API_KEY", "secret"),
            ("AGENTIC_TOOLS", "calculator, filereader"),
            ("AGENTIC_CAPABILITY_TIMEOUT_SECS", "15"),
            ("AGENTIC_MAX_GRAPH_STEPS", "7"),
        ]))
        .unwrap();

        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.gemini_api_key, "secret");
        assert_eq!(config.tools, vec!["calculator", "filereader"]);
        assert_eq!(config.agent.capability_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.max_graph_steps, Some(7));
    }

    #[test]
    fn test_malformed_values_are_config_errors() {
        let err = Config::from_lookup(lookup(&[("AGENTIC_MAX_GRAPH_STEPS", "lots")]))
            .err()
            .unwrap();
        assert!(matches!(err, AgentError::ConfigError(_)));

        let err = Config::from_lookup(lookup(&[("AGENTIC_PROVIDER", "carrier-pigeon")]))
            .err()
            .unwrap();
        assert!(matches!(err, AgentError::ConfigError(_)));
    }
}
