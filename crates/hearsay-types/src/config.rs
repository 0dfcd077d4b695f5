//! Configuration types for the bot process and the agent.
//!
//! `BotConfig` is assembled from CLI flags / environment variables at
//! startup; `AgentConfig` is read from a YAML file (`agent.yaml` by
//! default) and controls the LLM-driven agent layer.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use std::path::PathBuf;

/// Process-level configuration, assembled at startup.
#[derive(Debug)]
pub struct BotConfig {
    /// Chat platform API token. Never logged, never in Debug output.
    pub token: SecretString,
    /// Audit database URL (`sqlite::memory:` by default).
    pub database_url: String,
    /// Where the persisted history snapshot lives.
    pub history_file: PathBuf,
    /// Path to the agent YAML configuration.
    pub agent_config_path: PathBuf,
    /// Verbose logging.
    pub debug: bool,
}

/// Agent configuration loaded from a YAML file.
///
/// Only `model` is required; everything else has a sensible default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// LLM model identifier.
    pub model: String,
    /// Sampling temperature for LLM responses.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens per LLM response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: i32,
    /// System prompt injected ahead of the conversation context.
    #[serde(default)]
    pub system_prompt: String,
    /// Names of the tool functions the agent may call.
    #[serde(default)]
    pub tools: Vec<String>,
}

impl AgentConfig {
    /// Default sampling temperature.
    pub const DEFAULT_TEMPERATURE: f64 = 0.7;
    /// Default max tokens per response.
    pub const DEFAULT_MAX_TOKENS: i32 = 4096;
}

fn default_temperature() -> f64 {
    AgentConfig::DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> i32 {
    AgentConfig::DEFAULT_MAX_TOKENS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_config_defaults() {
        let config: AgentConfig =
            serde_json::from_str(r#"{"model": "claude-sonnet-4-20250514"}"#).unwrap();
        assert_eq!(config.model, "claude-sonnet-4-20250514");
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.max_tokens, 4096);
        assert!(config.system_prompt.is_empty());
        assert!(config.tools.is_empty());
    }

    #[test]
    fn test_agent_config_explicit_fields_win() {
        let config: AgentConfig = serde_json::from_str(
            r#"{"model": "m", "temperature": 0.2, "max_tokens": 512, "tools": ["web_search"]}"#,
        )
        .unwrap();
        assert!((config.temperature - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.tools, vec!["web_search"]);
    }
}
