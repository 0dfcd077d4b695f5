//! Agent configuration loading and data-directory resolution.
//!
//! The agent config is a YAML file (`agent.yaml` by default) naming the
//! model, generation settings, and the tool functions the agent may
//! call. There is no fallback: a missing or unparseable file is a
//! startup error.

use hearsay_types::config::AgentConfig;
use hearsay_types::error::ConfigError;

use std::path::{Path, PathBuf};

/// Load the agent configuration from a YAML file.
///
/// # Errors
///
/// [`ConfigError::Io`] when the file cannot be read,
/// [`ConfigError::Parse`] when it is not valid agent-config YAML.
pub async fn load_agent_config(path: &Path) -> Result<AgentConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

    serde_yaml_ng::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Resolve the data directory: `HEARSAY_DATA_DIR` env override, else
/// `~/.hearsay`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HEARSAY_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hearsay")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.yaml");
        tokio::fs::write(
            &path,
            r#"
model: claude-sonnet-4-20250514
temperature: 0.3
system_prompt: "You are a helpful group-chat assistant."
tools:
  - web_search
  - crypto_price_usd
"#,
        )
        .await
        .unwrap();

        let config = load_agent_config(&path).await.unwrap();
        assert_eq!(config.model, "claude-sonnet-4-20250514");
        assert!((config.temperature - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.max_tokens, AgentConfig::DEFAULT_MAX_TOKENS);
        assert_eq!(config.tools, vec!["web_search", "crypto_price_usd"]);
    }

    #[tokio::test]
    async fn test_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_agent_config(&dir.path().join("absent.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[tokio::test]
    async fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.yaml");
        tokio::fs::write(&path, "model: [unclosed").await.unwrap();

        let err = load_agent_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
