//! Built-in tool functions and registry assembly.
//!
//! Three tools ship with the bot: web search and two price lookups.
//! Which of them the agent may call is decided by the agent config's
//! `tools:` list; enabling a name nothing here provides is a startup
//! error.

pub mod price;
pub mod search;

use hearsay_core::tool::ToolRegistry;
use hearsay_types::config::AgentConfig;
use hearsay_types::error::ConfigError;

pub use price::{CryptoPriceTool, StockPriceTool};
pub use search::WebSearchTool;

/// Build the tool registry from the agent config's `tools:` list.
pub fn registry_from_config(config: &AgentConfig) -> Result<ToolRegistry, ConfigError> {
    let mut registry = ToolRegistry::new();
    for name in &config.tools {
        match name.as_str() {
            "web_search" => registry.register(WebSearchTool::new()),
            "crypto_price_usd" => registry.register(CryptoPriceTool::new()),
            "stock_price" => registry.register(StockPriceTool::new()),
            other => return Err(ConfigError::UnknownTool(other.to_string())),
        }
    }
    Ok(registry)
}
