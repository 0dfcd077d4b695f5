//! Application state wiring all services together.
//!
//! The history store and handler are generic over their ports; AppState
//! pins them to the concrete infra implementations and owns startup
//! ordering: history snapshot first (a corrupt one must stop the boot),
//! then the audit database, then the agent config and its tools.

use hearsay_core::history::store::HistoryStore;
use hearsay_core::tool::ToolRegistry;
use hearsay_infra::config::load_agent_config;
use hearsay_infra::snapshot::JsonSnapshotStore;
use hearsay_infra::sqlite::audit::SqliteMessageAudit;
use hearsay_infra::sqlite::pool::DatabasePool;
use hearsay_infra::tool::registry_from_config;
use hearsay_types::config::{AgentConfig, BotConfig};
use tracing::info;

use std::sync::Arc;

/// The history store pinned to its production snapshot codec.
pub type ConcreteHistoryStore = HistoryStore<JsonSnapshotStore>;

/// Shared application state holding all services.
pub struct AppState {
    pub history: Arc<ConcreteHistoryStore>,
    pub audit: Arc<SqliteMessageAudit>,
    pub tools: Arc<ToolRegistry>,
    pub agent_config: AgentConfig,
}

impl AppState {
    /// Initialize the application state: load the history snapshot,
    /// connect the audit database, read the agent config, build tools.
    pub async fn init(config: &BotConfig) -> anyhow::Result<Self> {
        // A bare relative filename has an empty parent; nothing to create.
        if let Some(parent) = config.history_file.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let history =
            HistoryStore::open(JsonSnapshotStore::new(&config.history_file)).await?;
        info!(path = %config.history_file.display(), "history store ready");

        let db_pool = DatabasePool::new(&config.database_url).await?;
        let audit = SqliteMessageAudit::new(db_pool);

        let agent_config = load_agent_config(&config.agent_config_path).await?;
        let tools = registry_from_config(&agent_config)?;
        info!(
            model = %agent_config.model,
            tools = ?tools.names(),
            "agent configured"
        );

        Ok(Self {
            history: Arc::new(history),
            audit: Arc::new(audit),
            tools: Arc::new(tools),
            agent_config,
        })
    }
}
