//! Hearsay bot entry point.
//!
//! Binary name: `hearsay`
//!
//! Parses configuration from CLI flags and environment variables,
//! initializes tracing and application state, then drives the transport
//! event loop until the stream closes or persistence fails.

mod handler;
mod state;
mod transport;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

use handler::EventHandler;
use hearsay_types::config::BotConfig;
use state::AppState;
use transport::ConsoleTransport;

#[derive(Parser)]
#[command(name = "hearsay", about = "Chat bot backend with durable conversation history")]
struct Cli {
    /// Chat platform API token.
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    token: String,

    /// Audit database URL.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite::memory:")]
    database_url: String,

    /// History snapshot path; defaults to `<data_dir>/history.json`.
    #[arg(long, env = "HISTORY_FILE")]
    history_file: Option<PathBuf>,

    /// Agent configuration file.
    #[arg(long, env = "AGENT_CONFIG", default_value = "agent.yaml")]
    agent_config: PathBuf,

    /// Verbose logging (`--debug false` or `DEBUG=false` to quiet down).
    #[arg(long, env = "DEBUG", default_value_t = true, action = clap::ArgAction::Set)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing; RUST_LOG wins over the --debug default
    let fallback = if cli.debug {
        "info,hearsay_bot=debug,hearsay_core=debug,hearsay_infra=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = BotConfig {
        token: SecretString::from(cli.token),
        database_url: cli.database_url,
        history_file: cli
            .history_file
            .unwrap_or_else(|| hearsay_infra::config::resolve_data_dir().join("history.json")),
        agent_config_path: cli.agent_config,
        debug: cli.debug,
    };

    let state = AppState::init(&config).await?;
    tracing::info!(model = %state.agent_config.model, "hearsay ready");

    let handler = EventHandler::new(
        ConsoleTransport::new(),
        state.history.clone(),
        state.audit.clone(),
        state.tools.clone(),
    );
    handler.run().await?;

    Ok(())
}
