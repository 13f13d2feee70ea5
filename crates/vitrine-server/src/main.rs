use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vitrine_server::config::ServerConfig;
use vitrine_server::state::AppState;

/// Serve collection predictions for free-text item descriptions.
#[derive(Debug, Parser)]
#[command(name = "vitrine", version)]
struct Args {
    /// Directory holding the fitted artifacts (classifier, scaler, label
    /// encoder, meta).
    #[arg(long, env = "VITRINE_ARTIFACTS_DIR", default_value = "data")]
    artifacts_dir: PathBuf,

    /// Directory holding embedding models, one subdirectory per model name.
    #[arg(long, env = "VITRINE_MODELS_DIR", default_value = "models")]
    models_dir: PathBuf,

    /// Bind address.
    #[arg(long, env = "VITRINE_BIND_ADDR", default_value = "0.0.0.0")]
    bind_addr: String,

    /// Port.
    #[arg(long, env = "VITRINE_PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ServerConfig {
        bind_addr: args.bind_addr,
        port: args.port,
        artifacts_dir: args.artifacts_dir,
        models_dir: args.models_dir,
    };

    let state = AppState::load(&config)?;
    vitrine_server::server::serve(&config, state).await
}
