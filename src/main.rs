use anyhow::Result;
use clap::Parser;
use digital_twin::{config::Config, http::HttpState};
use std::net::SocketAddr;
use tracing::info;

#[derive(Parser)]
#[command(name = "digital-twin")]
#[command(about = "Routine scoring, simulation and recommendation service", long_about = None)]
struct Cli {
    /// Address to listen on (overrides TWIN_HTTP_BIND and the config file)
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Path to the TOML config file (overrides DIGITAL_TWIN_CONFIG)
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_with(cli.config.as_deref()).map_err(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        e
    })?;
    if let Some(bind) = cli.bind {
        config.server.http_bind = bind;
    }

    tracing_subscriber::fmt()
        .with_env_filter(config.runtime.log_level.as_str())
        .with_ansi(false)
        .init();

    info!(
        "Configuration loaded from {}: provider={}, model={}, strict_validation={}",
        config.source.as_deref().unwrap_or("defaults"),
        config.completion.provider,
        config.completion.model,
        config.validation.strict
    );

    let state = HttpState::from_config(config)?;
    digital_twin::http::start_http_server(state).await
}
