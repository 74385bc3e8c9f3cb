//! secret-relay - HTTP Server Entry Point
//!
//! Loads the mounted secrets, then starts the HTTP server that exposes them.

use anyhow::Context;
use secret_relay::{
    api,
    config::{Config, LogFormat},
    secrets,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;
    init_logging(config.log_format);

    tracing::info!(
        secrets_dir = %config.secrets_dir.display(),
        port = config.port,
        "Loaded configuration"
    );

    // The walk must finish before anything can serve requests.
    let snapshot = secrets::load(&config.secrets_dir).with_context(|| {
        format!(
            "Failed to load secrets from {}",
            config.secrets_dir.display()
        )
    })?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(api::serve(&config, snapshot))
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "secret_relay=info,tower_http=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}
