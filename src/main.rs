use anyhow::{Context, Result, bail};
use persona_relay::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// `RUST_LOG` wins over `server.logs.level`; either must name a plain level.
fn resolve_log_level(configured: &str) -> Result<String> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured.to_string());

    if level.parse::<LevelFilter>().is_err() {
        bail!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        );
    }

    Ok(level)
}

fn init_tracing(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(level)?)
        .json()
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is not up yet, so config failures surface through anyhow on stderr.
    let config = config::load()
        .await
        .context("Failed to load configuration")?;

    let log_level = resolve_log_level(&config.server.logs.level)?;
    init_tracing(&log_level)?;

    info!(
        "Relay starting (log level {}, model {}, credential {})",
        log_level,
        config.llm.model,
        if config.llm.api_key().is_some() {
            "present"
        } else {
            "missing"
        }
    );

    server::run(config).await?;

    Ok(())
}
