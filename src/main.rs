use anyhow::{Context, Result};
use ce_bridge::{config, CeClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let cfg = config::load_from_env().context("failed to load configuration")?;
    config::validate_config(&cfg).context("invalid configuration")?;

    info!(
        "CE-Bridge v{} connecting to {}",
        env!("CARGO_PKG_VERSION"),
        cfg.base_url()
    );

    let client = CeClient::new(&cfg)?;

    let health = client
        .health()
        .await
        .context("remote service health check failed")?;
    info!("remote service healthy: {}", health);

    let status = client.process_status().await?;
    match (status.attached, status.pid, status.name) {
        (true, pid, name) => info!(
            "opened process: {} (pid {})",
            name.unwrap_or_else(|| "<unknown>".into()),
            pid.map_or_else(|| "?".into(), |p| p.to_string())
        ),
        (false, ..) => info!("no process currently opened"),
    }

    Ok(())
}
