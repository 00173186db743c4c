use queue_service::{config::QueueConfig, Application};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = QueueConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "queue-service",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    )?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
