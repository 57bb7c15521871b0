use billing_portal::config::get_configuration;
use billing_portal::services::init_metrics;
use billing_portal::startup::Application;
use dotenvy::dotenv;
use service_core::error::AppError;
use service_core::observability::logging::init_tracing;
use tokio::signal;
use tracing::info;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        AppError::from(e)
    })?;

    init_tracing(
        &configuration.telemetry.service_name,
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    );

    init_metrics();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        source_kind = ?configuration.source.kind,
        source = %configuration.source.location,
        settle_wait_ms = configuration.view.settle_wait_ms,
        "Configuration loaded"
    );

    let app = Application::build(&configuration, "billing-portal/static")
        .await
        .map_err(|e| anyhow::anyhow!("Application build error: {}", e))?;

    app.run_until_stopped(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Service shutdown complete");
    Ok(())
}
