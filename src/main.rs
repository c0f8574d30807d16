use tracing::{error, info, Instrument};

use postrelay::app_config::AppConfig;
use postrelay::app_system::{setup_tracing, DashboardSystem};
use postrelay::demo;
use postrelay::export::write_export;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::load().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_level);

    info!("Starting PostRelay dashboard");

    let system = DashboardSystem::new(&config);

    let span = tracing::info_span!("walkthrough");
    let report = demo::run_walkthrough(&system.client).instrument(span).await;

    match &report {
        Ok(report) => info!(
            created = %report.created.id,
            transitions = report.transitions,
            orders = report.summary.total_orders,
            notifications = report.summary.total_notifications,
            delivered = report.summary.delivered_orders,
            revenue = report.summary.revenue,
            "Walkthrough complete"
        ),
        Err(e) => error!(error = %e, "Walkthrough failed"),
    }

    let snapshot = system
        .client
        .export_snapshot()
        .await
        .map_err(|e| e.to_string())?;
    match write_export(&config.export.directory, &snapshot) {
        Ok(path) => info!(path = %path.display(), "Session exported"),
        Err(e) => error!(error = %e, "Export failed"),
    }

    // Shutdown system gracefully
    system.shutdown().await.map_err(|e| e.to_string())?;

    report.map(|_| ()).map_err(|e| e.to_string())
}
