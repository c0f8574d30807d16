use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument};

use crate::actors::DashboardService;
use crate::app_config::AppConfig;
use crate::clients::DashboardClient;
use crate::error::OrderError;
use crate::simulation::{RandomSimulation, SimulationProvider};
use crate::store::DashboardState;

/// Starts the dashboard actor, hands out its client, and shuts it down.
pub struct DashboardSystem {
    pub client: DashboardClient,
    handle: tokio::task::JoinHandle<()>,
}

impl DashboardSystem {
    /// Seeded state with the randomized simulation from `config`.
    #[instrument(name = "dashboard_system", skip(config))]
    pub fn new(config: &AppConfig) -> Self {
        let simulation = Arc::new(RandomSimulation::new(&config.simulation));
        Self::with_parts(
            config.channel_buffer,
            DashboardState::seeded(Utc::now()),
            simulation,
        )
    }

    pub fn with_parts(
        buffer_size: usize,
        state: DashboardState,
        simulation: Arc<dyn SimulationProvider>,
    ) -> Self {
        info!("Starting dashboard system");
        let (service, client) = DashboardService::new(buffer_size, state, simulation);
        let handle = tokio::spawn(service.run());
        info!("Dashboard system started");
        Self { client, handle }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), OrderError> {
        info!("Shutting down dashboard system");
        self.client.shutdown().await?;

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Service shutdown error");
            return Err(OrderError::ActorCommunicationError(format!(
                "Actor task failed: {:?}",
                e
            )));
        }

        info!("Dashboard system shutdown complete");
        Ok(())
    }
}
