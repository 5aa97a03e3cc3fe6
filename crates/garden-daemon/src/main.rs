use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use garden_daemon::{
    bridge::Bridge,
    config::AppConfig,
    daemon::Daemon,
    runtime::{self, SharedClock, SimulationTimers, SystemClock},
    simulation::Garden,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    info!(pet = %config.simulation.pet_name, "Starting garden daemon");

    let clock: SharedClock = Arc::new(SystemClock);
    let garden = runtime::shared(Garden::new(
        config.simulation.pet_name.clone(),
        Utc::now(),
    ));

    let timers = SimulationTimers::start(garden.clone(), clock.clone(), &config.simulation);
    let bridge = Bridge::bind(config.bridge.clone()).await?;

    let daemon = Daemon::new(
        garden,
        clock,
        bridge,
        config.simulation.broadcast_interval(),
    );
    daemon
        .run(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(?err, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await;

    timers.shutdown().await;
    info!("Garden daemon stopped");
    Ok(())
}
