//! # Roster Server
//!
//! Main entry point for the Roster user management application.

use roster_config::ConfigLoader;
use roster_core::RosterResult;
use roster_server::app::AppBuilder;
use roster_server::startup::{init_logging, print_banner};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> RosterResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_logging(&config.observability);
    print_banner();

    info!("Starting {} server...", config.app.name);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    AppBuilder::new().with_config(config).build().await?.run().await
}
