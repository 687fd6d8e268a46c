//! Libris API server binary.

use libris_config::ConfigLoader;
use libris_core::LibrisResult;
use libris_server::{init_logging, print_banner, AppBuilder};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Server error: {}", e);
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> LibrisResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_logging(&config.observability);
    print_banner();
    info!(
        "Starting {} v{} ({})",
        config.app.name, config.app.version, config.app.environment
    );

    AppBuilder::new().with_config(config).build().await?.serve().await
}
