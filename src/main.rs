use satnear::config::ServerConfig;
use satnear::logging;
use satnear::module::manager::CatalogManager;
use satnear::module::propagator::Sgp4Propagator;
use satnear::service::{self, AppState};

use anyhow::Result;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

const CONFIG_PATH: &str = "satnear.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load(CONFIG_PATH)?;

    logging::init_logging(&config.log_level);

    info!("satnear starting...");
    info!(
        "Catalog sources: {} / {}",
        config.elements_url, config.satcat_url
    );

    let catalogs = Arc::new(CatalogManager::new(&config)?);
    let state = AppState {
        catalogs,
        propagator: Arc::new(Sgp4Propagator),
    };

    let app = service::router(state).layer(TraceLayer::new_for_http());

    let addr = config.server_address();
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
