use std::error::Error;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use flight_server::catalog::CatalogStore;
use flight_server::config::ServerConfig;
use flight_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env()?;

    // Fail fast if the dataset is unreadable
    let store = CatalogStore::open(&config.data_path).await?;
    let stats = store.snapshot().await.stats();
    info!(
        flights = stats.total_flights,
        airports = stats.total_airports,
        dropped = stats.load.dropped,
        "flight catalog ready"
    );

    if let Some(period) = config.reload_interval {
        let reloader = store.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match reloader.reload().await {
                    Ok(stats) => info!(flights = stats.total_flights, "reloaded flight catalog"),
                    Err(e) => error!(error = %e, "failed to reload flight catalog"),
                }
            }
        });
    }

    let state = AppState::new(store, config.search);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "flight search listening");
    info!("endpoints: GET /health, /search, /airports, /stats");

    axum::serve(listener, app).await?;
    Ok(())
}
