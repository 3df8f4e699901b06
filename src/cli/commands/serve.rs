use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, instrument, trace};

use super::init_database;
use crate::config::{initialize_app_state, AppConfig};
use crate::router::{create_router, with_metrics};

/// Migrates the database, then serves the API until the process is stopped.
#[instrument]
pub async fn serve(database_url: Option<String>, bind_address: Option<String>) -> Result<()> {
    trace!("Entering serve function");
    info!("Supply chain API starting up");

    let mut config = AppConfig::from_env()?;
    if let Some(database_url) = database_url {
        config.database_url = database_url;
    }
    if let Some(bind_address) = bind_address {
        config.bind_address = bind_address;
    }
    debug!("Effective configuration: {:?}", config);

    init_database(&config.database_url).await?;

    let bind_address = config.bind_address.clone();
    let state = match initialize_app_state(config, None).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    let app = with_metrics(create_router(state));
    debug!("Router created successfully");

    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Supply chain API running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
