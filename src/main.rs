//! HR proxy server entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hr_odoo_proxy::config::Config;
use hr_odoo_proxy::odoo::OdooClient;
use hr_odoo_proxy::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration; missing ERP settings stop startup here
    let config = Config::from_env().inspect_err(|e| eprintln!("Configuration error: {}", e))?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting HR proxy");
    tracing::info!("ERP endpoint: {}", config.odoo.url);
    tracing::info!("ERP database: {}", config.odoo.database);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (HR_API_PSK). Proxy routes are open!");
    }
    if config.odoo.session_ttl.is_zero() {
        tracing::info!("ERP session caching disabled; every call re-authenticates");
    }

    let odoo = Arc::new(OdooClient::new(config.odoo.clone())?);

    let state = AppState {
        odoo,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
