use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use userhub::api;
use userhub::config::CONFIG;
use userhub::core::services::UserService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&CONFIG.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(config = ?*CONFIG, "Loaded configuration");

    let service = Arc::new(UserService::from_config(&CONFIG).await?);
    let app = api::router(service, Duration::from_secs(CONFIG.request_timeout_secs));

    // Start server
    let addr = SocketAddr::from((CONFIG.host, CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
