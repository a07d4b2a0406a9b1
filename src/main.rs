use std::sync::Arc;

use profilesvc::{
    build_app, config::Config, logging, service::InMemoryProfileService, AppState,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    if config.log_request_bodies {
        warn!("request body logging is enabled; profile payloads will appear in debug logs");
    }

    let service = Arc::new(InMemoryProfileService::new());
    let bind_socket = config.bind_socket()?;
    let state = AppState::new(service, config.transport_options())
        .with_request_deadline(config.request_deadline);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
