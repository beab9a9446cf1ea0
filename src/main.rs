use std::sync::Arc;

use tracing::{error, info};

use relaycast::config::load_config;
use relaycast::hub::BroadcastHub;
use relaycast::transport::websocket::start_websocket_server;
use relaycast::utils::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("info");

    let config = load_config().expect("Failed to load configuration");
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let hub = Arc::new(BroadcastHub::with_policy(config.hub.include_sender));

    tokio::select! {
        _ = start_websocket_server(addr, hub, config.clone()) => {
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }
}
