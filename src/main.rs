use tracing::{error, info};

use postbus::broker::Broker;
use postbus::config::load_config;
use postbus::service::MessageBoard;
use postbus::store::ChannelStore;
use postbus::transport::websocket::start_websocket_server;
use postbus::utils::error::ServerError;
use postbus::utils::logging;

#[tokio::main]
async fn main() {
    logging::init("info");

    if let Err(e) = run().await {
        error!("server failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = load_config()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let broker = Broker::new(config.broker.queue_capacity);
    let board = MessageBoard::new(ChannelStore::seeded(), broker);

    tokio::select! {
        result = start_websocket_server(&addr, board) => {
            result?;
            error!("websocket server exited unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, exiting");
        }
    }

    Ok(())
}
