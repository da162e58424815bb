//! Broadcast Chat Server - Entry Point
//!
//! Binds the listening port and runs the accept loop until Ctrl-C.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use broadcast_chat::{Multiplexer, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=broadcast_chat=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("broadcast_chat=info")),
        )
        .init();

    let config = ServerConfig::parse();

    let multiplexer = Multiplexer::bind(&config).await?;
    info!("Broadcast Chat Server listening on {}", multiplexer.local_addr()?);

    tokio::select! {
        _ = multiplexer.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
