//! Multiplexer: listening socket and accept loop
//!
//! Binds the port, starts the ChatServer coordinator and spawns a handler
//! for every accepted connection. Readiness for all sockets comes from the
//! tokio reactor; chat state changes only inside the coordinator.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::{ConnectionConfig, ServerConfig};
use crate::error::AppError;
use crate::handler::handle_connection;
use crate::server::{ChatServer, ServerCommand};

/// Channel buffer size for server commands
const CHANNEL_BUFFER_SIZE: usize = 256;

/// Pause after a failed accept so persistent errors (e.g. out of file
/// descriptors) do not spin the loop
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct Multiplexer {
    listener: TcpListener,
    cmd_tx: mpsc::Sender<ServerCommand>,
    connection: ConnectionConfig,
}

impl Multiplexer {
    /// Bind the listening socket and start the coordinator
    pub async fn bind(config: &ServerConfig) -> Result<Self, AppError> {
        let listener = TcpListener::bind(config.bind_addr()).await?;

        let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        tokio::spawn(ChatServer::new(cmd_rx).run());

        Ok(Self {
            listener,
            cmd_tx,
            connection: config.connection(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever
    ///
    /// Accept and handshake failures are logged and never end the loop.
    pub async fn run(self) {
        info!("Accepting connections");

        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            debug!("New connection from {}", addr);
            if let Err(e) = stream.set_nodelay(true) {
                warn!("Could not set TCP_NODELAY for {}: {}", addr, e);
            }

            let cmd_tx = self.cmd_tx.clone();
            let config = self.connection;
            tokio::spawn(async move {
                match handle_connection(stream, cmd_tx, config).await {
                    Ok(()) => {}
                    Err(AppError::Handshake(e)) => {
                        debug!("Handshake with {} abandoned: {}", addr, e);
                    }
                    Err(e) => error!("Connection handler error for {}: {}", addr, e),
                }
            });
        }
    }
}
