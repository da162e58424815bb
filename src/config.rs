//! Command-line configuration for the server and the terminal client

use std::time::Duration;

use clap::Parser;

/// Broadcast chat server
#[derive(Parser, Debug, Clone)]
#[command(name = "broadcast_chat", version, about = "Multi-user TCP broadcast chat server")]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Bound each participant's outbound queue and drop participants that
    /// fall this many messages behind (unbounded, never dropped, by default)
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    /// Disconnect participants that stay silent this long (never by default)
    #[arg(long)]
    pub idle_timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Configuration with defaults for everything but the address
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            port,
            host: host.into(),
            queue_capacity: None,
            idle_timeout_secs: None,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            queue_capacity: self.queue_capacity.map(|c| c.max(1)),
            idle_timeout: self.idle_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Per-connection settings handed to every handler
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionConfig {
    /// `None` keeps the outbound queue unbounded
    pub queue_capacity: Option<usize>,
    pub idle_timeout: Option<Duration>,
}

/// Terminal client for the broadcast chat server
#[derive(Parser, Debug, Clone)]
#[command(name = "chat_client", version, about = "Terminal client for broadcast_chat")]
pub struct ClientConfig {
    /// Server port
    pub port: u16,

    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Nickname, at most 24 bytes (asked for on stdin when omitted)
    #[arg(short, long)]
    pub nick: Option<String>,
}

impl ClientConfig {
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
