//! Multi-user TCP Broadcast Chat Library
//!
//! A minimal chat service: every connection declares a nickname, and every
//! message any participant sends is rebroadcast to all participants,
//! sender included, as `"<name>: <message>"`.
//!
//! # Protocol
//! - The first write of a connection is its nickname (at most 24 bytes)
//! - Every later read is one message (at most 2048 bytes, no framing)
//! - Repeated nicknames get a suffix: `bob`, `bob(1)`, `bob(2)`
//! - Blank messages are dropped
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `Multiplexer` accepts connections and spawns a handler for each
//! - `ChatServer` is the single coordinator owning the `NameRegistry` and
//!   the `ConnectionTable`
//! - `Broadcaster` fans each formatted line out to every participant queue
//! - No locks needed - all state access goes through message passing
//!
//! # Example
//! ```ignore
//! use broadcast_chat::{Multiplexer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::new("127.0.0.1", 8080);
//!     let multiplexer = Multiplexer::bind(&config).await.unwrap();
//!     multiplexer.run().await;
//! }
//! ```

pub mod broadcast;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod listener;
pub mod message;
pub mod participant;
pub mod registry;
pub mod server;
pub mod table;
pub mod types;

// Re-export main types for convenience
pub use broadcast::Broadcaster;
pub use client::ChatClient;
pub use config::{ClientConfig, ConnectionConfig, ServerConfig};
pub use error::{AppError, ClientError, HandshakeError, SendError};
pub use handler::handle_connection;
pub use listener::Multiplexer;
pub use participant::Participant;
pub use registry::{base_name, NameRegistry};
pub use server::{ChatServer, ServerCommand};
pub use table::ConnectionTable;
pub use types::{AssignedName, ConnectionId};
