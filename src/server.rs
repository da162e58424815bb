//! ChatServer coordinator
//!
//! The single task that owns all chat state: the name registry and the
//! connection table. Connection handlers talk to it only through
//! `ServerCommand`s, so every name resolution and every broadcast happens
//! one command at a time without locks.

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::broadcast::Broadcaster;
use crate::message::{decode_message, format_line};
use crate::participant::{Outbox, Participant};
use crate::registry::NameRegistry;
use crate::table::ConnectionTable;
use crate::types::{AssignedName, ConnectionId};

/// Commands sent from connection handlers to the ChatServer
#[derive(Debug)]
pub enum ServerCommand {
    /// Handshake finished, register the connection under its declared name
    Join {
        conn_id: ConnectionId,
        name: String,
        outbox: Outbox,
        shutdown: oneshot::Sender<()>,
        reply: oneshot::Sender<AssignedName>,
    },
    /// One read worth of bytes from a participant
    Message { conn_id: ConnectionId, bytes: Bytes },
    /// Connection hit EOF, a read error, or a write error
    Leave { conn_id: ConnectionId },
}

pub struct ChatServer {
    /// Base name -> live holders
    registry: NameRegistry,
    /// ConnectionId -> Participant
    table: ConnectionTable,
    /// Command receiver channel
    receiver: mpsc::Receiver<ServerCommand>,
}

impl ChatServer {
    pub fn new(receiver: mpsc::Receiver<ServerCommand>) -> Self {
        Self {
            registry: NameRegistry::new(),
            table: ConnectionTable::new(),
            receiver,
        }
    }

    /// Run the ChatServer event loop
    ///
    /// Processes commands until every handler and the listener have dropped
    /// their senders, which only happens on process shutdown.
    pub async fn run(mut self) {
        info!("ChatServer started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd);
        }

        info!("ChatServer shutting down");
    }

    fn handle_command(&mut self, cmd: ServerCommand) {
        match cmd {
            ServerCommand::Join {
                conn_id,
                name,
                outbox,
                shutdown,
                reply,
            } => self.handle_join(conn_id, &name, outbox, shutdown, reply),
            ServerCommand::Message { conn_id, bytes } => self.handle_message(conn_id, &bytes),
            ServerCommand::Leave { conn_id } => self.disconnect(conn_id),
        }
    }

    fn handle_join(
        &mut self,
        conn_id: ConnectionId,
        name: &str,
        outbox: Outbox,
        shutdown: oneshot::Sender<()>,
        reply: oneshot::Sender<AssignedName>,
    ) {
        let assigned = self.registry.resolve(name);
        info!("Connection {} joined as '{}'", conn_id, assigned);

        let replaced = self
            .table
            .insert(Participant::new(conn_id, assigned.clone(), outbox, shutdown));
        debug_assert!(replaced.is_none(), "connection ids are unique");

        if reply.send(assigned).is_err() {
            // Handler went away while waiting; undo the registration
            self.disconnect(conn_id);
        }

        debug!("Total participants: {}", self.table.len());
    }

    fn handle_message(&mut self, conn_id: ConnectionId, bytes: &[u8]) {
        let Some(participant) = self.table.get(conn_id) else {
            debug!("Message from unregistered connection {} dropped", conn_id);
            return;
        };

        let Some(text) = decode_message(bytes) else {
            debug!("Blank message from '{}' dropped", participant.name);
            return;
        };

        let line = format_line(&participant.name.to_string(), &text);
        for failed in Broadcaster::send_to_all(&self.table, &line) {
            self.disconnect(failed);
        }
    }

    /// Unregister a connection and release its name
    ///
    /// Also signals the connection's handler to close the transport, even
    /// when its writer is blocked on a peer that stopped reading. Unknown ids
    /// are ignored.
    fn disconnect(&mut self, conn_id: ConnectionId) {
        let Some(participant) = self.table.remove(conn_id) else {
            return;
        };
        self.registry.release(&participant.name);
        info!("Connection {} ('{}') left", conn_id, participant.name);
        participant.close();
        debug!("Total participants: {}", self.table.len());
    }
}
