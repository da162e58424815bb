//! Participant struct definition
//!
//! The chat identity bound to one live connection, plus the queue feeding
//! that connection's writer.

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};

use crate::error::SendError;
use crate::types::{AssignedName, ConnectionId};

/// Sending side of a connection's outbound queue
///
/// Unbounded unless a capacity was configured. Only a bounded queue can
/// report `QueueFull`.
#[derive(Debug)]
pub enum Outbox {
    Unbounded(mpsc::UnboundedSender<Bytes>),
    Bounded(mpsc::Sender<Bytes>),
}

/// Receiving side of a connection's outbound queue, drained by its writer
#[derive(Debug)]
pub enum Inbox {
    Unbounded(mpsc::UnboundedReceiver<Bytes>),
    Bounded(mpsc::Receiver<Bytes>),
}

/// Create an outbound queue, bounded to `capacity` when one is given
pub fn outbox(capacity: Option<usize>) -> (Outbox, Inbox) {
    match capacity {
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity.max(1));
            (Outbox::Bounded(tx), Inbox::Bounded(rx))
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (Outbox::Unbounded(tx), Inbox::Unbounded(rx))
        }
    }
}

impl Inbox {
    pub async fn recv(&mut self) -> Option<Bytes> {
        match self {
            Inbox::Unbounded(rx) => rx.recv().await,
            Inbox::Bounded(rx) => rx.recv().await,
        }
    }
}

/// Connected participant
#[derive(Debug)]
pub struct Participant {
    /// Handle of the underlying connection
    pub id: ConnectionId,
    /// Name handed out by the registry
    pub name: AssignedName,
    /// Server → connection byte queue
    pub outbox: Outbox,
    /// Fired or dropped together with the participant; the handler closes
    /// the connection as soon as either happens
    shutdown: oneshot::Sender<()>,
}

impl Participant {
    pub fn new(
        id: ConnectionId,
        name: AssignedName,
        outbox: Outbox,
        shutdown: oneshot::Sender<()>,
    ) -> Self {
        Self {
            id,
            name,
            outbox,
            shutdown,
        }
    }

    /// Queue bytes for this participant without waiting
    pub fn send(&self, line: Bytes) -> Result<(), SendError> {
        match &self.outbox {
            Outbox::Unbounded(tx) => tx.send(line).map_err(|_| SendError::ChannelClosed),
            Outbox::Bounded(tx) => tx.try_send(line).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => SendError::QueueFull,
                mpsc::error::TrySendError::Closed(_) => SendError::ChannelClosed,
            }),
        }
    }

    /// Tell the connection's handler to close the transport
    pub fn close(self) {
        let _ = self.shutdown.send(());
    }
}
