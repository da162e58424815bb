//! Error types for the chat server and client
//!
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-level errors
///
/// Returned by the listener, connection handlers and the client. None of
/// these ever stop the accept loop; the caller logs them and moves on.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error (fatal for the connection)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection never completed its name handshake
    #[error("Handshake failed: {0}")]
    Handshake(#[from] HandshakeError),

    /// Channel send error (fatal - coordinator is gone)
    #[error("Channel send error")]
    ChannelSend,

    /// Client-side validation failure
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

/// Failures while reading the declared name of a new connection
///
/// The connection is abandoned and no name is allocated.
#[derive(Debug, Error)]
pub enum HandshakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Peer closed before sending anything
    #[error("Connection closed before a name was sent")]
    Closed,

    /// Name was empty or whitespace only
    #[error("Empty name")]
    EmptyName,
}

/// Errors raised by the terminal client before anything touches the network
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("Nickname must not be empty")]
    EmptyNickname,

    #[error("Nickname is {0} bytes, at most {max} allowed", max = crate::message::MAX_NAME_LEN)]
    NicknameTooLong(usize),
}

/// Message send errors
///
/// Occurs when a broadcast cannot be queued for one recipient.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    /// The recipient's outbound queue is full (slow consumer)
    #[error("Queue full")]
    QueueFull,

    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,
}
