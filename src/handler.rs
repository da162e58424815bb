//! Per-connection handler
//!
//! Reads the declared name, registers with the ChatServer, then pumps bytes
//! in both directions until either side fails.

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::time;
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::{AppError, HandshakeError};
use crate::message::{decode_name, MAX_NAME_LEN, READ_BUFFER_LEN};
use crate::participant::{outbox, Inbox};
use crate::server::ServerCommand;
use crate::types::ConnectionId;

/// Read the declared name from a fresh connection
///
/// One bounded read: whatever the first read returns, up to 24 bytes, is the
/// whole name. A name split across TCP segments is not reassembled.
pub async fn read_name(stream: &mut TcpStream) -> Result<String, HandshakeError> {
    let mut buf = [0u8; MAX_NAME_LEN];
    let n = stream.read(&mut buf).await?;
    if n == 0 {
        return Err(HandshakeError::Closed);
    }
    decode_name(&buf[..n])
}

/// Handle a new TCP connection
///
/// Nothing is registered unless the handshake succeeds. Once registered, a
/// `Leave` is always sent when the connection ends.
pub async fn handle_connection(
    mut stream: TcpStream,
    cmd_tx: mpsc::Sender<ServerCommand>,
    config: ConnectionConfig,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let name = read_name(&mut stream).await?;
    let conn_id = ConnectionId::new();
    debug!("Connection {} from {} declared '{}'", conn_id, peer_addr, name);

    // Server -> connection queue
    let (msg_tx, msg_rx) = outbox(config.queue_capacity);
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
    let (reply_tx, reply_rx) = oneshot::channel();

    cmd_tx
        .send(ServerCommand::Join {
            conn_id,
            name,
            outbox: msg_tx,
            shutdown: shutdown_tx,
            reply: reply_tx,
        })
        .await
        .map_err(|_| AppError::ChannelSend)?;
    let assigned = reply_rx.await.map_err(|_| AppError::ChannelSend)?;
    info!("{} chatting as '{}'", peer_addr, assigned);

    let (reader, writer) = stream.into_split();
    let mut read_task = tokio::spawn(read_loop(reader, conn_id, cmd_tx.clone(), config));
    let mut write_task = tokio::spawn(write_loop(writer, msg_rx));

    // Whichever side stops first takes the other one down with it; the
    // ChatServer can also end the connection by removing the participant
    tokio::select! {
        _ = &mut read_task => {
            debug!("Read side of {} finished", conn_id);
        }
        _ = &mut write_task => {
            debug!("Write side of {} finished", conn_id);
        }
        _ = &mut shutdown_rx => {
            debug!("Connection {} removed by server", conn_id);
        }
    }
    read_task.abort();
    write_task.abort();

    let _ = cmd_tx.send(ServerCommand::Leave { conn_id }).await;
    info!("'{}' ({}) disconnected", assigned, peer_addr);

    Ok(())
}

/// Connection -> ChatServer, one command per read
async fn read_loop(
    mut reader: OwnedReadHalf,
    conn_id: ConnectionId,
    cmd_tx: mpsc::Sender<ServerCommand>,
    config: ConnectionConfig,
) {
    let mut buf = vec![0u8; READ_BUFFER_LEN];
    loop {
        let read = match config.idle_timeout {
            Some(limit) => match time::timeout(limit, reader.read(&mut buf)).await {
                Ok(read) => read,
                Err(_) => {
                    info!("Connection {} idle for {:?}, closing", conn_id, limit);
                    break;
                }
            },
            None => reader.read(&mut buf).await,
        };

        match read {
            Ok(0) => {
                debug!("Connection {} closed by peer", conn_id);
                break;
            }
            Ok(n) => {
                let cmd = ServerCommand::Message {
                    conn_id,
                    bytes: Bytes::copy_from_slice(&buf[..n]),
                };
                if cmd_tx.send(cmd).await.is_err() {
                    debug!("Server closed, ending read task for {}", conn_id);
                    break;
                }
            }
            Err(e) => {
                debug!("Read error on {}: {}", conn_id, e);
                break;
            }
        }
    }
}

/// ChatServer -> connection, until the queue closes or a write fails
async fn write_loop(mut writer: OwnedWriteHalf, mut msg_rx: Inbox) {
    while let Some(line) = msg_rx.recv().await {
        if let Err(e) = writer.write_all(&line).await {
            debug!("Write failed, ending write task: {}", e);
            break;
        }
    }
    let _ = writer.shutdown().await;
}
