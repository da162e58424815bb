//! Wire protocol helpers
//!
//! The protocol is raw text with no framing: the first read of a connection
//! is its nickname, every later read is one chat message, and the server
//! sends `"<name>: <message>"` to everyone without adding a newline.

use bytes::Bytes;

use crate::error::{ClientError, HandshakeError};

/// Longest nickname in bytes; the handshake reads at most this much
pub const MAX_NAME_LEN: usize = 24;

/// Size of the per-read message buffer; longer messages are truncated
pub const READ_BUFFER_LEN: usize = 2048;

/// Decode the declared nickname from the handshake bytes
///
/// Invalid UTF-8 (including a character cut at the 24 byte boundary) is
/// replaced, and surrounding whitespace and NUL padding are trimmed.
pub fn decode_name(bytes: &[u8]) -> Result<String, HandshakeError> {
    let name = String::from_utf8_lossy(bytes);
    let name = name.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    if name.is_empty() {
        return Err(HandshakeError::EmptyName);
    }
    Ok(name.to_string())
}

/// Decode one chat message
///
/// Returns `None` for text that is empty or whitespace only. Otherwise the
/// text is returned as received, untrimmed.
pub fn decode_message(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    if text.trim().is_empty() {
        return None;
    }
    Some(text.into_owned())
}

/// Format the line broadcast to every participant
pub fn format_line(name: &str, text: &str) -> Bytes {
    Bytes::from(format!("{}: {}", name, text))
}

/// Check a nickname before the client sends it
pub fn validate_name(name: &str) -> Result<(), ClientError> {
    if name.is_empty() {
        return Err(ClientError::EmptyNickname);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ClientError::NicknameTooLong(name.len()));
    }
    Ok(())
}
