//! Fan-out of one formatted line to every registered connection

use bytes::Bytes;
use tracing::warn;

use crate::table::ConnectionTable;
use crate::types::ConnectionId;

pub struct Broadcaster;

impl Broadcaster {
    /// Queue `line` for every participant in `table`, sender included
    ///
    /// Best effort: a failure for one recipient does not stop delivery to the
    /// rest. The failed recipients are returned so the caller can disconnect
    /// them.
    pub fn send_to_all(table: &ConnectionTable, line: &Bytes) -> Vec<ConnectionId> {
        let mut failed = Vec::new();
        for participant in table.iter() {
            if let Err(e) = participant.send(line.clone()) {
                warn!(
                    "Delivery to {} ({}) failed: {}",
                    participant.name, participant.id, e
                );
                failed.push(participant.id);
            }
        }
        failed
    }
}
