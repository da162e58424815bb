//! Live connection table
//!
//! Maps each connection handle to its participant. Owned by the coordinator
//! task, so it is never mutated concurrently.

use std::collections::HashMap;

use crate::participant::Participant;
use crate::types::ConnectionId;

#[derive(Debug, Default)]
pub struct ConnectionTable {
    participants: HashMap<ConnectionId, Participant>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant under its connection id
    ///
    /// Returns the participant previously stored under the same id, if any.
    pub fn insert(&mut self, participant: Participant) -> Option<Participant> {
        self.participants.insert(participant.id, participant)
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    /// Unregister a connection
    ///
    /// Returns `None` when the connection was already removed, so callers
    /// release its name at most once.
    pub fn remove(&mut self, id: ConnectionId) -> Option<Participant> {
        self.participants.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;

    use super::*;
    use crate::participant::outbox;
    use crate::types::AssignedName;

    fn participant(name: &str) -> Participant {
        let (tx, _rx) = outbox(None);
        let (shutdown, _closed) = oneshot::channel();
        Participant::new(ConnectionId::new(), AssignedName::new(name, None), tx, shutdown)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = ConnectionTable::new();
        let p = participant("alice");
        let id = p.id;

        assert!(table.insert(p).is_none());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(id).unwrap().name.to_string(), "alice");
    }

    #[test]
    fn test_remove_twice() {
        let mut table = ConnectionTable::new();
        let p = participant("bob");
        let id = p.id;
        table.insert(p);

        let removed = table.remove(id).unwrap();
        assert_eq!(removed.name.base(), "bob");
        assert!(table.remove(id).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_iter_covers_all() {
        let mut table = ConnectionTable::new();
        table.insert(participant("a"));
        table.insert(participant("b"));
        table.insert(participant("c"));

        let mut names: Vec<String> = table.iter().map(|p| p.name.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
