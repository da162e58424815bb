//! Basic type definitions for the chat server
//!
//! Provides newtype wrappers for type safety:
//! - `ConnectionId`: UUID-based opaque connection handle
//! - `AssignedName`: a resolved display name with its base and disambiguator

use std::fmt;

use uuid::Uuid;

/// Opaque handle of one live connection (newtype pattern)
///
/// Wraps a UUID v4. Implements Hash and Eq for use as HashMap keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name handed out by the `NameRegistry`
///
/// Displays as `base` or `base(k)`. The base is kept alongside the suffix so
/// releasing the name never has to re-parse the rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssignedName {
    base: String,
    suffix: Option<usize>,
}

impl AssignedName {
    pub(crate) fn new(base: impl Into<String>, suffix: Option<usize>) -> Self {
        Self {
            base: base.into(),
            suffix,
        }
    }

    /// The requested name without any disambiguator
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl fmt::Display for AssignedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suffix {
            Some(k) => write!(f, "{}({})", self.base, k),
            None => f.write_str(&self.base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_unique() {
        let id1 = ConnectionId::new();
        let id2 = ConnectionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_assigned_name_display() {
        assert_eq!(AssignedName::new("alice", None).to_string(), "alice");
        assert_eq!(AssignedName::new("alice", Some(2)).to_string(), "alice(2)");
    }

    #[test]
    fn test_assigned_name_keeps_base() {
        let name = AssignedName::new("bob(1)", Some(1));
        assert_eq!(name.base(), "bob(1)");
        assert_eq!(name.to_string(), "bob(1)(1)");
    }
}
