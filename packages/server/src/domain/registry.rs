//! Connection Registry
//!
//! Tracks every live connection and its display name.

use std::collections::HashMap;

use super::value_object::{ConnectionId, DisplayName};

/// A connection as seen by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredConnection {
    pub id: ConnectionId,
    pub display_name: DisplayName,
}

#[derive(Debug)]
struct Entry {
    /// Registration order, used to list connections stably.
    seq: u64,
    display_name: DisplayName,
}

/// Registry of live connections.
///
/// Absence of an id is not an error, it just means "not connected".
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    entries: HashMap<ConnectionId, Entry>,
    next_seq: u64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a connection, or overwrite the display name of an existing one.
    ///
    /// Re-registering keeps the original registration position.
    pub fn register(&mut self, id: ConnectionId, display_name: DisplayName) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.display_name = display_name;
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(id, Entry { seq, display_name });
    }

    /// Remove a connection. Returns the removed entry, if any.
    pub fn unregister(&mut self, id: &ConnectionId) -> Option<RegisteredConnection> {
        self.entries.remove(id).map(|entry| RegisteredConnection {
            id: id.clone(),
            display_name: entry.display_name,
        })
    }

    /// Owned snapshot of every registered connection, in registration order.
    pub fn all(&self) -> Vec<RegisteredConnection> {
        let mut entries: Vec<(&ConnectionId, &Entry)> = self.entries.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.seq);
        entries
            .into_iter()
            .map(|(id, entry)| RegisteredConnection {
                id: id.clone(),
                display_name: entry.display_name.clone(),
            })
            .collect()
    }

    pub fn display_name(&self, id: &ConnectionId) -> Option<DisplayName> {
        self.entries.get(id).map(|entry| entry.display_name.clone())
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
