//! Waiting Queue
//!
//! Strict FIFO of connections that asked to chat and have no peer yet.

use std::collections::{HashSet, VecDeque};

use super::{error::LobbyError, value_object::ConnectionId};

#[derive(Debug, Default)]
pub struct WaitingQueue {
    order: VecDeque<ConnectionId>,
    members: HashSet<ConnectionId>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail.
    ///
    /// A connection may be queued at most once; a second enqueue is rejected
    /// rather than silently merged.
    pub fn enqueue(&mut self, id: ConnectionId) -> Result<(), LobbyError> {
        if self.members.contains(&id) {
            return Err(LobbyError::AlreadyWaiting(id.into_string()));
        }
        self.members.insert(id.clone());
        self.order.push_back(id);
        Ok(())
    }

    /// Remove and return the earliest-enqueued entry.
    pub fn dequeue_oldest(&mut self) -> Option<ConnectionId> {
        let id = self.order.pop_front()?;
        self.members.remove(&id);
        Some(id)
    }

    /// Remove a specific entry. Returns whether it was queued.
    pub fn remove(&mut self, id: &ConnectionId) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.order.retain(|queued| queued != id);
        true
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
