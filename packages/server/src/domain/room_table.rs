//! Room Table
//!
//! Maps each paired connection to its own view of the pairing. Both directions
//! are installed and removed together, so one side never outlives the other.

use std::collections::HashMap;

use super::{
    error::LobbyError,
    value_object::{ConnectionId, DisplayName, RoomId},
};

/// One side's view of a pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub peer: ConnectionId,
    pub peer_name: DisplayName,
    pub room_id: RoomId,
}

#[derive(Debug, Default)]
pub struct RoomTable {
    pairings: HashMap<ConnectionId, Pairing>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `a` and `b`, installing both directions.
    ///
    /// Nothing is installed when the pairing is rejected.
    pub fn pair(
        &mut self,
        a: &ConnectionId,
        name_a: &DisplayName,
        b: &ConnectionId,
        name_b: &DisplayName,
    ) -> Result<RoomId, LobbyError> {
        if a == b {
            return Err(LobbyError::SelfPairing(a.as_str().to_string()));
        }
        for id in [a, b] {
            if self.pairings.contains_key(id) {
                return Err(LobbyError::AlreadyPaired(id.as_str().to_string()));
            }
        }

        let room_id = RoomId::for_pair(a, b);
        self.pairings.insert(
            a.clone(),
            Pairing {
                peer: b.clone(),
                peer_name: name_b.clone(),
                room_id: room_id.clone(),
            },
        );
        self.pairings.insert(
            b.clone(),
            Pairing {
                peer: a.clone(),
                peer_name: name_a.clone(),
                room_id: room_id.clone(),
            },
        );
        Ok(room_id)
    }

    pub fn lookup(&self, id: &ConnectionId) -> Option<Pairing> {
        self.pairings.get(id).cloned()
    }

    /// Dissolve the pairing of `id`, removing the peer's record as well.
    ///
    /// Returns `id`'s former pairing so the caller can notify the peer.
    pub fn unpair(&mut self, id: &ConnectionId) -> Option<Pairing> {
        let pairing = self.pairings.remove(id)?;
        // Only drop the peer's record while it still points back at `id`.
        if self
            .pairings
            .get(&pairing.peer)
            .is_some_and(|back| &back.peer == id)
        {
            self.pairings.remove(&pairing.peer);
        }
        Some(pairing)
    }

    pub fn is_paired(&self, id: &ConnectionId) -> bool {
        self.pairings.contains_key(id)
    }

    /// Number of rooms (each room has two entries).
    pub fn room_count(&self) -> usize {
        self.pairings.len() / 2
    }
}
