//! Lobby: the matchmaker and the state it owns.
//!
//! The lobby owns the connection registry, the waiting queue and the room
//! table. Every operation mutates them as one step; callers serialize access
//! by holding the lobby behind a single lock.

use super::{
    presence::PresenceSnapshot,
    registry::{ConnectionRegistry, RegisteredConnection},
    room_table::{Pairing, RoomTable},
    value_object::{ConnectionId, DisplayName, RoomId},
    waiting_queue::WaitingQueue,
};

/// Lifecycle phase of a registered connection.
///
/// A disconnected connection is simply absent from the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    Idle,
    Waiting,
    Paired,
}

/// A freshly committed pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub room_id: RoomId,
    /// The connection whose readiness triggered the match.
    pub joiner: ConnectionId,
    pub joiner_name: DisplayName,
    /// The waiting connection it was paired with.
    pub peer: ConnectionId,
    pub peer_name: DisplayName,
}

/// Result of a readiness signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Enqueued, or already waiting.
    Waiting,
    Matched(Match),
    /// Already in a room; nothing changed.
    AlreadyPaired { room_id: RoomId },
    /// The connection is not registered (it already left); nothing changed.
    NotConnected,
}

/// Result of a disconnect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// The registry entry that was removed, if the connection was known.
    pub departed: Option<RegisteredConnection>,
    pub was_waiting: bool,
    /// The departed connection's pairing; its `peer` must be told.
    pub former_pairing: Option<Pairing>,
}

impl LeaveOutcome {
    pub fn is_noop(&self) -> bool {
        self.departed.is_none() && !self.was_waiting && self.former_pairing.is_none()
    }
}

/// Where a relayed signal from a sender goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRoute {
    pub sender_name: DisplayName,
    pub peer: ConnectionId,
    pub room_id: RoomId,
}

#[derive(Debug, Default)]
pub struct Lobby {
    registry: ConnectionRegistry,
    queue: WaitingQueue,
    rooms: RoomTable,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly connected transport as an idle, anonymous user.
    ///
    /// Returns `false` if the id is already registered.
    pub fn connect(&mut self, id: ConnectionId) -> bool {
        if self.registry.contains(&id) {
            return false;
        }
        self.registry.register(id, DisplayName::anonymous());
        true
    }

    /// Handle a "ready to chat" signal.
    ///
    /// Only connections registered by `connect` can join; a paired connection
    /// keeps both its room and the name its peer was told.
    pub fn join(&mut self, id: &ConnectionId, display_name: DisplayName) -> JoinOutcome {
        if !self.registry.contains(id) {
            return JoinOutcome::NotConnected;
        }
        if let Some(pairing) = self.rooms.lookup(id) {
            return JoinOutcome::AlreadyPaired {
                room_id: pairing.room_id,
            };
        }

        self.registry.register(id.clone(), display_name.clone());
        if self.queue.contains(id) {
            return JoinOutcome::Waiting;
        }
        self.match_or_enqueue(id, display_name)
    }

    /// Put an idle connection back into matchmaking under its current name.
    ///
    /// Returns `None` if the connection is gone or is no longer idle.
    pub fn requeue(&mut self, id: &ConnectionId) -> Option<JoinOutcome> {
        if self.phase(id)? != ConnectionPhase::Idle {
            return None;
        }
        let display_name = self.registry.display_name(id)?;
        Some(self.match_or_enqueue(id, display_name))
    }

    /// Remove every trace of a connection. Safe to call more than once.
    pub fn leave(&mut self, id: &ConnectionId) -> LeaveOutcome {
        LeaveOutcome {
            departed: self.registry.unregister(id),
            was_waiting: self.queue.remove(id),
            former_pairing: self.rooms.unpair(id),
        }
    }

    pub fn route(&self, sender: &ConnectionId) -> Option<RelayRoute> {
        let pairing = self.rooms.lookup(sender)?;
        Some(RelayRoute {
            sender_name: self.registry.display_name(sender).unwrap_or_default(),
            peer: pairing.peer,
            room_id: pairing.room_id,
        })
    }

    pub fn phase(&self, id: &ConnectionId) -> Option<ConnectionPhase> {
        if !self.registry.contains(id) {
            return None;
        }
        let phase = if self.rooms.is_paired(id) {
            ConnectionPhase::Paired
        } else if self.queue.contains(id) {
            ConnectionPhase::Waiting
        } else {
            ConnectionPhase::Idle
        };
        Some(phase)
    }

    pub fn snapshot(&self) -> PresenceSnapshot {
        PresenceSnapshot::compute(&self.registry, &self.queue, &self.rooms)
    }

    /// Pair `id` with the oldest live waiting connection, or enqueue it.
    ///
    /// Candidates that are no longer registered or cannot be paired are
    /// discarded; the arrival itself is never dropped.
    fn match_or_enqueue(&mut self, id: &ConnectionId, display_name: DisplayName) -> JoinOutcome {
        while let Some(candidate) = self.queue.dequeue_oldest() {
            let Some(candidate_name) = self.registry.display_name(&candidate) else {
                tracing::warn!("Discarding waiting entry '{}': no longer connected", candidate);
                continue;
            };

            match self
                .rooms
                .pair(id, &display_name, &candidate, &candidate_name)
            {
                Ok(room_id) => {
                    tracing::info!(
                        "Matched '{}' ({}) with '{}' ({}) in {}",
                        id,
                        display_name,
                        candidate,
                        candidate_name,
                        room_id
                    );
                    return JoinOutcome::Matched(Match {
                        room_id,
                        joiner: id.clone(),
                        joiner_name: display_name,
                        peer: candidate,
                        peer_name: candidate_name,
                    });
                }
                Err(e) => {
                    tracing::warn!("Discarding waiting entry '{}': {}", candidate, e);
                }
            }
        }

        if let Err(e) = self.queue.enqueue(id.clone()) {
            tracing::warn!("Unexpected enqueue failure for '{}': {}", id, e);
        } else {
            tracing::info!("'{}' ({}) is waiting for a peer", id, display_name);
        }
        JoinOutcome::Waiting
    }
}
