//! Presence
//!
//! Aggregate view of who is online and what they are doing. Never stored;
//! recomputed from the registry, queue and room table on demand.

use super::{
    registry::ConnectionRegistry,
    room_table::RoomTable,
    value_object::{ConnectionId, DisplayName},
    waiting_queue::WaitingQueue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    Waiting,
    InChat,
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineUser {
    pub id: ConnectionId,
    pub display_name: DisplayName,
    pub status: PresenceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresenceSnapshot {
    pub total_online: usize,
    pub waiting: usize,
    /// Active rooms, not connections.
    pub in_call: usize,
    /// Every registered connection, in registration order.
    pub users: Vec<OnlineUser>,
}

impl PresenceSnapshot {
    pub fn compute(registry: &ConnectionRegistry, queue: &WaitingQueue, rooms: &RoomTable) -> Self {
        let users = registry
            .all()
            .into_iter()
            .map(|connection| {
                let status = if rooms.is_paired(&connection.id) {
                    PresenceStatus::InChat
                } else if queue.contains(&connection.id) {
                    PresenceStatus::Waiting
                } else {
                    PresenceStatus::Idle
                };
                OnlineUser {
                    id: connection.id,
                    display_name: connection.display_name,
                    status,
                }
            })
            .collect();

        Self {
            total_online: registry.len(),
            waiting: queue.len(),
            in_call: rooms.room_count(),
            users,
        }
    }

    /// Ids of every connection the snapshot should be pushed to.
    pub fn recipients(&self) -> Vec<ConnectionId> {
        self.users.iter().map(|user| user.id.clone()).collect()
    }

    pub fn count(&self, status: PresenceStatus) -> usize {
        self.users.iter().filter(|user| user.status == status).count()
    }
}
