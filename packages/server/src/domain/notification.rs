//! Notifications pushed from the server to a single connection.
//!
//! The domain decides what to say; the message pusher decides how it is
//! encoded on the wire.

use super::{
    presence::PresenceSnapshot,
    signal::Signal,
    value_object::{DisplayName, RoomId, Timestamp},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// No peer available yet; the connection is in the waiting queue.
    WaitingForPeer,
    /// The connection has been paired.
    PeerMatched {
        peer_name: DisplayName,
        room_id: RoomId,
    },
    /// A signal relayed from the peer.
    Relayed {
        from: DisplayName,
        signal: Signal,
        sent_at: Timestamp,
    },
    /// The peer left; the room is gone.
    PeerDisconnected { peer_name: DisplayName },
    OnlineStats(PresenceSnapshot),
}
