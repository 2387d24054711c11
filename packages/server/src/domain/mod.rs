//! ドメイン層
//!
//! マッチングとリレーのルールを、I/O から切り離して定義します。

pub mod error;
pub mod lobby;
pub mod message_pusher;
pub mod notification;
pub mod presence;
pub mod registry;
pub mod repository;
pub mod room_table;
pub mod signal;
pub mod value_object;
pub mod waiting_queue;

pub use error::{LobbyError, MessagePushError, RepositoryError, ValueObjectError};
pub use lobby::{ConnectionPhase, JoinOutcome, LeaveOutcome, Lobby, Match, RelayRoute};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use notification::Notification;
pub use presence::{OnlineUser, PresenceSnapshot, PresenceStatus};
pub use registry::{ConnectionRegistry, RegisteredConnection};
pub use repository::LobbyRepository;
pub use room_table::{Pairing, RoomTable};
pub use signal::{Signal, SignalPayload};
pub use value_object::{ConnectionId, DisplayName, RoomId, Timestamp};
pub use waiting_queue::WaitingQueue;

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
