//! UseCase 層
//!
//! ドメインの操作を組み合わせ、通知（push）とプレゼンスの配信までを 1 つの手続きとしてまとめます。

mod broadcast_presence;
mod connect_connection;
mod disconnect_connection;
mod error;
mod get_presence;
mod join_chat;
mod relay_signal;
mod requeue_peer;

#[cfg(test)]
mod test_support;

pub use broadcast_presence::BroadcastPresenceUseCase;
pub use connect_connection::ConnectConnectionUseCase;
pub use disconnect_connection::DisconnectConnectionUseCase;
pub use error::ConnectError;
pub use get_presence::GetPresenceUseCase;
pub use join_chat::JoinChatUseCase;
pub use relay_signal::{RelayOutcome, RelaySignalUseCase};
pub use requeue_peer::RequeuePeerUseCase;
