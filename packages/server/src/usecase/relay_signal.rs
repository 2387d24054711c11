//! UseCase: シグナルの中継
//!
//! チャット・タイピング・通話シグナリングを、送信者と同じルームにいる相手にだけ転送します。
//! ルームに属していない送信者からのシグナルは黙って破棄します。

use std::sync::Arc;

use parley_shared::time::Clock;

use crate::domain::{
    ConnectionId, LobbyRepository, MessagePusher, Notification, Signal, Timestamp,
};

/// 中継の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// 相手に転送した
    Delivered(ConnectionId),
    /// 送信者がペアではないため破棄した
    NotPaired,
    /// 相手への送信に失敗した（切断処理中など）
    PeerUnreachable(ConnectionId),
}

/// シグナル中継のユースケース
pub struct RelaySignalUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl RelaySignalUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// シグナルを中継
    ///
    /// 送信者本人には何も返さない。ペイロードは受け取ったまま転送する。
    pub async fn execute(&self, sender: &ConnectionId, signal: Signal) -> RelayOutcome {
        let Some(route) = self.repository.route(sender).await else {
            tracing::debug!("Dropping '{}' from unpaired '{}'", signal.name(), sender);
            return RelayOutcome::NotPaired;
        };

        let name = signal.name();
        let notification = Notification::Relayed {
            from: route.sender_name,
            signal,
            sent_at: Timestamp::new(self.clock.now_millis()),
        };

        match self.message_pusher.push_to(&route.peer, &notification).await {
            Ok(()) => {
                tracing::debug!(
                    "Relayed '{}' from '{}' to '{}' in {}",
                    name,
                    sender,
                    route.peer,
                    route.room_id
                );
                RelayOutcome::Delivered(route.peer)
            }
            Err(e) => {
                tracing::warn!("Failed to relay '{}' to '{}': {}", name, route.peer, e);
                RelayOutcome::PeerUnreachable(route.peer)
            }
        }
    }
}
