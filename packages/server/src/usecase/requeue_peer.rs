//! UseCase: 取り残された相手の再マッチング
//!
//! 相手が切断して Idle に戻った接続を、一定時間後に同じ表示名のままマッチングへ戻します。

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::domain::{ConnectionId, JoinOutcome, LobbyRepository, MessagePusher};

use super::{broadcast_presence::BroadcastPresenceUseCase, join_chat::announce};

/// 再マッチングのユースケース
pub struct RequeuePeerUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<BroadcastPresenceUseCase>,
}

impl RequeuePeerUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        presence: Arc<BroadcastPresenceUseCase>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            presence,
        }
    }

    /// 再マッチングを実行
    ///
    /// 接続が既に切断済み、または Idle でなくなっていれば何もしない。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<JoinOutcome> {
        let Some(outcome) = self.repository.requeue(connection_id).await else {
            tracing::debug!("Skipping requeue of '{}': no longer idle", connection_id);
            return None;
        };
        tracing::info!("Requeued '{}'", connection_id);
        announce(self.message_pusher.as_ref(), connection_id, &outcome).await;
        self.presence.execute().await;
        Some(outcome)
    }

    /// `delay` 後に再マッチングを実行するタスクを起動
    pub fn schedule(
        self: &Arc<Self>,
        connection_id: ConnectionId,
        delay: Duration,
    ) -> JoinHandle<()> {
        let usecase = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            usecase.execute(&connection_id).await;
        })
    }
}
