//! UseCase: 切断処理
//!
//! 接続を Registry / Waiting Queue / Room Table から取り除きます。
//! ペアの相手がいれば `peer-disconnected` を送り、一定時間後に再マッチングします。

use std::{sync::Arc, time::Duration};

use crate::domain::{ConnectionId, LeaveOutcome, LobbyRepository, MessagePusher, Notification};

use super::{broadcast_presence::BroadcastPresenceUseCase, requeue_peer::RequeuePeerUseCase};

/// 切断処理のユースケース
pub struct DisconnectConnectionUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<BroadcastPresenceUseCase>,
    requeue: Arc<RequeuePeerUseCase>,
    requeue_delay: Duration,
}

impl DisconnectConnectionUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        presence: Arc<BroadcastPresenceUseCase>,
        requeue: Arc<RequeuePeerUseCase>,
        requeue_delay: Duration,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            presence,
            requeue,
            requeue_delay,
        }
    }

    /// 切断を実行（冪等）
    ///
    /// 送信チャンネルを先に外すため、切断中の接続に宛てたシグナルは届かない。
    pub async fn execute(&self, connection_id: &ConnectionId) -> LeaveOutcome {
        self.message_pusher.unregister_client(connection_id).await;

        let outcome = self.repository.leave(connection_id).await;
        if outcome.is_noop() {
            tracing::debug!("Connection '{}' was already removed", connection_id);
            return outcome;
        }
        tracing::info!("Connection '{}' disconnected", connection_id);

        if let Some(pairing) = &outcome.former_pairing {
            let departed_name = outcome
                .departed
                .as_ref()
                .map(|departed| departed.display_name.clone())
                .unwrap_or_default();
            let notification = Notification::PeerDisconnected {
                peer_name: departed_name,
            };
            if let Err(e) = self.message_pusher.push_to(&pairing.peer, &notification).await {
                tracing::warn!(
                    "Failed to notify '{}' of peer disconnect: {}",
                    pairing.peer,
                    e
                );
            }
            tracing::info!(
                "Closed {}; '{}' will be requeued in {:?}",
                pairing.room_id,
                pairing.peer,
                self.requeue_delay
            );
            self.requeue.schedule(pairing.peer.clone(), self.requeue_delay);
        }

        self.presence.execute().await;
        outcome
    }
}
