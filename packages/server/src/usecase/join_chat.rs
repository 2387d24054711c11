//! UseCase: チャット参加（join-chat）
//!
//! "ready to chat" を受け取り、待機中の相手がいればペアにし、いなければ待機キューに入れます。
//! 結果は当事者に通知し、状態が変わった場合はプレゼンスを配信します。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, JoinOutcome, LobbyRepository, MessagePusher, Notification,
};

use super::broadcast_presence::BroadcastPresenceUseCase;

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<BroadcastPresenceUseCase>,
}

impl JoinChatUseCase {
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

    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
    ) -> JoinOutcome {
        let outcome = self.repository.join(&connection_id, display_name).await;
        announce(self.message_pusher.as_ref(), &connection_id, &outcome).await;

        if matches!(outcome, JoinOutcome::Waiting | JoinOutcome::Matched(_)) {
            self.presence.execute().await;
        }
        outcome
    }
}

/// マッチングの結果を当事者に通知する
///
/// - Waiting: 本人に `waiting-for-peer`
/// - Matched: 双方に `peer-matched`（相手の名前と共通の room id）
/// - AlreadyPaired / NotConnected: 通知なし
pub(super) async fn announce(
    message_pusher: &dyn MessagePusher,
    connection_id: &ConnectionId,
    outcome: &JoinOutcome,
) {
    match outcome {
        JoinOutcome::Waiting => {
            tracing::info!("Connection '{}' is waiting for a peer", connection_id);
            if let Err(e) = message_pusher
                .push_to(connection_id, &Notification::WaitingForPeer)
                .await
            {
                tracing::warn!("Failed to notify '{}' of waiting: {}", connection_id, e);
            }
        }
        JoinOutcome::Matched(matched) => {
            tracing::info!(
                "Matched '{}' with '{}' in {}",
                matched.joiner,
                matched.peer,
                matched.room_id
            );
            let deliveries = [
                (&matched.joiner, &matched.peer_name),
                (&matched.peer, &matched.joiner_name),
            ];
            for (to, peer_name) in deliveries {
                let notification = Notification::PeerMatched {
                    peer_name: peer_name.clone(),
                    room_id: matched.room_id.clone(),
                };
                if let Err(e) = message_pusher.push_to(to, &notification).await {
                    tracing::warn!("Failed to notify '{}' of match: {}", to, e);
                }
            }
        }
        JoinOutcome::AlreadyPaired { room_id } => {
            tracing::debug!(
                "Ignoring join-chat from '{}': already in {}",
                connection_id,
                room_id
            );
        }
        JoinOutcome::NotConnected => {
            tracing::debug!(
                "Ignoring join-chat from '{}': not connected",
                connection_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Match, RoomId},
        infrastructure::repository::InMemoryLobbyRepository,
        usecase::test_support::{RecordingPusher, connect_all, id},
    };

    fn create_usecase() -> (
        JoinChatUseCase,
        Arc<InMemoryLobbyRepository>,
        Arc<RecordingPusher>,
    ) {
        let repository = Arc::new(InMemoryLobbyRepository::default());
        let pusher = Arc::new(RecordingPusher::default());
        let presence = Arc::new(BroadcastPresenceUseCase::new(
            repository.clone(),
            pusher.clone(),
        ));
        let usecase = JoinChatUseCase::new(repository.clone(), pusher.clone(), presence);
        (usecase, repository, pusher)
    }

    #[tokio::test]
    async fn test_first_join_waits() {
        // テスト項目: 待機者がいない状態で join すると waiting-for-peer が届く
        // given (前提条件):
        let (usecase, repository, pusher) = create_usecase();
        connect_all(&repository, &pusher, &["a"]).await;

        // when (操作):
        let outcome = usecase.execute(id("a"), DisplayName::new("Alice")).await;

        // then (期待する結果):
        assert_eq!(outcome, JoinOutcome::Waiting);
        assert_eq!(pusher.events_to(&id("a")), vec![Notification::WaitingForPeer]);
        let Some(Notification::OnlineStats(stats)) = pusher.last_stats_to(&id("a")) else {
            panic!("a should have received online stats");
        };
        assert_eq!(stats.waiting, 1);
    }

    #[tokio::test]
    async fn test_second_join_matches_both_sides() {
        // テスト項目: 2 人目の join で双方に相手の名前と同じ room id が届く
        // given (前提条件):
        let (usecase, repository, pusher) = create_usecase();
        connect_all(&repository, &pusher, &["a", "b"]).await;
        usecase.execute(id("a"), DisplayName::new("Alice")).await;

        // when (操作):
        let outcome = usecase.execute(id("b"), DisplayName::new("Bob")).await;

        // then (期待する結果):
        let room_id = RoomId::for_pair(&id("a"), &id("b"));
        assert_eq!(
            outcome,
            JoinOutcome::Matched(Match {
                room_id: room_id.clone(),
                joiner: id("b"),
                joiner_name: DisplayName::new("Bob"),
                peer: id("a"),
                peer_name: DisplayName::new("Alice"),
            })
        );
        assert_eq!(
            pusher.events_to(&id("a")),
            vec![
                Notification::WaitingForPeer,
                Notification::PeerMatched {
                    peer_name: DisplayName::new("Bob"),
                    room_id: room_id.clone(),
                },
            ]
        );
        assert_eq!(
            pusher.events_to(&id("b")),
            vec![Notification::PeerMatched {
                peer_name: DisplayName::new("Alice"),
                room_id,
            }]
        );
        let Some(Notification::OnlineStats(stats)) = pusher.last_stats_to(&id("b")) else {
            panic!("b should have received online stats");
        };
        assert_eq!(stats.in_call, 1);
        assert_eq!(stats.total_online, 2);
        assert_eq!(stats.waiting, 0);
    }

    #[tokio::test]
    async fn test_join_while_paired_is_ignored() {
        // テスト項目: ペア中の再 join は何も通知せず、プレゼンスも配信しない
        // given (前提条件):
        let (usecase, repository, pusher) = create_usecase();
        connect_all(&repository, &pusher, &["a", "b"]).await;
        usecase.execute(id("a"), DisplayName::new("Alice")).await;
        usecase.execute(id("b"), DisplayName::new("Bob")).await;
        let sent_before = pusher.sent_to(&id("a")).len();

        // when (操作):
        let outcome = usecase.execute(id("a"), DisplayName::new("Alicia")).await;

        // then (期待する結果):
        assert_eq!(
            outcome,
            JoinOutcome::AlreadyPaired {
                room_id: RoomId::for_pair(&id("a"), &id("b")),
            }
        );
        assert_eq!(pusher.sent_to(&id("a")).len(), sent_before);
        let snapshot = repository.snapshot().await;
        let alice = snapshot.users.iter().find(|u| u.id == id("a")).unwrap();
        assert_eq!(alice.display_name, DisplayName::new("Alice"));
    }

    #[tokio::test]
    async fn test_join_after_disconnect_is_refused() {
        // テスト項目: 切断済み（未登録）の接続からの join は登録されず、何も配信されない
        // given (前提条件):
        let (usecase, repository, pusher) = create_usecase();
        connect_all(&repository, &pusher, &["a", "b"]).await;
        repository.leave(&id("b")).await;
        let sent_before = pusher.sent_to(&id("a")).len();

        // when (操作):
        let outcome = usecase.execute(id("b"), DisplayName::new("Bob")).await;

        // then (期待する結果):
        assert_eq!(outcome, JoinOutcome::NotConnected);
        assert!(pusher.events_to(&id("b")).is_empty());
        assert_eq!(pusher.sent_to(&id("a")).len(), sent_before);
        let snapshot = repository.snapshot().await;
        assert_eq!(snapshot.total_online, 1);
        assert_eq!(snapshot.waiting, 0);
    }

    #[tokio::test]
    async fn test_join_while_waiting_repeats_waiting() {
        // テスト項目: 待機中の再 join は待機位置を保ったまま waiting-for-peer を再送する
        // given (前提条件):
        let (usecase, repository, pusher) = create_usecase();
        connect_all(&repository, &pusher, &["a"]).await;
        usecase.execute(id("a"), DisplayName::new("Alice")).await;

        // when (操作):
        let outcome = usecase.execute(id("a"), DisplayName::new("Alice")).await;

        // then (期待する結果):
        assert_eq!(outcome, JoinOutcome::Waiting);
        assert_eq!(
            pusher.events_to(&id("a")),
            vec![Notification::WaitingForPeer, Notification::WaitingForPeer]
        );
        assert_eq!(repository.snapshot().await.waiting, 1);
    }
}
