//! UseCase: プレゼンス配信
//!
//! Registry / Queue / Room Table が変化するたびに呼ばれ、最新のプレゼンスを
//! 接続中の全クライアントに `online-stats` として送信します。
//!
//! スナップショットの取得から送信キューへの書き込みまでを 1 つのロックで直列化するため、
//! 各クライアントが受け取る `online-stats` は取得順に並び、最後の 1 件が最新の状態になります。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{LobbyRepository, MessagePusher, Notification, PresenceSnapshot};

/// プレゼンス配信のユースケース
pub struct BroadcastPresenceUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    /// snapshot → broadcast の直列化
    gate: Mutex<()>,
}

impl BroadcastPresenceUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            gate: Mutex::new(()),
        }
    }

    /// スナップショットを取得して全員に送信
    ///
    /// スナップショットは 1 回のロックで取得するため、途中状態は含まれない。
    pub async fn execute(&self) -> PresenceSnapshot {
        let _gate = self.gate.lock().await;
        let snapshot = self.repository.snapshot().await;
        let recipients = snapshot.recipients();

        if let Err(e) = self
            .message_pusher
            .broadcast(recipients, &Notification::OnlineStats(snapshot.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast online stats: {}", e);
        }
        tracing::debug!(
            "Broadcasted online stats: total={}, waiting={}, in_call={}",
            snapshot.total_online,
            snapshot.waiting,
            snapshot.in_call
        );

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, DisplayName, MockMessagePusher},
        infrastructure::{
            dto::websocket::{OnlineStats, ServerEvent},
            message_pusher::WebSocketMessagePusher,
            repository::InMemoryLobbyRepository,
        },
        usecase::{ConnectConnectionUseCase, JoinChatUseCase, test_support::id},
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_broadcast_targets_every_registered_connection() {
        // テスト項目: 接続中の全クライアントに同じスナップショットが送られる
        // given (前提条件):
        let repository = Arc::new(InMemoryLobbyRepository::default());
        for key in ["a", "b", "c"] {
            repository.connect(id(key)).await.unwrap();
        }
        repository.join(&id("a"), DisplayName::new("Alice")).await;

        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|targets, notification| {
                let Notification::OnlineStats(snapshot) = notification else {
                    return false;
                };
                targets.len() == 3 && snapshot.total_online == 3 && snapshot.waiting == 1
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = BroadcastPresenceUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let snapshot = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(snapshot.total_online, 3);
        assert_eq!(snapshot.waiting, 1);
        assert_eq!(snapshot.in_call, 0);
    }

    #[tokio::test]
    async fn test_broadcast_failure_is_not_fatal() {
        // テスト項目: 送信に失敗してもスナップショットは返される
        // given (前提条件):
        let repository = Arc::new(InMemoryLobbyRepository::default());
        repository.connect(id("a")).await.unwrap();

        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(1).returning(|_, _| {
            Err(crate::domain::MessagePushError::PushFailed(
                "boom".to_string(),
            ))
        });
        let usecase = BroadcastPresenceUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let snapshot = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(snapshot.total_online, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_last_online_stats_matches_settled_lobby() {
        // テスト項目: 並行に接続・参加が続いても、落ち着いた後に各クライアントが最後に受け取る
        //            online-stats は最終状態と一致する
        // given (前提条件):
        let repository = Arc::new(InMemoryLobbyRepository::default());
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let presence = Arc::new(BroadcastPresenceUseCase::new(
            repository.clone(),
            pusher.clone(),
        ));
        let connect = Arc::new(ConnectConnectionUseCase::new(
            repository.clone(),
            pusher.clone(),
            presence.clone(),
        ));
        let join = Arc::new(JoinChatUseCase::new(
            repository.clone(),
            pusher.clone(),
            presence,
        ));

        // when (操作): 20 ラウンド、各ラウンドで 8 接続が並行に接続して参加する
        let mut receivers: Vec<(ConnectionId, mpsc::UnboundedReceiver<String>)> = Vec::new();
        for round in 0..20 {
            let mut handles = Vec::new();
            for n in 0..8 {
                let connect = connect.clone();
                let join = join.clone();
                handles.push(tokio::spawn(async move {
                    let me = id(&format!("r{:02}-{}", round, n));
                    let (tx, rx) = mpsc::unbounded_channel();
                    connect.execute(me.clone(), tx).await.unwrap();
                    join.execute(me.clone(), DisplayName::new(format!("user{}", n))).await;
                    (me, rx)
                }));
            }
            for handle in handles {
                receivers.push(handle.await.unwrap());
            }
        }

        // then (期待する結果):
        let expected = OnlineStats::from(repository.snapshot().await);
        assert_eq!(expected.total_online, 160);
        assert_eq!(expected.in_call, 80);
        assert_eq!(expected.waiting, 0);
        for (me, mut rx) in receivers {
            let mut last = None;
            while let Ok(raw) = rx.try_recv() {
                if let ServerEvent::OnlineStats(stats) = serde_json::from_str(&raw).unwrap() {
                    last = Some(stats);
                }
            }
            assert_eq!(last.as_ref(), Some(&expected), "stale online-stats for '{}'", me);
        }
    }
}
