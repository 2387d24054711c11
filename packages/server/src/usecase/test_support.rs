//! UseCase テスト用の補助

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::{
    domain::{
        ConnectionId, DisplayName, LobbyRepository, MessagePushError, MessagePusher,
        Notification, PusherChannel,
    },
    infrastructure::repository::InMemoryLobbyRepository,
};

pub fn id(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

/// 送信された通知を記録する MessagePusher
///
/// 登録されていないクライアントへの push は実装と同じく ClientNotFound になる。
#[derive(Default)]
pub struct RecordingPusher {
    registered: Mutex<HashSet<ConnectionId>>,
    sent: Mutex<Vec<(ConnectionId, Notification)>>,
}

impl RecordingPusher {
    pub fn sent_to(&self, client_id: &ConnectionId) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| to == client_id)
            .map(|(_, notification)| notification.clone())
            .collect()
    }

    /// OnlineStats 以外の通知
    pub fn events_to(&self, client_id: &ConnectionId) -> Vec<Notification> {
        self.sent_to(client_id)
            .into_iter()
            .filter(|n| !matches!(n, Notification::OnlineStats(_)))
            .collect()
    }

    /// 最後に届いた OnlineStats
    pub fn last_stats_to(&self, client_id: &ConnectionId) -> Option<Notification> {
        self.sent_to(client_id)
            .into_iter()
            .rfind(|n| matches!(n, Notification::OnlineStats(_)))
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, client_id: ConnectionId, _sender: PusherChannel) {
        self.registered.lock().unwrap().insert(client_id);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        self.registered.lock().unwrap().remove(client_id);
    }

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        if !self.registered.lock().unwrap().contains(client_id) {
            return Err(MessagePushError::ClientNotFound(
                client_id.as_str().to_string(),
            ));
        }
        self.sent
            .lock()
            .unwrap()
            .push((client_id.clone(), notification.clone()));
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        for target in targets {
            let _ = self.push_to(&target, notification).await;
        }
        Ok(())
    }
}

/// 接続済み（Pusher にも登録済み）のクライアントを用意する
pub async fn connect_all(
    repository: &Arc<InMemoryLobbyRepository>,
    pusher: &Arc<RecordingPusher>,
    keys: &[&str],
) {
    for key in keys {
        repository.connect(id(key)).await.unwrap();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        pusher.register_client(id(key), tx).await;
    }
}

/// 接続済みのクライアントを join させる（通知は送らない）
pub async fn join_all(repository: &Arc<InMemoryLobbyRepository>, members: &[(&str, &str)]) {
    for (key, name) in members {
        repository.join(&id(key), DisplayName::new(name)).await;
    }
}
