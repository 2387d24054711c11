//! InMemory Lobby Repository 実装
//!
//! ドメイン層が定義する LobbyRepository trait の具体的な実装。
//! Registry / Waiting Queue / Room Table を持つ `Lobby` を 1 つの Mutex で保護します。
//!
//! ## 直列化
//!
//! 全てのメソッドはロックを 1 回だけ取得し、ロック中に `.await` しません。
//! これにより「dequeue と pair」「unregister と unpair」が常に 1 つの操作として見えます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, DisplayName, JoinOutcome, LeaveOutcome, Lobby, LobbyRepository,
    PresenceSnapshot, RelayRoute, RepositoryError,
};

/// インメモリ Lobby Repository 実装
pub struct InMemoryLobbyRepository {
    lobby: Arc<Mutex<Lobby>>,
}

impl InMemoryLobbyRepository {
    /// 新しい InMemoryLobbyRepository を作成
    pub fn new(lobby: Arc<Mutex<Lobby>>) -> Self {
        Self { lobby }
    }
}

impl Default for InMemoryLobbyRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Lobby::new())))
    }
}

#[async_trait]
impl LobbyRepository for InMemoryLobbyRepository {
    async fn connect(&self, id: ConnectionId) -> Result<(), RepositoryError> {
        let mut lobby = self.lobby.lock().await;
        if lobby.connect(id.clone()) {
            Ok(())
        } else {
            Err(RepositoryError::DuplicateConnection(id.into_string()))
        }
    }

    async fn join(&self, id: &ConnectionId, display_name: DisplayName) -> JoinOutcome {
        let mut lobby = self.lobby.lock().await;
        lobby.join(id, display_name)
    }

    async fn requeue(&self, id: &ConnectionId) -> Option<JoinOutcome> {
        let mut lobby = self.lobby.lock().await;
        lobby.requeue(id)
    }

    async fn leave(&self, id: &ConnectionId) -> LeaveOutcome {
        let mut lobby = self.lobby.lock().await;
        lobby.leave(id)
    }

    async fn route(&self, sender: &ConnectionId) -> Option<RelayRoute> {
        let lobby = self.lobby.lock().await;
        lobby.route(sender)
    }

    async fn snapshot(&self) -> PresenceSnapshot {
        let lobby = self.lobby.lock().await;
        lobby.snapshot()
    }
}
