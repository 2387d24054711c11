//! UseCase: プレゼンス取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{LobbyRepository, PresenceSnapshot};

/// プレゼンス取得のユースケース
pub struct GetPresenceUseCase {
    repository: Arc<dyn LobbyRepository>,
}

impl GetPresenceUseCase {
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> PresenceSnapshot {
        self.repository.snapshot().await
    }
}
