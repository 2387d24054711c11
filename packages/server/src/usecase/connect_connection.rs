//! UseCase: 接続処理
//!
//! トランスポートが接続された直後に呼ばれ、接続を Idle（Anonymous）として登録し、
//! 送信チャンネルを MessagePusher に登録します。

use std::sync::Arc;

use crate::domain::{ConnectionId, LobbyRepository, MessagePusher, PusherChannel};

use super::{broadcast_presence::BroadcastPresenceUseCase, error::ConnectError};

/// 接続処理のユースケース
pub struct ConnectConnectionUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<BroadcastPresenceUseCase>,
}

impl ConnectConnectionUseCase {
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

    /// 接続を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 登録成功（プレゼンス配信済み）
    /// * `Err(ConnectError)` - 同じ ID が既に登録されている
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), ConnectError> {
        self.repository.connect(connection_id.clone()).await?;
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        tracing::info!("Connection '{}' registered", connection_id);

        self.presence.execute().await;
        Ok(())
    }
}
