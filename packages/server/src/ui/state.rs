//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectConnectionUseCase, DisconnectConnectionUseCase, GetPresenceUseCase, JoinChatUseCase,
    RelaySignalUseCase,
};

/// ハンドラーから参照するユースケース群
pub struct AppState {
    /// ConnectConnectionUseCase（接続のユースケース）
    pub connect_connection_usecase: Arc<ConnectConnectionUseCase>,
    /// JoinChatUseCase（マッチングのユースケース）
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    /// RelaySignalUseCase（シグナル中継のユースケース）
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    /// DisconnectConnectionUseCase（切断のユースケース）
    pub disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
    /// GetPresenceUseCase（プレゼンス取得のユースケース）
    pub get_presence_usecase: Arc<GetPresenceUseCase>,
}
