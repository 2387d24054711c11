//! ドメイン層のエラー型

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Connection ID must not be empty")]
    ConnectionIdEmpty,
}

/// Lobby（Registry / Waiting Queue / Room Table）の契約違反
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    /// 既に待機キューに入っている接続を再度 enqueue しようとした
    #[error("Connection '{0}' is already waiting")]
    AlreadyWaiting(String),

    /// 既にペアになっている接続をペアにしようとした
    #[error("Connection '{0}' is already paired")]
    AlreadyPaired(String),

    /// 同じ接続同士をペアにしようとした
    #[error("Connection '{0}' cannot be paired with itself")]
    SelfPairing(String),
}

/// Repository のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
