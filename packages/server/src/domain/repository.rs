//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ConnectionId, DisplayName, JoinOutcome, LeaveOutcome, PresenceSnapshot, RelayRoute,
    RepositoryError,
};

/// Lobby Repository trait
///
/// Registry / Waiting Queue / Room Table をまとめた Lobby へのインターフェース。
///
/// ## 直列化
///
/// 実装は各メソッドを 1 つのクリティカルセクションとして実行しなければならない。
/// マッチング（dequeue と pair）や切断処理の途中の状態を他のメソッドから観測できてはならない。
#[async_trait]
pub trait LobbyRepository: Send + Sync {
    /// 新しい接続を Idle として登録
    async fn connect(&self, id: ConnectionId) -> Result<(), RepositoryError>;

    /// "ready to chat" を処理（マッチング or 待機）
    async fn join(&self, id: &ConnectionId, display_name: DisplayName) -> JoinOutcome;

    /// Idle の接続を現在の表示名でマッチングに戻す
    async fn requeue(&self, id: &ConnectionId) -> Option<JoinOutcome>;

    /// 接続を削除（冪等）
    async fn leave(&self, id: &ConnectionId) -> LeaveOutcome;

    /// 送信者のリレー先を取得（ペアでなければ None）
    async fn route(&self, sender: &ConnectionId) -> Option<RelayRoute>;

    /// プレゼンスのスナップショットを取得
    async fn snapshot(&self) -> PresenceSnapshot;
}
