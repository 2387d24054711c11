//! Value Objects
//!
//! 識別子や表示名など、値そのものに意味を持つドメインの型を定義します。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 表示名が省略・空だった場合に使う名前
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// 表示名の最大文字数（超過分は切り捨て）
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;

/// 接続 ID
///
/// トランスポートのセッション 1 つにつき 1 つ、サーバー側で発行される不透明な識別子。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 既存の文字列から ConnectionId を作成
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        Ok(Self(value))
    }

    /// 新しい ConnectionId を発行（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 表示名
///
/// ユーザーが指定する名前。前後の空白を取り除き、空なら "Anonymous" に置き換える。
/// 不正な入力は拒否せず、常に有効な値に丸める。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: impl AsRef<str>) -> Self {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Self::anonymous();
        }
        Self(trimmed.chars().take(MAX_DISPLAY_NAME_CHARS).collect())
    }

    /// 省略可能な入力から作成（None は "Anonymous"）
    pub fn from_optional(value: Option<String>) -> Self {
        value.map(Self::new).unwrap_or_else(Self::anonymous)
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for DisplayName {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルーム ID
///
/// ペアの 2 つの接続 ID から決定的に導出される。引数の順序に依存しないため、
/// 両側が同じ値を参照できる。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn for_pair(a: &ConnectionId, b: &ConnectionId) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("room_{}_{}", low.as_str(), high.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// タイムスタンプ（Unix ミリ秒, UTC）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
