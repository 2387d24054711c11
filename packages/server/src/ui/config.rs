//! Server configuration.

use std::time::Duration;

/// 既定の再マッチング遅延（ミリ秒）
pub const DEFAULT_REQUEUE_DELAY_MS: u64 = 2_000;

/// サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 相手が切断してから、取り残された接続を再びマッチングに戻すまでの時間
    pub requeue_delay: Duration,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            requeue_delay: Duration::from_millis(DEFAULT_REQUEUE_DELAY_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: 既定値は 127.0.0.1:8080、再マッチング遅延は 2 秒
        // given (前提条件):
        let config = ServerConfig::default();

        // when (操作):
        let addr = config.bind_addr();

        // then (期待する結果):
        assert_eq!(addr, "127.0.0.1:8080");
        assert_eq!(config.requeue_delay, Duration::from_secs(2));
    }
}
