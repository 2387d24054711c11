//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use parley_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};

use crate::error::ClientError;

/// Line that ends the session
pub const QUIT_COMMAND: &str = "/quit";

/// What a line typed by the user means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Send a chat message to the peer
    Message(String),
    /// Leave the chat and exit
    Quit,
    /// Nothing to send
    Empty,
}

/// Interpret a line typed by the user.
pub fn parse_input(line: &str) -> UserInput {
    let line = line.trim();
    if line.is_empty() {
        UserInput::Empty
    } else if line == QUIT_COMMAND {
        UserInput::Quit
    } else {
        UserInput::Message(line.to_string())
    }
}

/// The first frame of every session.
pub fn join_event(display_name: Option<&str>) -> ClientEvent {
    ClientEvent::JoinChat {
        user_name: display_name.map(str::to_string),
    }
}

/// Event the client answers on its own, without user input.
///
/// The CLI has no audio device, so voice call requests are always declined.
pub fn auto_reply(event: &ServerEvent) -> Option<ClientEvent> {
    match event {
        ServerEvent::VoiceCallRequest { .. } => Some(ClientEvent::VoiceCallRejected),
        _ => None,
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// # Arguments
///
/// * `error` - The client error to check
///
/// # Returns
///
/// `true` if the error requires immediate exit (e.g., ServerRejected),
/// `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::ServerRejected(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_input_message() {
        // テスト項目: 通常の行は前後の空白を除いたメッセージになる
        // given (前提条件):
        let line = "  hello there \n";

        // when (操作):
        let result = parse_input(line);

        // then (期待する結果):
        assert_eq!(result, UserInput::Message("hello there".to_string()));
    }

    #[test]
    fn test_parse_input_quit_and_empty() {
        // テスト項目: /quit は終了、空行は何もしない
        // given (前提条件):
        let quit = "/quit";
        let empty = "   ";

        // when (操作):
        let quit_result = parse_input(quit);
        let empty_result = parse_input(empty);

        // then (期待する結果):
        assert_eq!(quit_result, UserInput::Quit);
        assert_eq!(empty_result, UserInput::Empty);
    }

    #[test]
    fn test_join_event_serializes_user_name() {
        // テスト項目: join-chat は userName を camelCase で送る
        // given (前提条件):
        let event = join_event(Some("Alice"));

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(value, json!({"type": "join-chat", "userName": "Alice"}));
    }

    #[test]
    fn test_auto_reply_rejects_voice_call() {
        // テスト項目: 通話リクエストには自動で拒否を返し、他のイベントには何も返さない
        // given (前提条件):
        let request = ServerEvent::VoiceCallRequest {
            from: "Bob".to_string(),
        };
        let waiting = ServerEvent::WaitingForPeer;

        // when (操作):
        let reply = auto_reply(&request);
        let none = auto_reply(&waiting);

        // then (期待する結果):
        assert_eq!(reply, Some(ClientEvent::VoiceCallRejected));
        assert_eq!(none, None);
    }

    #[test]
    fn test_should_exit_immediately_with_server_rejected() {
        // テスト項目: ServerRejected エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::ServerRejected("404 Not Found".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_connection_error() {
        // テスト項目: ConnectionError の場合、即座に終了すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_server_rejected() {
        // テスト項目: ServerRejected エラーの場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ServerRejected("404 Not Found".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }
}
