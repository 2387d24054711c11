//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged by `"type"` (kebab-case event name);
//! payload fields are camelCase.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Events sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    JoinChat {
        #[serde(default, deserialize_with = "lenient_string")]
        user_name: Option<String>,
    },
    Message {
        #[serde(default, deserialize_with = "lenient_string")]
        message: Option<String>,
    },
    Typing,
    StopTyping,
    VoiceCallRequest {
        /// Advisory only; the request always goes to the room peer.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<String>,
    },
    VoiceCallAccepted,
    VoiceCallRejected,
    VoiceCallOffer {
        #[serde(default)]
        offer: Value,
    },
    VoiceCallAnswer {
        #[serde(default)]
        answer: Value,
    },
    IceCandidate {
        #[serde(default)]
        candidate: Value,
    },
    VoiceCallEnded,
}

/// Accepts any JSON value; anything but a string reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Events sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    WaitingForPeer,
    PeerMatched {
        peer_name: String,
        room_id: String,
    },
    Message {
        message: String,
        sender: String,
        /// RFC 3339, assigned by the server
        timestamp: String,
    },
    PeerTyping {
        user_name: String,
    },
    PeerStopTyping,
    VoiceCallRequest {
        from: String,
    },
    VoiceCallAccepted,
    VoiceCallRejected,
    VoiceCallOffer {
        offer: Value,
    },
    VoiceCallAnswer {
        answer: Value,
    },
    IceCandidate {
        candidate: Value,
    },
    VoiceCallEnded,
    PeerDisconnected {
        peer_name: String,
    },
    OnlineStats(OnlineStats),
}

/// Presence statistics, pushed as `online-stats` and served by `/api/presence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineStats {
    pub total_online: usize,
    pub waiting: usize,
    pub in_call: usize,
    pub online_users_list: Vec<OnlineUserInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineUserInfo {
    pub user_name: String,
    pub status: UserStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserStatus {
    Waiting,
    InChat,
    Idle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_join_chat_with_and_without_name() {
        // テスト項目: join-chat は userName の有無にかかわらずパースできる
        // given (前提条件):
        let with_name = r#"{"type":"join-chat","userName":"Alice"}"#;
        let without_name = r#"{"type":"join-chat"}"#;

        // when (操作):
        let a: ClientEvent = serde_json::from_str(with_name).unwrap();
        let b: ClientEvent = serde_json::from_str(without_name).unwrap();

        // then (期待する結果):
        assert_eq!(
            a,
            ClientEvent::JoinChat {
                user_name: Some("Alice".to_string())
            }
        );
        assert_eq!(b, ClientEvent::JoinChat { user_name: None });
    }

    #[test]
    fn test_parse_wrong_typed_text_fields_as_absent() {
        // テスト項目: userName / message が文字列以外でもフレーム全体は拒否されない
        // given (前提条件):
        let inputs = [
            (
                r#"{"type":"join-chat","userName":42}"#,
                ClientEvent::JoinChat { user_name: None },
            ),
            (
                r#"{"type":"join-chat","userName":null}"#,
                ClientEvent::JoinChat { user_name: None },
            ),
            (
                r#"{"type":"message","message":{"text":"hi"}}"#,
                ClientEvent::Message { message: None },
            ),
            (
                r#"{"type":"message","message":["hi"]}"#,
                ClientEvent::Message { message: None },
            ),
        ];

        for (raw, expected) in inputs {
            // when (操作):
            let parsed: ClientEvent = serde_json::from_str(raw).unwrap();

            // then (期待する結果):
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_parse_unit_events() {
        // テスト項目: ペイロードのないイベントがパースできる
        // given (前提条件):
        let inputs = [
            (r#"{"type":"typing"}"#, ClientEvent::Typing),
            (r#"{"type":"stop-typing"}"#, ClientEvent::StopTyping),
            (r#"{"type":"voice-call-accepted"}"#, ClientEvent::VoiceCallAccepted),
            (r#"{"type":"voice-call-rejected"}"#, ClientEvent::VoiceCallRejected),
            (r#"{"type":"voice-call-ended"}"#, ClientEvent::VoiceCallEnded),
        ];

        for (raw, expected) in inputs {
            // when (操作):
            let parsed: ClientEvent = serde_json::from_str(raw).unwrap();

            // then (期待する結果):
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_parse_offer_keeps_opaque_payload() {
        // テスト項目: voice-call-offer の offer は中身を解釈せずに保持される
        // given (前提条件):
        let raw = r#"{"type":"voice-call-offer","offer":{"type":"offer","sdp":"v=0\r\n"}}"#;

        // when (操作):
        let parsed: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(
            parsed,
            ClientEvent::VoiceCallOffer {
                offer: json!({"type": "offer", "sdp": "v=0\r\n"})
            }
        );
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        // テスト項目: 未知のイベント種別はパースエラーになる
        // given (前提条件):
        let raw = r#"{"type":"self-destruct"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_peer_matched_uses_camel_case() {
        // テスト項目: peer-matched は camelCase のフィールド名でシリアライズされる
        // given (前提条件):
        let event = ServerEvent::PeerMatched {
            peer_name: "Bob".to_string(),
            room_id: "room_a_b".to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"type": "peer-matched", "peerName": "Bob", "roomId": "room_a_b"})
        );
    }

    #[test]
    fn test_serialize_online_stats() {
        // テスト項目: online-stats はタグ付きのフラットなオブジェクトになる
        // given (前提条件):
        let event = ServerEvent::OnlineStats(OnlineStats {
            total_online: 3,
            waiting: 1,
            in_call: 1,
            online_users_list: vec![OnlineUserInfo {
                user_name: "Alice".to_string(),
                status: UserStatus::InChat,
            }],
        });

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "online-stats",
                "totalOnline": 3,
                "waiting": 1,
                "inCall": 1,
                "onlineUsersList": [{"userName": "Alice", "status": "in-chat"}]
            })
        );
    }

    #[test]
    fn test_serialize_unit_server_event() {
        // テスト項目: ペイロードのないサーバーイベントは type のみになる
        // given (前提条件):
        let event = ServerEvent::WaitingForPeer;

        // when (操作):
        let raw = serde_json::to_string(&event).unwrap();

        // then (期待する結果):
        assert_eq!(raw, r#"{"type":"waiting-for-peer"}"#);
    }
}
