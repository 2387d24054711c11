//! Message formatting utilities for client display.

use chrono::{DateTime, Utc};
use parley_server::infrastructure::dto::websocket::{OnlineStats, ServerEvent, UserStatus};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any server event, or `None` for events that are not shown
    /// (typing indicators).
    pub fn format_event(event: &ServerEvent) -> Option<String> {
        let formatted = match event {
            ServerEvent::WaitingForPeer => Self::format_waiting(),
            ServerEvent::PeerMatched { peer_name, room_id } => {
                Self::format_peer_matched(peer_name, room_id)
            }
            ServerEvent::Message {
                message,
                sender,
                timestamp,
            } => Self::format_chat_message(sender, message, timestamp),
            ServerEvent::PeerTyping { .. } | ServerEvent::PeerStopTyping => return None,
            ServerEvent::VoiceCallRequest { from } => Self::format_call_request(from),
            ServerEvent::VoiceCallAccepted => Self::format_call_notice("accepted the call"),
            ServerEvent::VoiceCallRejected => Self::format_call_notice("rejected the call"),
            ServerEvent::VoiceCallEnded => Self::format_call_notice("ended the call"),
            ServerEvent::VoiceCallOffer { .. }
            | ServerEvent::VoiceCallAnswer { .. }
            | ServerEvent::IceCandidate { .. } => return None,
            ServerEvent::PeerDisconnected { peer_name } => {
                Self::format_peer_disconnected(peer_name)
            }
            ServerEvent::OnlineStats(stats) => Self::format_online_stats(stats),
        };
        Some(formatted)
    }

    pub fn format_waiting() -> String {
        "\n… Waiting for someone to chat with\n".to_string()
    }

    /// Format the match announcement
    ///
    /// # Arguments
    ///
    /// * `peer_name` - Display name of the matched peer
    /// * `room_id` - The room both peers share
    pub fn format_peer_matched(peer_name: &str, room_id: &str) -> String {
        format!(
            "\n\n============================================================\n\
             You are now chatting with {} ({})\n\
             Type messages and press Enter to send. Type /quit to leave.\n\
             ============================================================\n",
            peer_name, room_id
        )
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `from` - Display name of the sender
    /// * `content` - The message content
    /// * `timestamp` - RFC 3339 timestamp assigned by the server
    pub fn format_chat_message(from: &str, content: &str, timestamp: &str) -> String {
        format!(
            "\n\n------------------------------------------------------------\n\
             @{}: {}\n\
             sent at {}\n\
             ------------------------------------------------------------\n",
            from,
            content,
            Self::format_clock_time(timestamp)
        )
    }

    pub fn format_call_request(from: &str) -> String {
        format!("\n☎ {} wants to start a voice call (declined: no audio here)\n", from)
    }

    pub fn format_call_notice(what: &str) -> String {
        format!("\n☎ Peer {}\n", what)
    }

    pub fn format_peer_disconnected(peer_name: &str) -> String {
        format!(
            "\n- {} left the chat. Looking for someone new shortly...\n",
            peer_name
        )
    }

    /// Format the presence statistics as a single status line
    pub fn format_online_stats(stats: &OnlineStats) -> String {
        let idle = stats
            .online_users_list
            .iter()
            .filter(|user| user.status == UserStatus::Idle)
            .count();
        format!(
            "\n[online: {} | waiting: {} | rooms: {} | idle: {}]\n",
            stats.total_online, stats.waiting, stats.in_call, idle
        )
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    /// Format a confirmation message after sending
    pub fn format_sent_confirmation() -> String {
        "sent\n".to_string()
    }

    /// `HH:MM:SS` (UTC) of an RFC 3339 timestamp; unparsable input is shown as-is
    pub fn format_clock_time(timestamp: &str) -> String {
        DateTime::parse_from_rfc3339(timestamp)
            .map(|dt| dt.with_timezone(&Utc).format("%H:%M:%S UTC").to_string())
            .unwrap_or_else(|_| timestamp.to_string())
    }
}
