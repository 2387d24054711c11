//! Conversion logic between DTOs and domain types.

use parley_shared::time::timestamp_to_rfc3339;
use thiserror::Error;

use crate::domain::{Notification, PresenceSnapshot, PresenceStatus, Signal, SignalPayload};
use crate::infrastructure::dto::websocket as dto;

/// The client event cannot be relayed to a peer (it drives matchmaking).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event is not a relayable signal")]
pub struct NotASignal;

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ClientEvent> for Signal {
    type Error = NotASignal;

    fn try_from(event: dto::ClientEvent) -> Result<Self, Self::Error> {
        let signal = match event {
            dto::ClientEvent::JoinChat { .. } => return Err(NotASignal),
            dto::ClientEvent::Message { message } => Signal::Chat {
                text: message.unwrap_or_default(),
            },
            dto::ClientEvent::Typing => Signal::Typing,
            dto::ClientEvent::StopTyping => Signal::StopTyping,
            dto::ClientEvent::VoiceCallRequest { .. } => Signal::CallRequest,
            dto::ClientEvent::VoiceCallAccepted => Signal::CallAccepted,
            dto::ClientEvent::VoiceCallRejected => Signal::CallRejected,
            dto::ClientEvent::VoiceCallOffer { offer } => Signal::CallOffer(SignalPayload::new(offer)),
            dto::ClientEvent::VoiceCallAnswer { answer } => {
                Signal::CallAnswer(SignalPayload::new(answer))
            }
            dto::ClientEvent::IceCandidate { candidate } => {
                Signal::IceCandidate(SignalPayload::new(candidate))
            }
            dto::ClientEvent::VoiceCallEnded => Signal::CallEnded,
        };
        Ok(signal)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<PresenceStatus> for dto::UserStatus {
    fn from(status: PresenceStatus) -> Self {
        match status {
            PresenceStatus::Waiting => Self::Waiting,
            PresenceStatus::InChat => Self::InChat,
            PresenceStatus::Idle => Self::Idle,
        }
    }
}

impl From<PresenceSnapshot> for dto::OnlineStats {
    fn from(snapshot: PresenceSnapshot) -> Self {
        Self {
            total_online: snapshot.total_online,
            waiting: snapshot.waiting,
            in_call: snapshot.in_call,
            online_users_list: snapshot
                .users
                .into_iter()
                .map(|user| dto::OnlineUserInfo {
                    user_name: user.display_name.into_string(),
                    status: user.status.into(),
                })
                .collect(),
        }
    }
}

impl From<Notification> for dto::ServerEvent {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::WaitingForPeer => Self::WaitingForPeer,
            Notification::PeerMatched { peer_name, room_id } => Self::PeerMatched {
                peer_name: peer_name.into_string(),
                room_id: room_id.into_string(),
            },
            Notification::Relayed {
                from,
                signal,
                sent_at,
            } => match signal {
                Signal::Chat { text } => Self::Message {
                    message: text,
                    sender: from.into_string(),
                    timestamp: timestamp_to_rfc3339(sent_at.value()),
                },
                Signal::Typing => Self::PeerTyping {
                    user_name: from.into_string(),
                },
                Signal::StopTyping => Self::PeerStopTyping,
                Signal::CallRequest => Self::VoiceCallRequest {
                    from: from.into_string(),
                },
                Signal::CallAccepted => Self::VoiceCallAccepted,
                Signal::CallRejected => Self::VoiceCallRejected,
                Signal::CallOffer(offer) => Self::VoiceCallOffer {
                    offer: offer.into_value(),
                },
                Signal::CallAnswer(answer) => Self::VoiceCallAnswer {
                    answer: answer.into_value(),
                },
                Signal::IceCandidate(candidate) => Self::IceCandidate {
                    candidate: candidate.into_value(),
                },
                Signal::CallEnded => Self::VoiceCallEnded,
            },
            Notification::PeerDisconnected { peer_name } => Self::PeerDisconnected {
                peer_name: peer_name.into_string(),
            },
            Notification::OnlineStats(snapshot) => Self::OnlineStats(snapshot.into()),
        }
    }
}
