//! Signals relayed between the two members of a room.

use serde_json::Value;

/// Opaque WebRTC signaling payload (SDP offer/answer, ICE candidate).
///
/// The server never inspects it; it is forwarded exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPayload(Value);

impl SignalPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// A room-scoped event sent by one peer to the other.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Chat { text: String },
    Typing,
    StopTyping,
    CallRequest,
    CallAccepted,
    CallRejected,
    CallOffer(SignalPayload),
    CallAnswer(SignalPayload),
    IceCandidate(SignalPayload),
    CallEnded,
}

impl Signal {
    /// Event name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Chat { .. } => "message",
            Signal::Typing => "typing",
            Signal::StopTyping => "stop-typing",
            Signal::CallRequest => "voice-call-request",
            Signal::CallAccepted => "voice-call-accepted",
            Signal::CallRejected => "voice-call-rejected",
            Signal::CallOffer(_) => "voice-call-offer",
            Signal::CallAnswer(_) => "voice-call-answer",
            Signal::IceCandidate(_) => "ice-candidate",
            Signal::CallEnded => "voice-call-ended",
        }
    }
}
