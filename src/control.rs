//! Remote-control channel messages
//!
//! The operator console drives sessions over a real-time channel with two
//! events: `start` carrying a JSON `{"rounds": n, ...}` payload, and a
//! bare `stop`. Transport is the host's concern; this module only decodes
//! event/payload pairs and applies them to the session. A control message
//! is applied between ticks, never mid-update.

use serde::Deserialize;
use thiserror::Error;

use crate::sim::GameState;

/// Payload of a `start` event. Unknown fields (the console also sends
/// presentation hints like `numberType`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StartPayload {
    pub rounds: u32,
}

/// A decoded control message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    Start { rounds: u32 },
    Stop,
}

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("unknown control event `{0}`")]
    UnknownEvent(String),
    #[error("start event without payload")]
    MissingPayload,
    #[error("bad start payload: {0}")]
    BadPayload(#[from] serde_json::Error),
    #[error("start requested {0} rounds, expected a positive count")]
    BadRoundCount(u32),
}

/// Decode an event name plus optional JSON payload
pub fn decode(event: &str, payload: Option<&str>) -> Result<ControlMessage, ControlError> {
    match event {
        "start" => {
            let raw = payload.ok_or(ControlError::MissingPayload)?;
            let parsed: StartPayload = serde_json::from_str(raw)?;
            if parsed.rounds == 0 {
                return Err(ControlError::BadRoundCount(parsed.rounds));
            }
            Ok(ControlMessage::Start { rounds: parsed.rounds })
        }
        "stop" => Ok(ControlMessage::Stop),
        other => Err(ControlError::UnknownEvent(other.to_string())),
    }
}

/// Apply a message to the session; valid from any phase
pub fn apply(message: &ControlMessage, state: &mut GameState) {
    match message {
        ControlMessage::Start { rounds } => state.external_start(*rounds),
        ControlMessage::Stop => state.external_stop(),
    }
}
