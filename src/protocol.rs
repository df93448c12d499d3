//! Outbound message type.
//!
//! The manager treats payloads as opaque JSON; it never inspects message
//! content. [`OutboundMessage`] is serde-serializable so transport
//! implementations can frame it directly.
//!
//! # Format
//!
//! ```json
//! { "event": "chat.message", "payload": { "text": "hi" } }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// OutboundMessage
// ============================================================================

/// A named event with an opaque payload, queued while disconnected and
/// forwarded in FIFO order once the channel is connected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Event name.
    pub event: String,

    /// Opaque application payload.
    pub payload: Value,
}

impl OutboundMessage {
    /// Creates a new outbound message.
    #[inline]
    #[must_use]
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_serialize_shape() {
        let message = OutboundMessage::new("chat.message", json!({ "text": "hi" }));
        let json = serde_json::to_string(&message).expect("serialize");

        assert!(json.contains(r#""event":"chat.message""#));
        assert!(json.contains(r#""text":"hi""#));
    }

    #[test]
    fn test_deserialize_round() {
        let raw = r#"{ "event": "presence", "payload": 42 }"#;
        let message: OutboundMessage = serde_json::from_str(raw).expect("parse message");

        assert_eq!(message.event, "presence");
        assert_eq!(message.payload, json!(42));
    }
}
