//! Text wire encoding.
//!
//! Each event travels as one JSON text frame of the shape
//! `{"event": <name>, "data": <payload>}`. Both event enums carry their own
//! tagging, so encoding is symmetric for either direction.

use serde::{Serialize, de::DeserializeOwned};

use crate::errors::ProtocolError;

/// Encode an event as a JSON text frame.
pub fn encode<T: Serialize>(event: &T) -> Result<String, ProtocolError> {
    serde_json::to_string(event).map_err(|e| ProtocolError::Encode { reason: e.to_string() })
}

/// Decode a JSON text frame into an event.
pub fn decode<T: DeserializeOwned>(frame: &str) -> Result<T, ProtocolError> {
    serde_json::from_str(frame).map_err(|e| ProtocolError::Decode { reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{
        ChatMessage, InboundEvent, JoinRequest, MessageKind, OutboundEvent, SendMessage, Typing,
    };

    #[test]
    fn join_frame_shape() {
        let frame = encode(&OutboundEvent::Join(JoinRequest::new("alice")));
        assert_eq!(
            frame.ok(),
            Some(r#"{"event":"join","data":{"username":"alice","room":"general"}}"#.to_string())
        );
    }

    #[test]
    fn send_message_uses_type_field() {
        let frame = encode(&OutboundEvent::SendMessage(SendMessage {
            message: "hi".to_string(),
            kind: MessageKind::Text,
        }));
        assert_eq!(
            frame.ok(),
            Some(r#"{"event":"send_message","data":{"message":"hi","type":"text"}}"#.to_string())
        );
    }

    #[test]
    fn typing_frame_shape() {
        let frame = encode(&OutboundEvent::Typing(Typing { is_typing: true }));
        assert_eq!(
            frame.ok(),
            Some(r#"{"event":"typing","data":{"is_typing":true}}"#.to_string())
        );
    }

    #[test]
    fn decodes_server_receive_message() {
        let frame = r#"{"event":"receive_message","data":{"username":"Alice","message":"hi","type":"text","time":"12:00","user_id":"ab12cd34"}}"#;
        let event: Result<InboundEvent, _> = decode(frame);
        assert_eq!(
            event.ok(),
            Some(InboundEvent::ReceiveMessage(ChatMessage {
                username: "Alice".to_string(),
                message: "hi".to_string(),
                kind: MessageKind::Text,
                time: "12:00".to_string(),
                user_id: Some("ab12cd34".to_string()),
            }))
        );
    }

    #[test]
    fn user_id_is_optional() {
        let frame = r#"{"event":"receive_message","data":{"username":"bob","message":"x","type":"text","time":"09:30:00"}}"#;
        let event: Result<InboundEvent, _> = decode(frame);
        assert!(matches!(
            event,
            Ok(InboundEvent::ReceiveMessage(ChatMessage { user_id: None, .. }))
        ));
    }

    #[test]
    fn unknown_event_is_a_decode_error() {
        let frame = r#"{"event":"shrug","data":{}}"#;
        let event: Result<InboundEvent, _> = decode(frame);
        assert!(matches!(event, Err(ProtocolError::Decode { .. })));
    }
}
