//! Wire protocol and JSON codec for the drawing session socket.
//!
//! Every message on the socket is one UTF-8 JSON text frame holding a flat,
//! single-key tagged union: the key names the kind and its value is the
//! payload. Kinds without a payload are sent as a bare string
//! (`"RequestInit"`).
//!
//! DESIGN
//! ======
//! The kind is read from the envelope before the payload is touched, so a bad
//! payload is reported against the kind it claimed to be. Payloads are then
//! deserialized into the server's shapes (`wire`) and converted into the
//! client values re-exported here. Encoding runs the same path in reverse.
//!
//! Colors survive a round trip by value, not by spelling: `#f00` comes back as
//! `#ff0000ff`, which compares equal.

mod convert;
mod message;
mod wire;

use serde_json::Value;

pub use message::{Cursor, CursorOut, Init, LayerInstruction, Message, MessageKind, TempDraw};

/// Error returned by [`decode_message`] and [`encode_message`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The frame is not valid JSON, or serialization failed.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    /// The envelope is neither a bare string nor an object with exactly one key.
    #[error("envelope must be a string or a single-key object")]
    NotSingleKey,
    /// The envelope key does not name a known [`MessageKind`].
    #[error("unknown message kind: {0:?}")]
    UnknownKind(String),
    /// The payload does not match the shape its kind requires.
    #[error("invalid {kind} payload: {source}")]
    Payload {
        kind: MessageKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("stroke has no points")]
    EmptyStroke,
    #[error("brush width must be positive and finite, got {0}")]
    InvalidBrushWidth(f32),
    #[error("image insertion has no position")]
    MissingImagePosition,
    /// A drawing snapshot whose layer order or history cursors do not agree
    /// with its layers.
    #[error("inconsistent drawing: {0}")]
    InconsistentDrawing(String),
}

/// Decode one text frame into a client message.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for invalid JSON, [`CodecError::NotSingleKey`]
/// or [`CodecError::UnknownKind`] for a bad envelope, [`CodecError::Payload`]
/// when the payload has the wrong shape, and the validation errors for
/// payloads the client model cannot hold.
pub fn decode_message(text: &str) -> Result<Message, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let kind = envelope_kind(&value)?;
    let wire: wire::WireMessage =
        serde_json::from_value(value).map_err(|source| CodecError::Payload { kind, source })?;
    convert::message_from_wire(wire)
}

/// Encode a client message as one text frame.
///
/// # Errors
///
/// Returns [`CodecError::EmptyStroke`], [`CodecError::InvalidBrushWidth`] or
/// [`CodecError::MissingImagePosition`] for values the server would reject.
pub fn encode_message(message: &Message) -> Result<String, CodecError> {
    let wire = convert::message_to_wire(message)?;
    Ok(serde_json::to_string(&wire)?)
}

fn envelope_kind(value: &Value) -> Result<MessageKind, CodecError> {
    let key = match value {
        Value::String(key) => key.as_str(),
        Value::Object(map) => {
            let mut keys = map.keys();
            match (keys.next(), keys.next()) {
                (Some(key), None) => key.as_str(),
                _ => return Err(CodecError::NotSingleKey),
            }
        }
        _ => return Err(CodecError::NotSingleKey),
    };
    MessageKind::from_key(key).ok_or_else(|| CodecError::UnknownKind(key.to_owned()))
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
