//! Shared video-frame event model and codecs for the relay transport.
//!
//! This crate owns the wire representation used by the relay `server`, the
//! publishing `cli`, and the `canvas` engine. Binary websocket messages are
//! protobuf-encoded [`Event`]s; text messages carry the same event as JSON
//! with the image bytes base64-encoded, using the field names the browser
//! client already understands (`frame_id`, `frame`, `frame_width`,
//! `frame_height`).

use prost::Message;
use serde::{Deserialize, Serialize};

/// Event name for a video frame. The relay only forwards this event.
pub const DATA_EVENT: &str = "data";

/// Error returned by the decode functions.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes could not be decoded as a protobuf `WireEvent`.
    #[error("failed to decode protobuf event: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The text was not a valid JSON event (includes malformed base64 images).
    #[error("failed to decode JSON event: {0}")]
    Json(#[from] serde_json::Error),
    /// A protobuf event arrived without its frame payload.
    #[error("event `{0}` carries no frame")]
    MissingFrame(String),
}

/// One video frame as produced by a camera publisher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFrame {
    /// Producer-assigned identifier (a UUID string in practice).
    pub frame_id: String,
    /// Encoded image bytes (JPEG from the camera publisher).
    #[serde(rename = "frame", with = "base64_image")]
    pub image: Vec<u8>,
    /// Image width in pixels. Zero when the producer did not declare it.
    #[serde(rename = "frame_width", default)]
    pub width: u32,
    /// Image height in pixels. Zero when the producer did not declare it.
    #[serde(rename = "frame_height", default)]
    pub height: u32,
}

impl VideoFrame {
    #[must_use]
    pub fn new(frame_id: impl Into<String>, image: Vec<u8>, width: u32, height: u32) -> Self {
        Self { frame_id: frame_id.into(), image, width, height }
    }

    /// Whether the producer declared usable dimensions for this frame.
    #[must_use]
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A named event on the relay wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event name, e.g. [`DATA_EVENT`].
    pub event: String,
    /// Frame payload.
    #[serde(rename = "data")]
    pub frame: VideoFrame,
}

impl Event {
    /// Wrap a frame in a [`DATA_EVENT`] event.
    #[must_use]
    pub fn data(frame: VideoFrame) -> Self {
        Self { event: DATA_EVENT.to_owned(), frame }
    }

    /// Whether this is a frame event the relay should forward.
    #[must_use]
    pub fn is_data(&self) -> bool {
        self.event == DATA_EVENT
    }
}

/// Encode an event into protobuf bytes.
#[must_use]
pub fn encode_event(event: &Event) -> Vec<u8> {
    let wire = WireEvent {
        event: event.event.clone(),
        frame: Some(WireVideoFrame {
            frame_id: event.frame.frame_id.clone(),
            image: event.frame.image.clone(),
            width: event.frame.width,
            height: event.frame.height,
        }),
    };

    let mut out = Vec::with_capacity(wire.encoded_len());
    // Encoding into a growable Vec cannot run out of buffer space.
    wire.encode(&mut out).unwrap_or_default();
    out
}

/// Decode protobuf bytes into an event.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed bytes and
/// [`CodecError::MissingFrame`] when the frame payload is absent.
pub fn decode_event(bytes: &[u8]) -> Result<Event, CodecError> {
    let wire = WireEvent::decode(bytes)?;
    let Some(frame) = wire.frame else {
        return Err(CodecError::MissingFrame(wire.event));
    };
    Ok(Event {
        event: wire.event,
        frame: VideoFrame {
            frame_id: frame.frame_id,
            image: frame.image,
            width: frame.width,
            height: frame.height,
        },
    })
}

/// Encode an event as JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_event_json(event: &Event) -> Result<String, CodecError> {
    Ok(serde_json::to_string(event)?)
}

/// Decode JSON text into an event.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed JSON, missing fields, or an
/// image that is not valid base64.
pub fn decode_event_json(text: &str) -> Result<Event, CodecError> {
    Ok(serde_json::from_str(text)?)
}

mod base64_image {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, PartialEq, Message)]
struct WireEvent {
    #[prost(string, tag = "1")]
    event: String,
    #[prost(message, optional, tag = "2")]
    frame: Option<WireVideoFrame>,
}

#[derive(Clone, PartialEq, Message)]
struct WireVideoFrame {
    #[prost(string, tag = "1")]
    frame_id: String,
    #[prost(bytes = "vec", tag = "2")]
    image: Vec<u8>,
    #[prost(uint32, tag = "3")]
    width: u32,
    #[prost(uint32, tag = "4")]
    height: u32,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
