//! Shared wire model for the webwindow channel protocol.
//!
//! This crate owns the representation used by both `server` and `client`.
//! One websocket carries several logical channels. Every websocket message is
//! an envelope tagged with the id of the channel it belongs to:
//!
//! - text:   `"<chid>:<body>"`
//! - binary: ASCII `"<chid>:"` header followed by the raw payload
//!
//! Binary envelopes are decoded without copying the header away; the payload
//! keeps a byte `offset` pointing past it, and consumers read from there.
//! Channel `0` is the main (session-level) control stream.

pub mod control;
pub mod floats;

use std::fmt;
use std::str::FromStr;

pub use control::Control;
pub use floats::{decode_f32_le, encode_f32_le, format_floats};

/// Longest textual channel id header accepted: `u32::MAX` digits plus `':'`.
const MAX_HEADER_LEN: usize = 11;

/// Error returned by envelope, control, and float decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The message does not start with a `"<chid>:"` tag.
    #[error("missing channel tag")]
    MissingChannelTag,
    /// The channel tag is present but not a valid unsigned integer.
    #[error("invalid channel id: {0:?}")]
    InvalidChannelId(String),
    /// The payload offset points past the end of the buffer.
    #[error("offset {offset} out of range for {len} byte payload")]
    OffsetOutOfRange { offset: usize, len: usize },
    /// The byte count after the offset is not a multiple of 4.
    #[error("{len} bytes after offset is not a whole number of f32 values")]
    MisalignedFloats { len: usize },
}

/// Identifier of one logical channel multiplexed over a connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u32);

impl ChannelId {
    /// The session-level control stream.
    pub const MAIN: Self = Self(0);

    #[must_use]
    pub fn is_main(self) -> bool {
        self == Self::MAIN
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChannelId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // u32::from_str accepts a leading '+', the wire format does not.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::InvalidChannelId(s.to_owned()));
        }
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| CodecError::InvalidChannelId(s.to_owned()))
    }
}

/// Payload of one frame, tagged by kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Control or diagnostic text.
    Text(String),
    /// Raw bytes; meaningful content starts at `offset`.
    Binary { data: Vec<u8>, offset: usize },
}

impl Payload {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Binary payload whose content starts at the first byte.
    #[must_use]
    pub fn binary(data: Vec<u8>) -> Self {
        Self::Binary { data, offset: 0 }
    }

    /// Content length in bytes, excluding any header before `offset`.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary { data, offset } => data.len().saturating_sub(*offset),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A payload tagged with the channel it travels on.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub channel: ChannelId,
    pub payload: Payload,
}

impl Envelope {
    #[must_use]
    pub fn new(channel: ChannelId, payload: Payload) -> Self {
        Self { channel, payload }
    }

    /// Text envelope on the main control stream.
    #[must_use]
    pub fn main_text(text: impl Into<String>) -> Self {
        Self::new(ChannelId::MAIN, Payload::text(text))
    }
}

/// A websocket message body ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WireMessage {
    Text(String),
    Binary(Vec<u8>),
}

/// Encode an envelope into its websocket message form.
///
/// Binary payloads are written starting at their `offset`; any header before
/// it is replaced by the channel tag.
#[must_use]
pub fn encode_envelope(envelope: &Envelope) -> WireMessage {
    match &envelope.payload {
        Payload::Text(text) => WireMessage::Text(format!("{}:{text}", envelope.channel)),
        Payload::Binary { data, offset } => {
            let header = format!("{}:", envelope.channel);
            let body = data.get(*offset..).unwrap_or_default();
            let mut out = Vec::with_capacity(header.len() + body.len());
            out.extend_from_slice(header.as_bytes());
            out.extend_from_slice(body);
            WireMessage::Binary(out)
        }
    }
}

/// Decode a text websocket message.
///
/// # Errors
///
/// Returns [`CodecError::MissingChannelTag`] when no `':'` separator is found
/// and [`CodecError::InvalidChannelId`] when the tag is not a number.
pub fn decode_text(message: &str) -> Result<Envelope, CodecError> {
    let (tag, body) = message.split_once(':').ok_or(CodecError::MissingChannelTag)?;
    let channel = tag.parse()?;
    Ok(Envelope::new(channel, Payload::Text(body.to_owned())))
}

/// Decode a binary websocket message.
///
/// The returned payload keeps the whole buffer; its `offset` is the length of
/// the channel header.
///
/// # Errors
///
/// Returns [`CodecError::MissingChannelTag`] when no `':'` appears within the
/// header window and [`CodecError::InvalidChannelId`] for a non-numeric tag.
pub fn decode_binary(data: Vec<u8>) -> Result<Envelope, CodecError> {
    let window = &data[..data.len().min(MAX_HEADER_LEN)];
    let sep = window
        .iter()
        .position(|b| *b == b':')
        .ok_or(CodecError::MissingChannelTag)?;
    let tag = std::str::from_utf8(&data[..sep])
        .map_err(|_| CodecError::InvalidChannelId(String::from_utf8_lossy(&data[..sep]).into_owned()))?;
    let channel = tag.parse()?;
    Ok(Envelope::new(channel, Payload::Binary { data, offset: sep + 1 }))
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
