//! Inbound frame classification.
//!
//! Every inbound envelope resolves to exactly one [`Route`]:
//! frames tagged with the active channel go to the render sink untouched;
//! everything else is diagnostic output for the status sink. Binary
//! diagnostics are decoded here as f32 arrays, channel frames never are.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use frames::{ChannelId, CodecError, Envelope, Payload, decode_f32_le, format_floats};

/// Display prefix for text diagnostics.
pub const TEXT_PREFIX: &str = "txt: ";
/// Display prefix for decoded binary diagnostics.
pub const BINARY_PREFIX: &str = "bin: ";

/// Where one inbound frame goes.
#[derive(Debug, PartialEq)]
pub enum Route<'a> {
    /// Channel-scoped frame for the render sink, payload and offset unchanged.
    Render { channel: ChannelId, payload: &'a Payload },
    /// Display text for the status sink.
    Status(String),
    /// Binary diagnostic that cannot be read as f32 values; dropped.
    Malformed(CodecError),
}

/// Classify `envelope` given the session's active channel, if any.
#[must_use]
pub fn classify(envelope: &Envelope, active: Option<ChannelId>) -> Route<'_> {
    if active == Some(envelope.channel) {
        return Route::Render { channel: envelope.channel, payload: &envelope.payload };
    }

    match &envelope.payload {
        Payload::Text(text) => Route::Status(format!("{TEXT_PREFIX}{text}")),
        Payload::Binary { data, offset } => match decode_f32_le(data, *offset) {
            Ok(values) => Route::Status(format!("{BINARY_PREFIX}{}", format_floats(&values))),
            Err(err) => Route::Malformed(err),
        },
    }
}
