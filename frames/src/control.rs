//! Control messages exchanged on the main channel.
//!
//! The grammar is plain text: a fixed keyword, or `channel:<id>` to ask the
//! server to attach a new sub-channel. Anything unrecognized is carried as
//! [`Control::Other`] so greetings and free-form diagnostics pass through.

use std::fmt;
use std::str::FromStr;

use crate::{ChannelId, CodecError};

const GET_TEXT: &str = "get_text";
const GET_BINARY: &str = "get_binary";
const HALT: &str = "halt";
const CHANNEL_PREFIX: &str = "channel:";

/// A control request on the main channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Control {
    /// Ask the server for a text diagnostic reply.
    GetText,
    /// Ask the server for a binary (f32 array) diagnostic reply.
    GetBinary,
    /// Ask the server process to terminate.
    Halt,
    /// Announce a freshly created sub-channel.
    OpenChannel(ChannelId),
    /// Free-form text, e.g. the connection greeting.
    Other(String),
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetText => f.write_str(GET_TEXT),
            Self::GetBinary => f.write_str(GET_BINARY),
            Self::Halt => f.write_str(HALT),
            Self::OpenChannel(id) => write!(f, "{CHANNEL_PREFIX}{id}"),
            Self::Other(text) => f.write_str(text),
        }
    }
}

impl FromStr for Control {
    type Err = CodecError;

    /// # Errors
    ///
    /// Returns [`CodecError::InvalidChannelId`] for a `channel:` request whose
    /// id is not a number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            GET_TEXT => Self::GetText,
            GET_BINARY => Self::GetBinary,
            HALT => Self::Halt,
            _ => match s.strip_prefix(CHANNEL_PREFIX) {
                Some(id) => Self::OpenChannel(id.parse()?),
                None => Self::Other(s.to_owned()),
            },
        })
    }
}

#[cfg(test)]
#[path = "control_test.rs"]
mod control_test;
