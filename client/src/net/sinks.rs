//! Consumers the session delivers to.
//!
//! The page shell supplies these: a text status line, the canvas that renders
//! channel-scoped frames, and the hosting view that closes on teardown.

use frames::{ChannelId, Payload};

use crate::net::channel::Channel;

/// Human-readable status output.
pub trait StatusSink {
    fn display(&self, text: &str);
}

/// The rendering surface bound to the session's channel.
pub trait RenderSink {
    /// Called once, right after the channel is created and announced.
    fn bind_channel(&self, channel: Channel);

    /// A frame tagged with the bound channel, forwarded undecoded.
    fn render(&self, channel: ChannelId, payload: &Payload);
}

/// The view hosting the session; closed when the connection goes away.
pub trait HostView {
    fn close(&self);
}
