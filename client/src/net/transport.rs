//! Transport contract consumed by the session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The physical connection (a browser websocket in production, a recorder in
//! tests) is reached only through [`Connection`]. Sends are fire-and-forget:
//! the transport queues one frame and never reports delivery.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::cell::Cell;

use frames::{ChannelId, Payload};

/// One open physical connection.
pub trait Connection {
    /// Queue one frame on `channel`.
    ///
    /// Returns `false` if the connection can no longer accept frames.
    fn send(&self, channel: ChannelId, payload: Payload) -> bool;

    /// Allocate a new sub-channel id, unique for the lifetime of this
    /// connection. Never returns [`ChannelId::MAIN`].
    fn create_channel(&self) -> ChannelId;
}

/// Sequential sub-channel id source. Id 0 is reserved for the main stream.
#[derive(Debug)]
pub struct ChannelAllocator {
    next: Cell<u32>,
}

impl ChannelAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self { next: Cell::new(1) }
    }

    pub fn allocate(&self) -> ChannelId {
        let id = self.next.get();
        self.next.set(id.wrapping_add(1).max(1));
        ChannelId(id)
    }
}

impl Default for ChannelAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Websocket URL for the page at `href` served from `host`.
///
/// Secure pages get `wss`, everything else `ws`.
#[must_use]
pub fn socket_url(href: &str, host: &str) -> String {
    let ws_proto = if href.starts_with("https") { "wss" } else { "ws" };
    format!("{ws_proto}://{host}/ws")
}
