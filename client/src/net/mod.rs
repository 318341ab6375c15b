//! Session networking: transport contract, channel, router, and session.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the connection lifecycle, `router` classifies inbound
//! frames, `channel` is the rendering sub-stream, and `sinks` / `transport`
//! define the seams to the page and the websocket. `handshake` holds the
//! session back until the socket has really opened. `socket` and `browser`
//! bind those seams to gloo-net and the DOM in the browser build.

pub mod api;
#[cfg(feature = "csr")]
pub mod browser;
pub mod channel;
pub mod handshake;
pub mod router;
pub mod session;
pub mod sinks;
#[cfg(feature = "csr")]
pub mod socket;
pub mod transport;
