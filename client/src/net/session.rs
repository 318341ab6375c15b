//! Connection session: lifecycle, channel negotiation, and inbound routing.
//!
//! LIFECYCLE
//! =========
//! `Disconnected → Connected → Disconnected`, and the final state is terminal.
//!
//! 1. `on_opened` → greet the server, show "Connected", allocate the single
//!    sub-channel, announce it as `channel:<id>`, bind it to the render sink.
//! 2. `on_message` → classify with the router and deliver.
//! 3. `on_closed` → drop channel and connection, show "Disconnected", close
//!    the hosting view.
//!
//! ERROR HANDLING
//! ==============
//! Sends while disconnected are guarded and reported as
//! [`SessionError::NotConnected`]; nothing here panics or tears the session
//! down because of a bad frame. Transport loss shows up only as `on_closed`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::rc::Rc;

use frames::{ChannelId, CodecError, Control, Envelope, Payload};

use crate::net::channel::Channel;
use crate::net::router::{Route, classify};
use crate::net::sinks::{HostView, RenderSink, StatusSink};
use crate::net::transport::Connection;

/// First text frame sent once the connection opens.
pub const GREETING: &str = "Connection established";
/// Status text shown when the connection opens.
pub const CONNECTED_NOTICE: &str = "Connected";
/// Status text shown when the connection closes.
pub const DISCONNECTED_NOTICE: &str = "Disconnected";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// A send was attempted without an open connection.
    #[error("not connected")]
    NotConnected,
    /// `on_opened` fired while a channel is still active.
    #[error("channel {0} is already active")]
    DuplicateChannel(ChannelId),
    /// The session was closed and cannot be reopened.
    #[error("session already terminated")]
    Terminated,
    /// The transport allocated the reserved main-stream id for a sub-channel.
    #[error("transport allocated reserved channel {0}")]
    ReservedChannel(ChannelId),
    /// An inbound frame could not be decoded.
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] CodecError),
}

/// Connection state as seen by the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
}

pub struct Session {
    conn: Option<Rc<dyn Connection>>,
    channel: Option<Channel>,
    ping_seq: u64,
    terminated: bool,
    status: Box<dyn StatusSink>,
    render: Box<dyn RenderSink>,
    host: Box<dyn HostView>,
}

impl Session {
    pub fn new(
        status: impl StatusSink + 'static,
        render: impl RenderSink + 'static,
        host: impl HostView + 'static,
    ) -> Self {
        Self {
            conn: None,
            channel: None,
            ping_seq: 0,
            terminated: false,
            status: Box::new(status),
            render: Box::new(render),
            host: Box::new(host),
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.conn.is_some() { SessionState::Connected } else { SessionState::Disconnected }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state() == SessionState::Connected
    }

    /// Id of the channel bound to the render sink, while connected.
    #[must_use]
    pub fn active_channel(&self) -> Option<ChannelId> {
        self.channel.as_ref().map(Channel::id)
    }

    /// Take ownership of a freshly opened connection and negotiate the
    /// rendering channel. Returns the new channel's id.
    ///
    /// # Errors
    ///
    /// [`SessionError::DuplicateChannel`] if a channel is already active,
    /// [`SessionError::Terminated`] if this session was closed before, and
    /// [`SessionError::ReservedChannel`] if the transport hands out the main
    /// stream's id. In every case nothing is sent, the session is left
    /// untouched and `handle` is dropped.
    pub fn on_opened(&mut self, handle: impl Connection + 'static) -> Result<ChannelId, SessionError> {
        if let Some(active) = self.active_channel() {
            return Err(SessionError::DuplicateChannel(active));
        }
        if self.terminated {
            return Err(SessionError::Terminated);
        }

        let conn: Rc<dyn Connection> = Rc::new(handle);
        let id = conn.create_channel();
        if id.is_main() {
            leptos::logging::warn!("transport allocated channel {id}, refusing to open");
            return Err(SessionError::ReservedChannel(id));
        }

        if !conn.send(ChannelId::MAIN, Payload::text(GREETING)) {
            leptos::logging::warn!("greeting not queued");
        }
        self.conn = Some(Rc::clone(&conn));
        self.status.display(CONNECTED_NOTICE);

        let channel = Channel::new(id, &conn);
        // Announce before the render sink can see the channel, so nothing
        // channel-scoped is ever sent ahead of it.
        if !conn.send(ChannelId::MAIN, Payload::text(Control::OpenChannel(id).to_string())) {
            leptos::logging::warn!("channel {id} announcement not queued");
        }
        self.channel = Some(channel.clone());
        self.render.bind_channel(channel);

        leptos::logging::log!("session connected, channel {id} announced");
        Ok(id)
    }

    /// Route one inbound frame. Frames arriving while disconnected are dropped.
    pub fn on_message(&self, envelope: &Envelope) {
        if !self.is_connected() {
            leptos::logging::warn!("dropping frame on channel {}: not connected", envelope.channel);
            return;
        }

        match classify(envelope, self.active_channel()) {
            Route::Render { channel, payload } => self.render.render(channel, payload),
            Route::Status(text) => self.status.display(&text),
            Route::Malformed(err) => self.report_malformed(err),
        }
    }

    /// Report a frame that failed to decode, either in the router or in the
    /// transport's envelope parsing. The session stays up.
    pub fn report_malformed(&self, err: CodecError) {
        let err = SessionError::from(err);
        leptos::logging::warn!("dropping frame: {err}");
        self.status.display(&format!("err: {err}"));
    }

    /// Tear down after the transport closed. No-op when already disconnected.
    pub fn on_closed(&mut self) {
        if self.conn.is_none() {
            return;
        }

        self.channel = None;
        self.conn = None;
        self.terminated = true;
        self.status.display(DISCONNECTED_NOTICE);
        leptos::logging::log!("session closed");
        self.host.close();
    }

    /// Send a control request on the main stream.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotConnected`] without an open connection or
    /// when the transport refuses the frame.
    pub fn send_control(&self, control: &Control) -> Result<(), SessionError> {
        let conn = self.conn.as_ref().ok_or(SessionError::NotConnected)?;
        if conn.send(ChannelId::MAIN, Payload::text(control.to_string())) {
            Ok(())
        } else {
            Err(SessionError::NotConnected)
        }
    }

    /// Alternate `get_text` / `get_binary` requests, starting with text.
    ///
    /// Returns the request sent, or `None` (and leaves the counter alone)
    /// while disconnected.
    pub fn send_diagnostic_ping(&mut self) -> Option<Control> {
        if !self.is_connected() {
            leptos::logging::log!("ping ignored: not connected");
            return None;
        }

        let request = if self.ping_seq % 2 == 0 { Control::GetText } else { Control::GetBinary };
        self.ping_seq += 1;
        match self.send_control(&request) {
            Ok(()) => Some(request),
            Err(err) => {
                leptos::logging::warn!("ping {request} not sent: {err}");
                None
            }
        }
    }

    /// Ask the server to terminate. Returns `false` if nothing was sent.
    pub fn request_halt(&self) -> bool {
        match self.send_control(&Control::Halt) {
            Ok(()) => true,
            Err(err) => {
                leptos::logging::log!("halt ignored: {err}");
                false
            }
        }
    }
}
