//! Sub-channel handle bound to the rendering surface.
//!
//! A `Channel` owns nothing but its id and a weak link to the session's
//! connection. The session holds the only strong reference, so once it tears
//! the connection down every send through a stale channel reports
//! [`SessionError::NotConnected`].

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use std::fmt;
use std::rc::{Rc, Weak};

use frames::{ChannelId, Payload};

use crate::net::session::SessionError;
use crate::net::transport::Connection;

#[derive(Clone)]
pub struct Channel {
    id: ChannelId,
    conn: Weak<dyn Connection>,
}

impl Channel {
    pub(crate) fn new(id: ChannelId, conn: &Rc<dyn Connection>) -> Self {
        Self { id, conn: Rc::downgrade(conn) }
    }

    #[must_use]
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// True while the owning session still holds its connection.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.conn.strong_count() > 0
    }

    /// Send `payload` tagged with this channel's id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotConnected`] once the session has dropped the
    /// connection or the transport refuses the frame.
    pub fn send(&self, payload: Payload) -> Result<(), SessionError> {
        let conn = self.conn.upgrade().ok_or(SessionError::NotConnected)?;
        if conn.send(self.id, payload) {
            Ok(())
        } else {
            Err(SessionError::NotConnected)
        }
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("id", &self.id)
            .field("open", &self.is_open())
            .finish()
    }
}
