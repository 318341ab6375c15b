//! Waiting for a freshly created socket to finish opening.
//!
//! A browser websocket exists in the CONNECTING state before its handshake
//! completes. Its sink stays pending until then, while a refused or dropped
//! handshake surfaces on the read half as an error or end of stream. The
//! session is only told about the connection once the sink is ready.

#[cfg(test)]
#[path = "handshake_test.rs"]
mod handshake_test;

use std::fmt::Display;
use std::future::poll_fn;

use futures::future::{Either, select};
use futures::{Sink, SinkExt, Stream, StreamExt};

/// Why a socket never reached the open state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpenError {
    /// The write half reported an error instead of becoming ready.
    #[error("socket not writable: {0}")]
    NotWritable(String),
    /// The read half failed before the socket opened.
    #[error("handshake failed: {0}")]
    Refused(String),
    /// The read half ended before the socket opened.
    #[error("socket closed before opening")]
    ClosedBeforeOpen,
}

/// Resolve once `write` is ready to accept frames, or fail if `read` reports
/// an error or ends first.
///
/// # Errors
///
/// See [`OpenError`].
pub async fn wait_until_open<W, R, M, E>(write: &mut W, read: &mut R) -> Result<(), OpenError>
where
    W: Sink<M> + Unpin,
    W::Error: Display,
    R: Stream<Item = Result<M, E>> + Unpin,
    E: Display,
{
    let ready = poll_fn(|cx| write.poll_ready_unpin(cx));
    match select(ready, read.next()).await {
        Either::Left((Ok(()), _)) => Ok(()),
        Either::Left((Err(e), _)) => Err(OpenError::NotWritable(e.to_string())),
        Either::Right((Some(Err(e)), _)) => Err(OpenError::Refused(e.to_string())),
        Either::Right((None, _)) => Err(OpenError::ClosedBeforeOpen),
        // Nothing is readable before the handshake; treat it as a broken peer.
        Either::Right((Some(Ok(_)), _)) => Err(OpenError::Refused("frame received before open".to_owned())),
    }
}
