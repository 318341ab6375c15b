use super::*;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::executor::block_on;
use futures::stream;

/// Sink whose readiness is fixed up front.
struct FixedSink(Poll<Result<(), String>>);

impl Sink<&'static str> for FixedSink {
    type Error = String;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), String>> {
        self.0.clone()
    }

    fn start_send(self: Pin<&mut Self>, _item: &'static str) -> Result<(), String> {
        Ok(())
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), String>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), String>> {
        Poll::Ready(Ok(()))
    }
}

fn connecting() -> FixedSink {
    FixedSink(Poll::Pending)
}

fn open_sink() -> FixedSink {
    FixedSink(Poll::Ready(Ok(())))
}

#[test]
fn ready_sink_means_open() {
    let mut write = open_sink();
    let mut read = stream::pending::<Result<&'static str, String>>();
    assert_eq!(block_on(wait_until_open(&mut write, &mut read)), Ok(()));
}

#[test]
fn refused_handshake_is_an_error() {
    let mut write = connecting();
    let mut read = stream::iter(vec![Err::<&'static str, _>("connection refused".to_owned())]);
    assert_eq!(
        block_on(wait_until_open(&mut write, &mut read)),
        Err(OpenError::Refused("connection refused".to_owned()))
    );
}

#[test]
fn stream_ending_while_connecting_is_an_error() {
    let mut write = connecting();
    let mut read = stream::empty::<Result<&'static str, String>>();
    assert_eq!(block_on(wait_until_open(&mut write, &mut read)), Err(OpenError::ClosedBeforeOpen));
}

#[test]
fn sink_error_is_reported() {
    let mut write = FixedSink(Poll::Ready(Err("closed".to_owned())));
    let mut read = stream::pending::<Result<&'static str, String>>();
    assert_eq!(
        block_on(wait_until_open(&mut write, &mut read)),
        Err(OpenError::NotWritable("closed".to_owned()))
    );
}

#[test]
fn frame_before_open_is_rejected() {
    let mut write = connecting();
    let mut read = stream::iter(vec![Ok::<_, String>("0:early")]);
    assert!(matches!(block_on(wait_until_open(&mut write, &mut read)), Err(OpenError::Refused(_))));
}
