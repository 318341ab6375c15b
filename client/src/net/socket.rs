//! Browser websocket driver for the session.
//!
//! Opens one gloo-net websocket, waits for its handshake to complete, hands
//! the session a [`SocketHandle`] whose sends go through an unbounded queue
//! drained by the writer half, and feeds
//! every decoded inbound envelope to `Session::on_message` in arrival order.
//! When either half finishes the session is closed. There is no reconnect.

use std::cell::RefCell;
use std::rc::Rc;

use frames::{ChannelId, Envelope, Payload, WireMessage};
use futures::channel::mpsc::{self, UnboundedSender};
use gloo_net::websocket::Message;
use leptos::prelude::{RwSignal, Update};

use crate::net::browser::{BrowserWindow, ViewSink};
use crate::net::handshake::wait_until_open;
use crate::net::session::Session;
use crate::net::transport::{ChannelAllocator, Connection, socket_url};
use crate::state::session_view::{ConnectionStatus, SessionView};

/// Sending half of the socket as seen by the session.
pub struct SocketHandle {
    tx: UnboundedSender<Message>,
    channels: ChannelAllocator,
}

impl Connection for SocketHandle {
    fn send(&self, channel: ChannelId, payload: Payload) -> bool {
        let msg = match frames::encode_envelope(&Envelope::new(channel, payload)) {
            WireMessage::Text(text) => Message::Text(text),
            WireMessage::Binary(bytes) => Message::Bytes(bytes),
        };
        self.tx.unbounded_send(msg).is_ok()
    }

    fn create_channel(&self) -> ChannelId {
        self.channels.allocate()
    }
}

/// Create the session for this page and start its connection task.
pub fn spawn_session(view: RwSignal<SessionView>) -> Rc<RefCell<Session>> {
    let sink = ViewSink(view);
    let session = Rc::new(RefCell::new(Session::new(sink, sink, BrowserWindow)));
    leptos::task::spawn_local(run_session(view, Rc::clone(&session)));
    session
}

async fn run_session(view: RwSignal<SessionView>, session: Rc<RefCell<Session>>) {
    view.update(|v| v.connection_status = ConnectionStatus::Connecting);

    let href = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default();
    let host = web_sys::window()
        .and_then(|w| w.location().host().ok())
        .unwrap_or_else(|| "localhost:3000".to_owned());
    let url = socket_url(&href, &host);

    match connect_and_run(&url, view, &session).await {
        Ok(()) => leptos::logging::log!("WS disconnected cleanly"),
        Err(e) => leptos::logging::warn!("WS error: {e}"),
    }

    view.update(|v| v.connection_status = ConnectionStatus::Disconnected);
    session.borrow_mut().on_closed();
}

async fn connect_and_run(
    url: &str,
    view: RwSignal<SessionView>,
    session: &Rc<RefCell<Session>>,
) -> Result<(), String> {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();
    // A refused handshake ends here, before the session ever sees a handle.
    wait_until_open(&mut ws_write, &mut ws_read).await.map_err(|e| e.to_string())?;

    let (tx, mut rx) = mpsc::unbounded::<Message>();
    let handle = SocketHandle { tx, channels: ChannelAllocator::new() };
    session.borrow_mut().on_opened(handle).map_err(|e| e.to_string())?;
    view.update(|v| v.connection_status = ConnectionStatus::Connected);

    let send_task = async {
        while let Some(msg) = rx.next().await {
            if ws_write.send(msg).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            let decoded = match msg {
                Ok(Message::Text(text)) => frames::decode_text(&text),
                Ok(Message::Bytes(bytes)) => frames::decode_binary(bytes),
                Err(e) => {
                    leptos::logging::warn!("WS recv error: {e}");
                    break;
                }
            };
            let session = session.borrow();
            match decoded {
                Ok(envelope) => session.on_message(&envelope),
                Err(e) => session.report_malformed(e),
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;
    Ok(())
}
