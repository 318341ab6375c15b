//! WebSocket handler: main-channel control protocol and canvas streaming.
//!
//! DESIGN
//! ======
//! Each socket carries the main control stream (channel 0) plus any
//! sub-channels the page announces with `channel:<id>`. Control handling is
//! pure: `process_control` updates per-connection state and returns an
//! `Outcome`; the connection loop owns all socket writes.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → subscribe to canvas snapshots and the halt flag
//! 2. Main-channel text → `process_control` → reply / attach / halt
//! 3. Canvas snapshot changed → push it on every attached channel
//! 4. Close, socket error, or halt → leave the loop

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use frames::{ChannelId, Control, Envelope, Payload, WireMessage, encode_f32_le};
use tracing::{debug, info, warn};

use crate::state::{AppState, halted};

/// Number of values in a `get_binary` reply.
const BINARY_REPLY_LEN: usize = 10;

// =============================================================================
// OUTCOME
// =============================================================================

/// Result of one main-channel control message. The connection loop decides
/// what goes on the wire.
#[derive(Debug, PartialEq)]
enum Outcome {
    /// Send this envelope back to the client.
    Reply(Envelope),
    /// A new sub-channel was attached; push the current canvas on it.
    Attach(ChannelId),
    /// The client asked the server to terminate.
    Halt,
    /// Nothing to send.
    Ignore,
}

/// Per-connection protocol state.
#[derive(Debug)]
struct ConnectionState {
    id: u64,
    /// Main-channel messages received so far.
    counter: u32,
    /// Attached sub-channels, in announcement order.
    channels: Vec<ChannelId>,
}

impl ConnectionState {
    fn new(id: u64) -> Self {
        Self { id, counter: 0, channels: Vec::new() }
    }
}

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let mut conn = ConnectionState::new(state.next_connection_id());
    let mut canvas_rx = state.canvas.subscribe();
    let mut halt_rx = state.halt.subscribe();

    info!(conn = conn.id, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        if !handle_text(&mut socket, &state, &mut conn, text.as_str()).await {
                            break;
                        }
                    }
                    Message::Binary(bytes) => {
                        debug!(conn = conn.id, len = bytes.len(), "ws: ignoring binary frame");
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            changed = canvas_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = canvas_rx.borrow_and_update().clone();
                if push_snapshot(&mut socket, &conn, &snapshot).await.is_err() {
                    break;
                }
            }
            () = halted(&mut halt_rx) => {
                info!(conn = conn.id, "ws: closing for halt");
                if let Err(e) = socket.send(Message::Close(None)).await {
                    debug!(conn = conn.id, error = %e, "ws: close frame not sent");
                }
                break;
            }
        }
    }

    info!(conn = conn.id, channels = conn.channels.len(), "ws: client disconnected");
}

/// Handle one inbound text message. Returns `false` if the socket is gone.
async fn handle_text(socket: &mut WebSocket, state: &AppState, conn: &mut ConnectionState, text: &str) -> bool {
    let envelope = match frames::decode_text(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(conn = conn.id, error = %e, "ws: undecodable frame");
            return true;
        }
    };

    let Payload::Text(body) = envelope.payload else {
        return true;
    };
    if !envelope.channel.is_main() {
        debug!(conn = conn.id, channel = %envelope.channel, %body, "ws: channel text");
        return true;
    }

    match process_control(conn, &body) {
        Outcome::Reply(reply) => send_envelope(socket, &reply).await.is_ok(),
        Outcome::Attach(channel) => {
            let snapshot = state.canvas.borrow().clone();
            send_envelope(socket, &snapshot_envelope(channel, &snapshot)).await.is_ok()
        }
        Outcome::Halt => {
            state.request_halt();
            true
        }
        Outcome::Ignore => true,
    }
}

// =============================================================================
// CONTROL
// =============================================================================

/// Apply one main-channel message to the connection state.
#[allow(clippy::cast_precision_loss)]
fn process_control(conn: &mut ConnectionState, text: &str) -> Outcome {
    conn.counter += 1;
    info!(conn = conn.id, counter = conn.counter, msg = %text, "ws: recv control");

    match text.parse::<Control>() {
        Ok(Control::GetText) => Outcome::Reply(Envelope::main_text(format!("Message{}", conn.counter))),
        Ok(Control::GetBinary) => {
            let values = [conn.counter as f32; BINARY_REPLY_LEN];
            Outcome::Reply(Envelope::new(ChannelId::MAIN, Payload::binary(encode_f32_le(&values))))
        }
        Ok(Control::Halt) => {
            info!(conn = conn.id, "ws: halt requested");
            Outcome::Halt
        }
        Ok(Control::OpenChannel(channel)) => {
            if channel.is_main() || conn.channels.contains(&channel) {
                warn!(conn = conn.id, %channel, "ws: channel already attached");
                return Outcome::Ignore;
            }
            info!(conn = conn.id, %channel, "ws: channel attached");
            conn.channels.push(channel);
            Outcome::Attach(channel)
        }
        Ok(Control::Other(_)) => Outcome::Ignore,
        Err(e) => {
            warn!(conn = conn.id, error = %e, "ws: bad control message");
            Outcome::Ignore
        }
    }
}

// =============================================================================
// OUTBOUND
// =============================================================================

fn snapshot_envelope(channel: ChannelId, snapshot: &[f32]) -> Envelope {
    Envelope::new(channel, Payload::binary(encode_f32_le(snapshot)))
}

async fn push_snapshot(socket: &mut WebSocket, conn: &ConnectionState, snapshot: &[f32]) -> Result<(), axum::Error> {
    for channel in &conn.channels {
        send_envelope(socket, &snapshot_envelope(*channel, snapshot)).await?;
    }
    Ok(())
}

async fn send_envelope(socket: &mut WebSocket, envelope: &Envelope) -> Result<(), axum::Error> {
    let msg = match frames::encode_envelope(envelope) {
        WireMessage::Text(text) => Message::Text(text.into()),
        WireMessage::Binary(bytes) => Message::Binary(bytes.into()),
    };
    socket.send(msg).await
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod ws_test;
