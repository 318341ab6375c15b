//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! canvas snapshot and the halt flag are `watch` channels: every connection
//! subscribes and reacts to the latest value only.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::canvas::CanvasFeeder;
use crate::config::Config;

/// Shared application state. Clone is required by Axum; all fields are cheap
/// handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Latest canvas snapshot in wire form.
    pub canvas: Arc<watch::Sender<Arc<Vec<f32>>>>,
    /// Set once a client requested `halt`.
    pub halt: Arc<watch::Sender<bool>>,
    next_connection_id: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let (canvas, _) = watch::channel(CanvasFeeder::new().snapshot());
        let (halt, _) = watch::channel(false);
        Self {
            config: Arc::new(config),
            canvas: Arc::new(canvas),
            halt: Arc::new(halt),
            next_connection_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Id for logging one websocket connection.
    pub fn next_connection_id(&self) -> u64 {
        self.next_connection_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Flag the server for shutdown. Idempotent.
    pub fn request_halt(&self) {
        self.halt.send_replace(true);
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        *self.halt.borrow()
    }
}

/// Resolve once the halt flag is set, or the sender is gone.
pub async fn halted(rx: &mut watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;
