//! Canvas model streamed to attached channels.
//!
//! DESIGN
//! ======
//! The canvas is a fixed 2D histogram that a background task fills on a
//! timer. After every fill the task publishes an immutable snapshot on a
//! `watch` channel; websocket connections with an attached channel forward
//! the latest snapshot as a binary frame. Slow readers only ever see the
//! newest snapshot, never a backlog.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::state::{AppState, halted};

/// Bins per axis.
pub const BINS: usize = 60;
/// Weight added by each fill.
pub const FILL_WEIGHT: f64 = 1000.0;
/// Fill position step, wrapping at [`BINS`].
const FILL_STEP: usize = 7;
const FILL_START: usize = 2;

/// Fixed-range 2D histogram with uniform bins. Out-of-range fills are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2d {
    nx: usize,
    ny: usize,
    x_range: (f64, f64),
    y_range: (f64, f64),
    bins: Vec<f64>,
    entries: u64,
}

impl Histogram2d {
    #[must_use]
    pub fn new(nx: usize, x_range: (f64, f64), ny: usize, y_range: (f64, f64)) -> Self {
        Self { nx, ny, x_range, y_range, bins: vec![0.0; nx * ny], entries: 0 }
    }

    /// Add `weight` at `(x, y)`. Returns `false` if the point is outside the
    /// histogram range.
    pub fn fill(&mut self, x: f64, y: f64, weight: f64) -> bool {
        let (Some(ix), Some(iy)) = (
            bin_index(x, self.x_range, self.nx),
            bin_index(y, self.y_range, self.ny),
        ) else {
            return false;
        };
        self.bins[iy * self.nx + ix] += weight;
        self.entries += 1;
        true
    }

    #[cfg(test)]
    pub fn content(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix >= self.nx || iy >= self.ny {
            return None;
        }
        Some(self.bins[iy * self.nx + ix])
    }

    #[must_use]
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Wire form: `[nx, ny, bins...]` as f32, row-major.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn to_floats(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.bins.len() + 2);
        out.push(self.nx as f32);
        out.push(self.ny as f32);
        out.extend(self.bins.iter().map(|v| *v as f32));
        out
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn bin_index(v: f64, (lo, hi): (f64, f64), n: usize) -> Option<usize> {
    if !(lo..hi).contains(&v) || n == 0 {
        return None;
    }
    let i = ((v - lo) / (hi - lo) * n as f64) as usize;
    Some(i.min(n - 1))
}

/// The histogram plus the moving fill position.
#[derive(Debug, Clone)]
pub struct CanvasFeeder {
    hist: Histogram2d,
    place: usize,
}

impl CanvasFeeder {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new() -> Self {
        let x_max = (BINS * 2) as f64;
        let y_max = BINS as f64;
        Self { hist: Histogram2d::new(BINS, (0.0, x_max), BINS, (0.0, y_max)), place: FILL_START }
    }

    /// One update step: fill at `(place * 2, place)` and advance `place`.
    #[allow(clippy::cast_precision_loss)]
    pub fn tick(&mut self) {
        let place = self.place as f64;
        self.hist.fill(place * 2.0, place, FILL_WEIGHT);
        self.place = (self.place + FILL_STEP) % BINS;
    }

    #[must_use]
    pub fn histogram(&self) -> &Histogram2d {
        &self.hist
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<f32>> {
        Arc::new(self.hist.to_floats())
    }
}

impl Default for CanvasFeeder {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the canvas update task. It stops once the server is halted.
pub fn spawn_update_task(state: AppState) -> JoinHandle<()> {
    let period = state.config.update_interval;
    info!(period_ms = period.as_millis(), "canvas update configured");
    tokio::spawn(async move {
        let mut feeder = CanvasFeeder::new();
        let mut halt = state.halt.subscribe();
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the initial snapshot is already published.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    feeder.tick();
                    debug!(entries = feeder.histogram().entries(), "canvas updated");
                    state.canvas.send_replace(feeder.snapshot());
                }
                () = halted(&mut halt) => break,
            }
        }
        info!("canvas update stopped");
    })
}
