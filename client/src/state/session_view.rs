//! Page-level projection of the session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session writes into this model through its status and render sinks;
//! components read it reactively. The canvas feed decodes channel frames
//! itself, since the session forwards them raw.

#[cfg(test)]
#[path = "session_view_test.rs"]
mod session_view_test;

use frames::{ChannelId, Payload, decode_f32_le};

/// Websocket connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Socket closed or not yet opened.
    #[default]
    Disconnected,
    /// Socket created, handshake in progress.
    Connecting,
    /// Socket open and the rendering channel announced.
    Connected,
}

/// Everything the page shows about the session.
#[derive(Clone, Debug, Default)]
pub struct SessionView {
    pub connection_status: ConnectionStatus,
    /// Last status line; each display replaces the previous one.
    pub output: String,
    pub canvas: CanvasFeed,
}

/// State of the rendering surface fed by the bound channel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasFeed {
    /// Channel bound to the surface, once announced.
    pub channel: Option<ChannelId>,
    /// Binary frames accepted so far.
    pub frames: u64,
    /// Latest histogram snapshot.
    pub snapshot: Option<HistogramSnapshot>,
    /// Latest text frame received on the channel.
    pub last_text: Option<String>,
    /// Why the latest binary frame was rejected, if it was.
    pub last_error: Option<String>,
}

/// A 2D histogram as streamed by the server: `[nx, ny, bins...]`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramSnapshot {
    pub nx: usize,
    pub ny: usize,
    pub bins: Vec<f32>,
}

impl HistogramSnapshot {
    /// Parse a decoded float array. `None` when the shape header is missing
    /// or disagrees with the number of bins.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_floats(values: &[f32]) -> Option<Self> {
        let [nx, ny, bins @ ..] = values else {
            return None;
        };
        if !(nx.is_finite() && ny.is_finite()) || *nx < 0.0 || *ny < 0.0 {
            return None;
        }
        let (nx, ny) = (*nx as usize, *ny as usize);
        if nx.checked_mul(ny)? != bins.len() {
            return None;
        }
        Some(Self { nx, ny, bins: bins.to_vec() })
    }

    /// Sum of all bin contents.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.bins.iter().sum()
    }

    /// `(x, y, content)` of the fullest bin.
    #[must_use]
    pub fn peak(&self) -> Option<(usize, usize, f32)> {
        if self.nx == 0 {
            return None;
        }
        self.bins
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, v)| (i % self.nx, i / self.nx, *v))
    }
}

impl CanvasFeed {
    pub fn bind(&mut self, channel: ChannelId) {
        *self = Self { channel: Some(channel), ..Self::default() };
    }

    /// Consume one channel frame. Frames for any other channel, and empty
    /// frames, are ignored.
    pub fn apply(&mut self, channel: ChannelId, payload: &Payload) {
        if self.channel != Some(channel) || payload.is_empty() {
            return;
        }
        match payload {
            Payload::Text(text) => self.last_text = Some(text.clone()),
            Payload::Binary { data, offset } => {
                let snapshot = decode_f32_le(data, *offset)
                    .map_err(|e| e.to_string())
                    .and_then(|values| {
                        HistogramSnapshot::from_floats(&values)
                            .ok_or_else(|| format!("{} values do not form a histogram", values.len()))
                    });
                match snapshot {
                    Ok(snapshot) => {
                        self.frames += 1;
                        self.snapshot = Some(snapshot);
                        self.last_error = None;
                    }
                    Err(err) => self.last_error = Some(err),
                }
            }
        }
    }

    /// One-line description for the canvas panel.
    #[must_use]
    pub fn summary(&self) -> String {
        let Some(channel) = self.channel else {
            return "no channel".to_owned();
        };
        match &self.snapshot {
            Some(snap) => match snap.peak() {
                Some((x, y, v)) => format!(
                    "channel {channel}: {} frames, {}x{} bins, total {}, peak {v} at ({x}, {y})",
                    self.frames,
                    snap.nx,
                    snap.ny,
                    snap.total()
                ),
                None => format!("channel {channel}: {} frames, empty histogram", self.frames),
            },
            None => format!("channel {channel}: waiting for data"),
        }
    }
}
