//! DOM-backed sinks for the browser build.

use frames::{ChannelId, Payload};
use leptos::prelude::{RwSignal, Update};

use crate::net::api::WindowGeometry;
use crate::net::channel::Channel;
use crate::net::sinks::{HostView, RenderSink, StatusSink};
use crate::state::session_view::SessionView;

/// Writes status lines and canvas frames into the page's [`SessionView`].
#[derive(Clone, Copy)]
pub struct ViewSink(pub RwSignal<SessionView>);

impl StatusSink for ViewSink {
    fn display(&self, text: &str) {
        self.0.update(|v| v.output = text.to_owned());
    }
}

impl RenderSink for ViewSink {
    fn bind_channel(&self, channel: Channel) {
        self.0.update(|v| v.canvas.bind(channel.id()));
    }

    fn render(&self, channel: ChannelId, payload: &Payload) {
        self.0.update(|v| v.canvas.apply(channel, payload));
    }
}

/// The browser window hosting the page.
#[derive(Clone, Copy)]
pub struct BrowserWindow;

impl BrowserWindow {
    /// Resize to the server's geometry. Browsers only honor this for windows
    /// opened by script; elsewhere it is a logged no-op.
    pub fn apply_geometry(self, geometry: &WindowGeometry) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (Ok(width), Ok(height)) = (i32::try_from(geometry.width), i32::try_from(geometry.height)) else {
            leptos::logging::warn!("window size {}x{} out of range", geometry.width, geometry.height);
            return;
        };
        if let Err(e) = window.resize_to(width, height) {
            leptos::logging::warn!("window resize refused: {e:?}");
        }
    }
}

impl HostView for BrowserWindow {
    fn close(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.close() {
            leptos::logging::warn!("window close refused: {e:?}");
        }
    }
}
