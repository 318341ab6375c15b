//! REST helpers for the page.
//!
//! Browser build: real HTTP calls via `gloo-net`. Native builds get `None`,
//! since the endpoints only exist behind the page's own origin.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;

/// Endpoint advertising the window title and size.
pub const WINDOW_ENDPOINT: &str = "/api/window";

/// Title used until the server says otherwise.
pub const DEFAULT_TITLE: &str = "webwindow";

/// Title and size the server wants the hosting window to have.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WindowGeometry {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl WindowGeometry {
    /// Page title; a blank title falls back to [`DEFAULT_TITLE`].
    #[must_use]
    pub fn page_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() { DEFAULT_TITLE } else { title }
    }
}

/// Fetch the window geometry from [`WINDOW_ENDPOINT`].
/// Returns `None` on any failure or outside the browser.
#[allow(clippy::unused_async)]
pub async fn fetch_window_geometry() -> Option<WindowGeometry> {
    #[cfg(feature = "csr")]
    {
        let resp = match gloo_net::http::Request::get(WINDOW_ENDPOINT).send().await {
            Ok(resp) => resp,
            Err(e) => {
                leptos::logging::warn!("window geometry request failed: {e}");
                return None;
            }
        };
        let status = resp.status();
        if !(200..300).contains(&status) {
            leptos::logging::warn!("window geometry request failed: {status}");
            return None;
        }
        match resp.json::<WindowGeometry>().await {
            Ok(geometry) => Some(geometry),
            Err(e) => {
                leptos::logging::warn!("window geometry unreadable: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}
