//! Root application component.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::{canvas_panel::CanvasPanel, status_bar::StatusBar};
use crate::net::api::DEFAULT_TITLE;
use crate::state::session_view::SessionView;

/// Root application component.
///
/// Provides the session view context and, in the browser build, starts the
/// session whose status and canvas output it renders and applies the
/// server's window title and size.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let view_state = RwSignal::new(SessionView::default());
    provide_context(view_state);

    let page_title = RwSignal::new(DEFAULT_TITLE.to_owned());
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        if let Some(geometry) = crate::net::api::fetch_window_geometry().await {
            page_title.set(geometry.page_title().to_owned());
            crate::net::browser::BrowserWindow.apply_geometry(&geometry);
        }
    });

    #[cfg(feature = "csr")]
    let session = StoredValue::new_local(crate::net::socket::spawn_session(view_state));

    let on_ping = Callback::new(move |()| {
        #[cfg(feature = "csr")]
        session.with_value(|s| {
            if let Some(request) = s.borrow_mut().send_diagnostic_ping() {
                leptos::logging::log!("sent {request}");
            }
        });
    });
    let on_halt = Callback::new(move |()| {
        #[cfg(feature = "csr")]
        session.with_value(|s| {
            s.borrow().request_halt();
        });
    });

    view! {
        <Title text=move || page_title.get()/>
        <main class="webwindow">
            <StatusBar on_ping=on_ping on_halt=on_halt/>
            <CanvasPanel/>
        </main>
    }
}
