//! Status bar: connection dot, last status line, diagnostic controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! The output element keeps the `rootapp_debug_output` id and the ping button
//! `root_ping_button`, which page scripts and tests look up.

#[cfg(test)]
#[path = "status_bar_test.rs"]
mod status_bar_test;

use leptos::prelude::*;

use crate::state::session_view::{ConnectionStatus, SessionView};

/// Status bar at the top of the page.
#[component]
pub fn StatusBar(on_ping: Callback<()>, on_halt: Callback<()>) -> impl IntoView {
    let view_state = expect_context::<RwSignal<SessionView>>();

    let status_class = move || connection_status_class(view_state.get().connection_status);
    let status_label = move || connection_status_label(view_state.get().connection_status);
    let output = move || view_state.get().output;
    let controls_disabled = move || view_state.get().connection_status != ConnectionStatus::Connected;

    let on_ping_click = move |_| on_ping.run(());
    let on_halt_click = move |_| on_halt.run(());

    view! {
        <div class="status-bar">
            <span class="status-bar__item">
                <span class=status_class></span>
                {status_label}
            </span>
            <span class="status-bar__divider"></span>
            <button
                id="root_ping_button"
                class="status-bar__help"
                on:click=on_ping_click
                disabled=controls_disabled
                title="Request a text or binary diagnostic from the server"
            >
                "[PING]"
            </button>
            <button
                class="status-bar__help status-bar__control"
                on:click=on_halt_click
                disabled=controls_disabled
                title="Stop the server"
            >
                "[HALT]"
            </button>
            <span class="status-bar__divider"></span>
            <pre id="rootapp_debug_output" class="status-bar__output">{output}</pre>
        </div>
    }
}

fn connection_status_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "status-bar__dot status-bar__dot--connected",
        ConnectionStatus::Connecting => "status-bar__dot status-bar__dot--connecting",
        ConnectionStatus::Disconnected => "status-bar__dot status-bar__dot--disconnected",
    }
}

fn connection_status_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "ONLINE",
        ConnectionStatus::Connecting => "CONNECTING",
        ConnectionStatus::Disconnected => "OFFLINE",
    }
}
