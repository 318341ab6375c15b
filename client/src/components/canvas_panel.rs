//! Canvas panel fed by the session's rendering channel.

use leptos::prelude::*;

use crate::state::session_view::SessionView;

/// Shows what the bound channel has delivered so far.
#[component]
pub fn CanvasPanel() -> impl IntoView {
    let view_state = expect_context::<RwSignal<SessionView>>();

    let summary = move || view_state.get().canvas.summary();
    let last_error = move || view_state.get().canvas.last_error;
    let last_text = move || view_state.get().canvas.last_text;

    view! {
        <section id="rootapp_canvas" class="canvas-panel">
            <div class="canvas-panel__summary">{summary}</div>
            {move || last_text().map(|text| view! { <div class="canvas-panel__text">{text}</div> })}
            {move || last_error().map(|err| view! { <div class="canvas-panel__error">{err}</div> })}
        </section>
    }
}
