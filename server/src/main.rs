mod canvas;
mod config;
mod routes;
mod state;

use tokio::net::TcpListener;

use crate::state::{AppState, halted};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        // Missing .env is normal; anything else is worth a line.
        if !e.not_found() {
            eprintln!("failed to read .env: {e}");
        }
    }
    tracing_subscriber::fmt::init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration rejected");
            std::process::exit(1);
        }
    };
    let port = config.port;
    tracing::info!(site_dir = %config.site_dir.display(), title = %config.window.title, "configuration loaded");

    let state = AppState::new(config);

    // Spawn background canvas updates.
    let updates = canvas::spawn_update_task(state.clone());

    let app = routes::app(state.clone());
    let listener = match TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%port, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%port, "webwindow listening");
    let shutdown = shutdown_signal(state);
    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown).await {
        tracing::error!(error = %e, "server failed");
    }

    if let Err(e) = updates.await {
        tracing::warn!(error = %e, "canvas task ended abnormally");
    }
    tracing::info!("webwindow stopped");
}

/// Resolve when a client sends `halt` or the process gets Ctrl-C.
async fn shutdown_signal(state: AppState) {
    let mut halt = state.halt.subscribe();
    tokio::select! {
        () = halted(&mut halt) => tracing::info!("halt requested by client"),
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!(error = %e, "ctrl-c handler failed");
            }
            tracing::info!("interrupt received");
            state.request_halt();
        }
    }
}
