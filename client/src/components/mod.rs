//! Page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared `SessionView` from context and forward user
//! actions to the session through callbacks supplied by the app root.

pub mod canvas_panel;
pub mod status_bar;
