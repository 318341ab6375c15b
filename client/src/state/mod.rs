//! Reactive page state.

pub mod session_view;
