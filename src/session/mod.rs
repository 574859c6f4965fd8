//! Interactive editing session: state, input, undo, and the headless script driver.

/// Editor configuration.
pub mod config;
/// Session controller.
pub mod editor;
/// Snapshot undo stack.
pub mod history;
/// Input events and key bindings.
pub mod input;
/// Scripted collaborators for headless runs.
pub mod script;
