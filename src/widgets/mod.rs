//! UI Widgets - canvas, status bar and shared helpers
//!
//! Widgets never mutate app state directly; they return an `ActionQueue`.

pub mod actions;
pub mod canvas;
pub mod file_dialogs;
pub mod status;
