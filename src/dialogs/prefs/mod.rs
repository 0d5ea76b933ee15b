//! Preferences window (F12) and persisted application settings.

#[allow(clippy::module_inception)]
mod prefs;

pub use prefs::{AppSettings, render_settings_window};
