//! Shared action queue for widgets that request app-level work.

use std::path::PathBuf;

/// Requests a widget hands back to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Load a JSON file from disk
    Open(PathBuf),
    /// Show the open-file dialog
    ShowOpenDialog,
    Reload,
    ToggleHelp,
    ToggleSettings,
}

/// Widget actions result
#[derive(Debug, Default)]
pub struct ActionQueue {
    pub hovered: bool,
    pub actions: Vec<AppAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, action: AppAction) {
        self.actions.push(action);
    }

    pub fn extend(&mut self, other: ActionQueue) {
        self.hovered |= other.hovered;
        self.actions.extend(other.actions);
    }
}
