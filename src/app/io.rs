//! Document loading: files, stdin, the open dialog and dropped files.

use super::{NestviewApp, Source};
use crate::entities::Value;
use crate::widgets::file_dialogs::create_json_dialog;

use anyhow::{Context, Result};
use eframe::egui;
use log::{info, warn};
use std::path::{Path, PathBuf};

impl NestviewApp {
    /// Load `path` ("-" = stdin) and replace the diagram.
    ///
    /// Failures are shown in the UI; the previous diagram stays if the file
    /// could not be read or parsed.
    pub fn load_path(&mut self, path: &Path) {
        match self.try_load(path) {
            Ok(count) => {
                info!("Loaded {} ({} nodes)", path.display(), count);
                self.status_bar.set_message(format!("Loaded {}", self.source.label()));
            }
            Err(e) => self.report_error(format!("{:#}", e)),
        }
    }

    fn try_load(&mut self, path: &Path) -> Result<usize> {
        let value = Value::load(path)?;
        self.show_value(value, Source::from_path(path.to_path_buf()))
            .with_context(|| format!("Cannot show {}", path.display()))
    }

    /// Show a document that was already read from stdin.
    pub fn show_stdin(&mut self, value: Value) {
        match self.show_value(value, Source::Stdin) {
            Ok(count) => info!("Loaded stdin ({} nodes)", count),
            Err(e) => self.report_error(format!("{:#}", e)),
        }
    }

    /// Replace the diagram. The old one is gone even if the build fails.
    fn show_value(&mut self, value: Value, source: Source) -> Result<usize> {
        let vis = self
            .visualizer
            .as_mut()
            .context("No visualizer to show the document")?;

        self.source = source;
        if let Source::File(file) = &self.source {
            self.settings.last_file = Some(file.clone());
        }
        vis.update_data(value)?;

        self.error_msg = None;
        Ok(vis.node_count())
    }

    /// Re-read the current file (F5).
    pub fn reload(&mut self) {
        match self.source.clone() {
            Source::File(path) => self.load_path(&path),
            Source::Stdin => {
                warn!("Reload: stdin can only be read once");
                self.status_bar.set_message("Cannot reload stdin");
            }
            Source::Sample => self.status_bar.set_message("Nothing to reload"),
        }
    }

    /// Show the open-file dialog and load the selection.
    pub fn open_dialog(&mut self) {
        let start_dir = self
            .settings
            .last_file
            .as_ref()
            .and_then(|p| p.parent())
            .map(Path::to_path_buf);

        let mut dialog = create_json_dialog("Open JSON");
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.load_path(&path);
        }
    }

    /// Load the first file dropped onto the window this frame.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });

        if let Some(path) = pick_dropped(&dropped) {
            info!("File dropped: {}", path.display());
            self.load_path(&path);
        }
    }
}

/// First `.json` file, or the first file at all if none has that extension.
fn pick_dropped(paths: &[PathBuf]) -> Option<PathBuf> {
    paths
        .iter()
        .find(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .or_else(|| paths.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::prefs::AppSettings;
    use crate::paths::PathConfig;
    use std::io::Write;

    fn app() -> NestviewApp {
        NestviewApp::new(AppSettings::default(), PathConfig::default())
    }

    fn json_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_replaces_diagram() {
        let mut app = app();
        let file = json_file(r#"{"a": [1, 2]}"#);

        app.load_path(file.path());
        assert!(app.error_msg.is_none());
        assert_eq!(app.node_count(), 4);
        assert_eq!(app.source, Source::File(file.path().to_path_buf()));
        assert_eq!(app.settings.last_file.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_bad_json_keeps_previous_diagram() {
        let mut app = app();
        let before = app.node_count();
        let file = json_file("{ nope");

        app.load_path(file.path());
        let error = app.error_msg.clone().unwrap();
        assert!(error.contains("Invalid JSON"), "{}", error);
        assert_eq!(app.node_count(), before);
        assert_eq!(app.source, Source::Sample);
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let mut app = app();
        let file = json_file(r#"{"a": {}}"#);
        app.load_path(file.path());
        assert_eq!(app.node_count(), 2);

        std::fs::write(file.path(), r#"{"a": {}, "b": {}, "c": {}}"#).unwrap();
        app.reload();
        assert_eq!(app.node_count(), 4);
    }

    #[test]
    fn test_show_stdin() {
        let mut app = app();
        app.show_stdin(Value::from(serde_json::json!({"x": {"y": {}}})));
        assert_eq!(app.source, Source::Stdin);
        assert_eq!(app.node_count(), 3);

        // stdin cannot be re-read
        app.reload();
        assert_eq!(app.node_count(), 3);
        assert_eq!(app.status_bar.current_message, "Cannot reload stdin");
    }

    #[test]
    fn test_pick_dropped_prefers_json() {
        let paths = vec![PathBuf::from("notes.txt"), PathBuf::from("data.JSON")];
        assert_eq!(pick_dropped(&paths), Some(PathBuf::from("data.JSON")));
        assert_eq!(pick_dropped(&paths[..1]), Some(PathBuf::from("notes.txt")));
        assert_eq!(pick_dropped(&[]), None);
    }
}
