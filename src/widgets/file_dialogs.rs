//! Shared file dialog helpers for widget UI.

/// Create configured file dialog for JSON selection.
pub fn create_json_dialog(title: &str) -> rfd::FileDialog {
    rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .add_filter("All Files", &["*"])
        .set_title(title)
}
