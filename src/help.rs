//! Keyboard and mouse help overlay (F1).

use eframe::egui;

/// One binding shown in the overlay: (input, what it does)
pub type HelpEntry = (&'static str, &'static str);

/// Titled group of bindings
pub struct HelpSection {
    pub title: &'static str,
    pub entries: &'static [HelpEntry],
}

pub const CANVAS_HELP: HelpSection = HelpSection {
    title: "Canvas",
    entries: &[
        ("Drag", "Pan"),
        ("Mouse Wheel", "Zoom (grow / shrink view)"),
        ("Home", "Reset view"),
        ("Double-click", "Open JSON file"),
    ],
};

pub const GLOBAL_HELP: HelpSection = HelpSection {
    title: "Global",
    entries: &[
        ("F1", "Toggle help"),
        ("F5", "Reload current file"),
        ("F12", "Toggle Preferences"),
        ("Ctrl+O", "Open JSON file"),
        ("Drop file", "Open dropped JSON file"),
    ],
};

/// Sections in overlay order.
pub fn help_sections() -> [&'static HelpSection; 2] {
    [&CANVAS_HELP, &GLOBAL_HELP]
}

/// Draw the overlay as a single two-column grid, one titled block per section.
pub fn render_help_overlay(ui: &mut egui::Ui) {
    let key_color = egui::Color32::from_rgb(255, 200, 100);
    let text_color = egui::Color32::from_white_alpha(200);

    egui::Frame::popup(ui.style())
        .fill(egui::Color32::from_black_alpha(180))
        .show(ui, |ui| {
            egui::Grid::new("help_grid")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for (i, section) in help_sections().iter().enumerate() {
                        if i > 0 {
                            ui.end_row();
                        }
                        ui.label(egui::RichText::new(section.title).strong().color(egui::Color32::GRAY));
                        ui.end_row();
                        for (key, desc) in section.entries {
                            ui.label(egui::RichText::new(*key).monospace().color(key_color));
                            ui.label(egui::RichText::new(*desc).color(text_color));
                            ui.end_row();
                        }
                    }
                });
        });
}
