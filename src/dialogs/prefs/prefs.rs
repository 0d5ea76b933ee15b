use eframe::egui;
use egui_ltreeview::TreeView;
use std::path::PathBuf;

use crate::core::layout::{DEFAULT_GAP_X, DEFAULT_GAP_Y};
use crate::core::viewport::DEFAULT_MIN_DIMENSION;
use crate::core::VisualizerConfig;

/// Settings categories
#[derive(Debug, Clone, Copy, PartialEq)]
enum SettingsCategory {
    Layout,
    Viewport,
    UI,
}

impl SettingsCategory {
    const ALL: [SettingsCategory; 3] = [
        SettingsCategory::Layout,
        SettingsCategory::Viewport,
        SettingsCategory::UI,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            SettingsCategory::Layout => "Layout",
            SettingsCategory::Viewport => "Viewport",
            SettingsCategory::UI => "UI",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "Layout" => Some(SettingsCategory::Layout),
            "Viewport" => Some(SettingsCategory::Viewport),
            "UI" => Some(SettingsCategory::UI),
            _ => None,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AppSettings {
    // Diagram
    pub visualizer: VisualizerConfig,

    // UI
    pub font_size: f32,
    pub dark_mode: bool,
    pub show_help: bool,

    // Internal
    pub selected_settings_category: Option<String>,
    /// Last file opened from disk, reopened on launch when no FILE is given
    pub last_file: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            visualizer: VisualizerConfig::default(),
            font_size: 12.0,
            dark_mode: true,
            show_help: true,
            selected_settings_category: Some("Layout".to_string()),
            last_file: None,
        }
    }
}

fn render_layout_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    let layout = &mut settings.visualizer.layout;

    ui.heading("Spacing");
    ui.add_space(8.0);

    ui.label("Horizontal gap (parent to child):");
    ui.add(
        egui::Slider::new(&mut layout.gap_x, 10.0..=400.0)
            .suffix(" px")
            .step_by(5.0),
    );
    ui.add_space(8.0);

    ui.label("Vertical gap (between siblings):");
    ui.add(
        egui::Slider::new(&mut layout.gap_y, 0.0..=200.0)
            .suffix(" px")
            .step_by(5.0),
    );
    ui.add_space(8.0);

    if ui.small_button("Reset spacing").clicked() {
        layout.gap_x = DEFAULT_GAP_X;
        layout.gap_y = DEFAULT_GAP_Y;
    }

    ui.add_space(16.0);
    ui.heading("Root");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label("Origin X:");
        ui.add(egui::DragValue::new(&mut layout.origin[0]).speed(1.0));
        ui.label("Y:");
        ui.add(egui::DragValue::new(&mut layout.origin[1]).speed(1.0));
    });

    ui.add_space(16.0);
    ui.heading("Limits");
    ui.add_space(8.0);

    ui.label("Maximum nesting depth:");
    ui.add(egui::DragValue::new(&mut layout.max_depth).range(1..=4096));
    ui.label("Deeper input is rejected instead of drawn.");
}

fn render_viewport_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Zoom");
    ui.add_space(8.0);

    ui.label("Minimum view size:");
    ui.add(
        egui::Slider::new(&mut settings.visualizer.min_dimension, 50.0..=2000.0)
            .suffix(" px")
            .step_by(10.0),
    );
    ui.label("Zooming in stops once the visible width or height reaches this size.");

    ui.add_space(8.0);
    if ui.small_button("Reset").clicked() {
        settings.visualizer.min_dimension = DEFAULT_MIN_DIMENSION;
    }
}

fn render_ui_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Appearance");
    ui.add_space(8.0);

    ui.label("Font Size:");
    ui.add(
        egui::Slider::new(&mut settings.font_size, 8.0..=24.0)
            .suffix(" px")
            .step_by(0.5),
    );
    ui.label("Also sets the card text size.");
    ui.add_space(16.0);

    ui.checkbox(&mut settings.dark_mode, "Dark Mode");
    ui.checkbox(&mut settings.show_help, "Show help overlay");
}

/// Render settings window
pub fn render_settings_window(
    ctx: &egui::Context,
    show_settings: &mut bool,
    settings: &mut AppSettings,
) {
    let mut selected = settings
        .selected_settings_category
        .as_ref()
        .and_then(|s| SettingsCategory::from_str(s))
        .unwrap_or(SettingsCategory::Layout);

    egui::Window::new("Settings")
        .id(egui::Id::new("settings_window"))
        .open(show_settings)
        .default_size([600.0, 400.0])
        .min_size([450.0, 300.0])
        .resizable(true)
        .collapsible(false)
        .show(ctx, |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        // Left panel: category tree
                        ui.vertical(|ui| {
                            ui.set_width(160.0);
                            ui.add_space(4.0);

                            let tree_id = ui.make_persistent_id("settings_tree_view");
                            let (_response, actions) = TreeView::new(tree_id).show(ui, |builder| {
                                for (i, category) in SettingsCategory::ALL.iter().enumerate() {
                                    builder.leaf(i, category.as_str());
                                }
                            });

                            for action in actions {
                                if let egui_ltreeview::Action::SetSelected(node_ids) = action
                                    && let Some(&node_id) = node_ids.first()
                                    && let Some(&category) = SettingsCategory::ALL.get(node_id)
                                {
                                    selected = category;
                                }
                            }
                        });

                        ui.separator();

                        ui.vertical(|ui| {
                            ui.add_space(8.0);

                            match selected {
                                SettingsCategory::Layout => render_layout_settings(ui, settings),
                                SettingsCategory::Viewport => render_viewport_settings(ui, settings),
                                SettingsCategory::UI => render_ui_settings(ui, settings),
                            }
                        });
                    });
                });
        });

    settings.selected_settings_category = Some(selected.as_str().to_string());
}
