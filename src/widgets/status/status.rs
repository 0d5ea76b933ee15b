use crate::core::ViewBox;
use crate::widgets::actions::{ActionQueue, AppAction};
use eframe::egui;

/// Status bar component
#[derive(Debug, Default)]
pub struct StatusBar {
    pub current_message: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.current_message = message.into();
    }

    pub fn clear_message(&mut self) {
        self.current_message.clear();
    }

    /// Render status bar at bottom of screen
    pub fn render(
        &self,
        ctx: &egui::Context,
        source: &str,
        node_count: usize,
        view_box: Option<ViewBox>,
    ) -> ActionQueue {
        let mut actions = ActionQueue::new();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.small_button("Open").clicked() {
                    actions.send(AppAction::ShowOpenDialog);
                }
                if ui.small_button("Reload").clicked() {
                    actions.send(AppAction::Reload);
                }

                ui.separator();
                ui.monospace(source);

                ui.separator();
                ui.monospace(format!("{:>5} nodes", node_count));

                ui.separator();
                match view_box {
                    Some(vb) => ui.monospace(format!("view {}", Self::format_view_box(vb))),
                    None => ui.monospace("view ---"),
                };

                if !self.current_message.is_empty() {
                    ui.separator();
                    ui.monospace(&self.current_message);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Settings").clicked() {
                        actions.send(AppAction::ToggleSettings);
                    }
                    if ui.small_button("Help").clicked() {
                        actions.send(AppAction::ToggleHelp);
                    }
                });
            });
        });

        actions
    }

    fn format_view_box(vb: ViewBox) -> String {
        format!("{:.0} {:.0} {:.0}x{:.0}", vb.x, vb.y, vb.w, vb.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_view_box_rounds() {
        let vb = ViewBox { x: -12.4, y: 3.6, w: 800.0, h: 600.2 };
        assert_eq!(StatusBar::format_view_box(vb), "-12 4 800x600");
    }

    #[test]
    fn test_message() {
        let mut bar = StatusBar::new();
        bar.set_message("Loaded");
        assert_eq!(bar.current_message, "Loaded");
        bar.clear_message();
        assert!(bar.current_message.is_empty());
    }
}
