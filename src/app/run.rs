//! eframe::App implementation for NestviewApp.

use super::NestviewApp;
use crate::dialogs::prefs::render_settings_window;
use crate::widgets::actions::{ActionQueue, AppAction};
use crate::widgets::canvas::{self, CanvasPalette};

use eframe::egui;
use log::debug;

impl NestviewApp {
    /// Apply theme and font size, only when they changed.
    fn apply_style(&mut self, ctx: &egui::Context) {
        let wanted = (self.settings.font_size, self.settings.dark_mode);
        if self.applied_style == Some(wanted) {
            return;
        }

        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        let mut style = (*ctx.style()).clone();
        for (_, font_id) in style.text_styles.iter_mut() {
            font_id.size = self.settings.font_size;
        }
        ctx.set_style(style);

        self.applied_style = Some(wanted);
    }

    fn handle_keyboard_input(&self, ctx: &egui::Context) -> ActionQueue {
        let mut actions = ActionQueue::new();
        if ctx.wants_keyboard_input() {
            return actions;
        }

        ctx.input(|i| {
            if i.key_pressed(egui::Key::F1) {
                actions.send(AppAction::ToggleHelp);
            }
            if i.key_pressed(egui::Key::F5) {
                actions.send(AppAction::Reload);
            }
            if i.key_pressed(egui::Key::F12) {
                actions.send(AppAction::ToggleSettings);
            }
            if i.modifiers.command && i.key_pressed(egui::Key::O) {
                actions.send(AppAction::ShowOpenDialog);
            }
        });

        if ctx.input(|i| i.key_pressed(egui::Key::Home)) {
            self.reset_view();
        }
        actions
    }

    fn handle_actions(&mut self, actions: ActionQueue) {
        for action in actions.actions {
            debug!("Action: {:?}", action);
            match action {
                AppAction::Open(path) => self.load_path(&path),
                AppAction::ShowOpenDialog => self.open_dialog(),
                AppAction::Reload => self.reload(),
                AppAction::ToggleHelp => self.settings.show_help = !self.settings.show_help,
                AppAction::ToggleSettings => self.show_settings = !self.show_settings,
            }
        }
    }
}

impl eframe::App for NestviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_style(ctx);
        self.handle_dropped_files(ctx);

        let mut actions = self.handle_keyboard_input(ctx);

        let view_box = self.visualizer.as_ref().map(|v| v.view_box());
        actions.extend(self.status_bar.render(
            ctx,
            &self.source.label(),
            self.node_count(),
            view_box,
        ));

        let palette = CanvasPalette::from_visuals(&ctx.style().visuals);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                actions.extend(canvas::render(
                    ui,
                    self.visualizer.as_mut(),
                    &palette,
                    self.error_msg.as_deref(),
                    self.settings.show_help,
                ));
            });

        if self.show_settings {
            let before = self.settings.clone();
            render_settings_window(ctx, &mut self.show_settings, &mut self.settings);
            if self.settings.visualizer != before.visualizer
                || self.settings.font_size != before.font_size
            {
                self.apply_settings();
            }
        }

        self.handle_actions(actions);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(json) = serde_json::to_string(&self.settings) {
            storage.set_string(eframe::APP_KEY, json);
            debug!(
                "Settings saved: gap={}x{}, font={}",
                self.settings.visualizer.layout.gap_x,
                self.settings.visualizer.layout.gap_y,
                self.settings.font_size
            );
        }
    }
}
