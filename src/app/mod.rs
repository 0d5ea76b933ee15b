//! Application module - NestviewApp and related functionality.
//!
//! - `io` - loading JSON from files, stdin, dialogs and drops
//! - `run` - eframe::App implementation (frame loop, hotkeys, persistence)

mod io;
mod run;

use crate::core::{CanvasEvent, EventBus, Visualizer};
use crate::dialogs::prefs::AppSettings;
use crate::entities::{CardMetrics, Value};
use crate::paths::PathConfig;
use crate::widgets::canvas::SceneSurface;
use crate::widgets::status::StatusBar;

use eframe::egui;
use log::{error, info};
use std::path::PathBuf;

/// Document shown when nothing was loaded
const SAMPLE_JSON: &str = r#"{
  "name": "nestview",
  "hint": "Ctrl+O or drop a .json file",
  "canvas": { "pan": "drag", "zoom": "wheel", "reset": "Home" },
  "keys": ["F1", "F5", "F12"]
}"#;

/// Where the current document came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Sample,
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn label(&self) -> String {
        match self {
            Source::Sample => "<sample>".to_string(),
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    fn from_path(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Source::Stdin
        } else {
            Source::File(path)
        }
    }
}

/// Main application state.
pub struct NestviewApp {
    pub settings: AppSettings,
    pub visualizer: Option<Visualizer<SceneSurface>>,
    pub source: Source,
    pub error_msg: Option<String>,
    pub show_settings: bool,
    pub status_bar: StatusBar,
    pub path_config: PathConfig,
    /// Font size / theme last pushed to egui, to avoid restyling every frame
    applied_style: Option<(f32, bool)>,
}

impl NestviewApp {
    /// Create the app with the built-in sample document.
    pub fn new(settings: AppSettings, path_config: PathConfig) -> Self {
        let data = Value::from_json_str(SAMPLE_JSON).unwrap_or_default();
        let surface = SceneSurface::new(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(800.0, 600.0),
        ));

        let visualizer = match Visualizer::new(
            surface,
            data,
            settings.visualizer,
            CardMetrics::for_font_size(settings.font_size),
            EventBus::new(),
        ) {
            Ok(vis) => Some(vis),
            Err(e) => {
                error!("Failed to create visualizer: {}", e);
                None
            }
        };

        info!("App created: {} nodes", visualizer.as_ref().map_or(0, |v| v.node_count()));

        Self {
            settings,
            visualizer,
            source: Source::Sample,
            error_msg: None,
            show_settings: false,
            status_bar: StatusBar::new(),
            path_config,
            applied_style: None,
        }
    }

    pub fn node_count(&self) -> usize {
        self.visualizer.as_ref().map_or(0, |v| v.node_count())
    }

    pub fn reset_view(&self) {
        if let Some(vis) = &self.visualizer {
            vis.emitter().emit(CanvasEvent::ResetView);
        }
    }

    /// Push edited settings into the visualizer (rebuilds when layout or
    /// card metrics changed).
    pub fn apply_settings(&mut self) {
        let Some(vis) = self.visualizer.as_mut() else {
            return;
        };

        let metrics = CardMetrics::for_font_size(self.settings.font_size);
        let result = vis
            .set_config(self.settings.visualizer)
            .and_then(|_| vis.set_metrics(metrics));

        match result {
            Ok(()) => {
                if self.error_msg.take().is_some() {
                    self.status_bar.clear_message();
                }
            }
            Err(e) => self.report_error(format!("Rebuild failed: {}", e)),
        }
    }

    fn report_error(&mut self, message: String) {
        error!("{}", message);
        self.status_bar.set_message("Error");
        self.error_msg = Some(message);
    }
}
