//! Canvas input events.
//!
//! Pointer positions are raw (screen) positions; the visualizer maps them
//! through its surface before they reach the viewport controller.

use eframe::egui;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CanvasEvent {
    PointerDown(egui::Pos2),
    PointerMove(egui::Pos2),
    PointerUp,
    /// Wheel delta with DOM sign convention: positive = scroll down = zoom out.
    Wheel { delta_y: f32 },
    /// The surface's available area may have changed.
    Resize,
    /// Restore the view box the visualizer started with.
    ResetView,
}
