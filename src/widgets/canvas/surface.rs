//! egui-backed drawing surface.
//!
//! The panel rect is handed in every frame; the intrinsic size only changes
//! when the visualizer calls `resize()` in response to `CanvasEvent::Resize`.

use eframe::egui;
use log::trace;

use crate::core::{CardLayer, Surface, ViewBox};

#[derive(Debug, Clone)]
pub struct SceneSurface {
    /// Panel rect reported by the last frame
    available: egui::Rect,
    /// Rect the intrinsic size was last computed from
    rect: egui::Rect,
    view_box: Option<ViewBox>,
    view_box_attr: String,
    cards: CardLayer,
}

impl SceneSurface {
    pub fn new(initial: egui::Rect) -> Self {
        Self {
            available: initial,
            rect: initial,
            view_box: None,
            view_box_attr: String::new(),
            cards: CardLayer::new(),
        }
    }

    /// Record this frame's panel rect. Returns true if the size changed and
    /// a resize should be requested.
    pub fn set_available_rect(&mut self, rect: egui::Rect) -> bool {
        self.available = rect;
        if rect.size().floor() == self.rect.size() {
            // Moves alone don't change the intrinsic size
            self.rect = egui::Rect::from_min_size(rect.min, self.rect.size());
            return false;
        }
        true
    }

    /// Screen rect the scene is drawn into.
    pub fn rect(&self) -> egui::Rect {
        self.rect
    }

    /// Last published view box, if any.
    pub fn view_box(&self) -> Option<ViewBox> {
        self.view_box
    }
}

impl Surface for SceneSurface {
    fn resize(&mut self) {
        self.rect = egui::Rect::from_min_size(self.available.min, self.available.size().floor());
        trace!("Surface resized to {:?}", self.rect.size());
    }

    fn intrinsic_size(&self) -> egui::Vec2 {
        self.rect.size()
    }

    fn pointer_position(&self, raw: egui::Pos2) -> egui::Pos2 {
        raw - self.rect.min.to_vec2()
    }

    fn set_view_box(&mut self, view_box: ViewBox) {
        self.view_box = Some(view_box);
        self.view_box_attr = view_box.to_string();
    }

    fn view_box_attr(&self) -> &str {
        &self.view_box_attr
    }

    fn cards(&self) -> Option<&CardLayer> {
        Some(&self.cards)
    }

    fn cards_mut(&mut self) -> Option<&mut CardLayer> {
        Some(&mut self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(w, h))
    }

    #[test]
    fn test_size_only_changes_on_resize() {
        let mut surface = SceneSurface::new(rect(0.0, 0.0, 800.0, 600.0));
        assert!(surface.set_available_rect(rect(0.0, 0.0, 1024.5, 700.0)));
        assert_eq!(surface.intrinsic_size(), egui::vec2(800.0, 600.0));

        surface.resize();
        assert_eq!(surface.intrinsic_size(), egui::vec2(1024.0, 700.0));
    }

    #[test]
    fn test_fractional_panel_requests_one_resize() {
        let mut surface = SceneSurface::new(rect(0.0, 0.0, 800.0, 600.0));
        let panel = rect(0.0, 0.0, 1024.5, 700.25);
        let mut requests = 0;
        for _ in 0..5 {
            if surface.set_available_rect(panel) {
                requests += 1;
                surface.resize();
            }
        }
        assert_eq!(requests, 1);
        assert_eq!(surface.intrinsic_size(), egui::vec2(1024.0, 700.0));

        // Moving the fractional panel keeps the floored size
        assert!(!surface.set_available_rect(rect(10.0, 0.0, 1024.5, 700.25)));
        assert_eq!(surface.rect(), rect(10.0, 0.0, 1024.0, 700.0));
    }

    #[test]
    fn test_move_updates_pointer_mapping() {
        let mut surface = SceneSurface::new(rect(0.0, 0.0, 800.0, 600.0));
        assert!(!surface.set_available_rect(rect(20.0, 30.0, 800.0, 600.0)));
        assert_eq!(surface.pointer_position(egui::pos2(25.0, 40.0)), egui::pos2(5.0, 10.0));
    }

    #[test]
    fn test_published_view_box() {
        let mut surface = SceneSurface::new(rect(0.0, 0.0, 800.0, 600.0));
        assert!(surface.view_box().is_none());
        surface.set_view_box(ViewBox { x: -5.0, y: 0.0, w: 300.0, h: 300.5 });
        assert_eq!(surface.view_box_attr(), "-5 0 300 300.5");
        assert!(surface.cards().is_some());
    }
}
