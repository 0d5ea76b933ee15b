//! Viewport controller - pan by drag, zoom by wheel.
//!
//! The visible scene rectangle (`ViewBox`) maps onto the surface the way an
//! SVG viewBox does: uniform scale, centered ("xMidYMid meet").
//!
//! Drag state machine: `Idle -> Dragging -> Idle`. Panning is pointer-inverse
//! (dragging right moves the window left). Zoom grows or shrinks the
//! rectangle from its top-left corner; both axes move together and never go
//! below the minimum dimension.

use eframe::egui;
use log::{debug, info, trace};

/// Smallest width/height the view box may shrink to
pub const DEFAULT_MIN_DIMENSION: f32 = 300.0;

/// Visible scene rectangle.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ViewBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl std::fmt::Display for ViewBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.w, self.h)
    }
}

impl ViewBox {
    pub fn origin(&self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }

    /// Scene rectangle covered by the view box.
    pub fn scene_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(self.origin(), egui::vec2(self.w, self.h))
    }

    /// Scene-to-screen scale when drawn into `screen`.
    pub fn scale(&self, screen: egui::Rect) -> f32 {
        if self.w <= 0.0 || self.h <= 0.0 {
            return 1.0;
        }
        (screen.width() / self.w).min(screen.height() / self.h)
    }

    /// Screen position of the view box's top-left corner (content is centered).
    fn screen_offset(&self, screen: egui::Rect) -> egui::Pos2 {
        let scale = self.scale(screen);
        let used = egui::vec2(self.w, self.h) * scale;
        screen.min + (screen.size() - used) * 0.5
    }

    pub fn scene_to_screen(&self, scene: egui::Pos2, screen: egui::Rect) -> egui::Pos2 {
        self.screen_offset(screen) + (scene - self.origin()) * self.scale(screen)
    }

    pub fn screen_to_scene(&self, pos: egui::Pos2, screen: egui::Rect) -> egui::Pos2 {
        self.origin() + (pos - self.screen_offset(screen)) / self.scale(screen)
    }

    pub fn scene_rect_to_screen(&self, rect: egui::Rect, screen: egui::Rect) -> egui::Rect {
        egui::Rect::from_min_max(
            self.scene_to_screen(rect.min, screen),
            self.scene_to_screen(rect.max, screen),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// View box origin when the drag started
        drag_from_offset: egui::Pos2,
        /// Pointer position when the drag started
        mouse_down_from: egui::Pos2,
    },
}

/// Owns the view box and the transient drag state.
#[derive(Debug, Clone)]
pub struct ViewportController {
    view_box: ViewBox,
    initial: ViewBox,
    drag: DragState,
    min_dimension: f32,
    intrinsic: egui::Vec2,
}

impl ViewportController {
    /// Seed the view box from the surface's intrinsic size.
    pub fn new(intrinsic: egui::Vec2, min_dimension: f32) -> Self {
        let view_box = ViewBox {
            x: 0.0,
            y: 0.0,
            w: intrinsic.x.max(min_dimension),
            h: intrinsic.y.max(min_dimension),
        };
        debug!("Viewport initialized: {}", view_box);
        Self {
            view_box,
            initial: view_box,
            drag: DragState::Idle,
            min_dimension,
            intrinsic,
        }
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn min_dimension(&self) -> f32 {
        self.min_dimension
    }

    /// Change the minimum dimension and re-clamp the current view box.
    pub fn set_min_dimension(&mut self, min_dimension: f32) {
        self.min_dimension = min_dimension;
        self.view_box.w = self.view_box.w.max(min_dimension);
        self.view_box.h = self.view_box.h.max(min_dimension);
    }

    pub fn pointer_down(&mut self, pos: egui::Pos2) {
        self.drag = DragState::Dragging {
            drag_from_offset: self.view_box.origin(),
            mouse_down_from: pos,
        };
        trace!("Drag start at ({:.1}, {:.1})", pos.x, pos.y);
    }

    /// Pan while dragging. Returns false when idle (nothing changed).
    pub fn pointer_move(&mut self, pos: egui::Pos2) -> bool {
        let DragState::Dragging {
            drag_from_offset,
            mouse_down_from,
        } = self.drag
        else {
            return false;
        };

        self.view_box.x = drag_from_offset.x - (pos.x - mouse_down_from.x);
        self.view_box.y = drag_from_offset.y - (pos.y - mouse_down_from.y);
        trace!("Pan: ({:.1}, {:.1})", self.view_box.x, self.view_box.y);
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Corner-anchored zoom: grow (positive delta) or shrink both axes.
    pub fn wheel(&mut self, delta_y: f32) {
        self.view_box.w = (self.view_box.w + delta_y).max(self.min_dimension);
        self.view_box.h = (self.view_box.h + delta_y).max(self.min_dimension);
        debug!("Zoom: {:.1} x {:.1}", self.view_box.w, self.view_box.h);
    }

    /// Resync with a new intrinsic surface size.
    ///
    /// Position is kept. If the size changed, width/height take the new
    /// size (clamped) and the reset target follows it. Returns whether the
    /// size changed.
    pub fn resize(&mut self, intrinsic: egui::Vec2) -> bool {
        if intrinsic == self.intrinsic {
            return false;
        }
        let old = self.intrinsic;
        self.intrinsic = intrinsic;

        self.view_box.w = intrinsic.x.max(self.min_dimension);
        self.view_box.h = intrinsic.y.max(self.min_dimension);
        self.initial = ViewBox {
            x: 0.0,
            y: 0.0,
            w: self.view_box.w,
            h: self.view_box.h,
        };
        debug!(
            "Surface resized {:?} -> {:?}, view box {}",
            old, intrinsic, self.view_box
        );
        true
    }

    /// Restore the unpanned, unzoomed view box for the current surface size.
    pub fn reset(&mut self) {
        info!("Viewport reset");
        self.view_box = self.initial;
        self.view_box.w = self.view_box.w.max(self.min_dimension);
        self.view_box.h = self.view_box.h.max(self.min_dimension);
        self.drag = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ViewportController {
        ViewportController::new(egui::vec2(800.0, 600.0), DEFAULT_MIN_DIMENSION)
    }

    #[test]
    fn test_initial_view_box_from_intrinsic_size() {
        let vp = controller();
        assert_eq!(vp.view_box(), ViewBox { x: 0.0, y: 0.0, w: 800.0, h: 600.0 });
        assert_eq!(vp.view_box().to_string(), "0 0 800 600");
    }

    #[test]
    fn test_small_surface_is_clamped() {
        let vp = ViewportController::new(egui::vec2(100.0, 50.0), DEFAULT_MIN_DIMENSION);
        assert_eq!(vp.view_box().w, 300.0);
        assert_eq!(vp.view_box().h, 300.0);
    }

    #[test]
    fn test_pan_is_pointer_inverse() {
        let mut vp = controller();
        vp.pointer_down(egui::pos2(100.0, 100.0));
        assert!(vp.is_dragging());

        assert!(vp.pointer_move(egui::pos2(130.0, 80.0)));
        assert_eq!(vp.view_box().origin(), egui::pos2(-30.0, 20.0));

        // Deltas are measured from the press point, not accumulated
        assert!(vp.pointer_move(egui::pos2(110.0, 110.0)));
        assert_eq!(vp.view_box().origin(), egui::pos2(-10.0, -10.0));

        vp.pointer_up();
        assert!(!vp.is_dragging());
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut vp = controller();
        assert!(!vp.pointer_move(egui::pos2(500.0, 500.0)));
        assert_eq!(vp.view_box().origin(), egui::Pos2::ZERO);
    }

    #[test]
    fn test_second_drag_starts_from_current_offset() {
        let mut vp = controller();
        vp.pointer_down(egui::pos2(0.0, 0.0));
        vp.pointer_move(egui::pos2(50.0, 0.0));
        vp.pointer_up();

        vp.pointer_down(egui::pos2(10.0, 10.0));
        vp.pointer_move(egui::pos2(20.0, 30.0));
        assert_eq!(vp.view_box().origin(), egui::pos2(-60.0, -20.0));
    }

    #[test]
    fn test_zoom_is_coupled_and_corner_anchored() {
        let mut vp = controller();
        vp.wheel(100.0);
        assert_eq!(vp.view_box(), ViewBox { x: 0.0, y: 0.0, w: 900.0, h: 700.0 });

        vp.wheel(-250.0);
        assert_eq!(vp.view_box(), ViewBox { x: 0.0, y: 0.0, w: 650.0, h: 450.0 });
    }

    #[test]
    fn test_zoom_never_below_minimum() {
        let mut vp = controller();
        for _ in 0..10 {
            vp.wheel(-10000.0);
            assert!(vp.view_box().w >= 300.0);
            assert!(vp.view_box().h >= 300.0);
        }
        assert_eq!(vp.view_box().w, 300.0);
        assert_eq!(vp.view_box().h, 300.0);
    }

    #[test]
    fn test_resize_keeps_position_and_takes_new_size() {
        let mut vp = controller();
        vp.pointer_down(egui::Pos2::ZERO);
        vp.pointer_move(egui::pos2(-40.0, -60.0));
        vp.pointer_up();
        vp.wheel(100.0);

        assert!(!vp.resize(egui::vec2(800.0, 600.0)));
        assert_eq!(vp.view_box(), ViewBox { x: 40.0, y: 60.0, w: 900.0, h: 700.0 });

        // Zoom is dropped, the new surface size wins
        assert!(vp.resize(egui::vec2(1600.0, 600.0)));
        assert_eq!(vp.view_box(), ViewBox { x: 40.0, y: 60.0, w: 1600.0, h: 600.0 });

        assert!(vp.resize(egui::vec2(200.0, 100.0)));
        assert_eq!(vp.view_box(), ViewBox { x: 40.0, y: 60.0, w: 300.0, h: 300.0 });
    }

    #[test]
    fn test_reset_after_resize_uses_new_size() {
        let mut vp = controller();
        vp.resize(egui::vec2(1600.0, 900.0));
        vp.wheel(-200.0);
        vp.pointer_down(egui::Pos2::ZERO);
        vp.pointer_move(egui::pos2(25.0, 25.0));

        vp.reset();
        assert_eq!(vp.view_box(), ViewBox { x: 0.0, y: 0.0, w: 1600.0, h: 900.0 });
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut vp = controller();
        vp.wheel(500.0);
        vp.pointer_down(egui::Pos2::ZERO);
        vp.pointer_move(egui::pos2(10.0, 10.0));
        vp.reset();
        assert_eq!(vp.view_box(), ViewBox { x: 0.0, y: 0.0, w: 800.0, h: 600.0 });
        assert!(!vp.is_dragging());
    }

    #[test]
    fn test_meet_mapping_round_trips() {
        let vb = ViewBox { x: 100.0, y: 50.0, w: 400.0, h: 400.0 };
        let screen = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(800.0, 400.0));

        // Height limits the scale; content is centered horizontally
        assert_eq!(vb.scale(screen), 1.0);
        assert_eq!(vb.scene_to_screen(egui::pos2(100.0, 50.0), screen), egui::pos2(210.0, 20.0));

        let p = egui::pos2(333.0, 77.0);
        let back = vb.screen_to_scene(vb.scene_to_screen(p, screen), screen);
        assert!((back - p).length() < 1e-3);
    }
}
