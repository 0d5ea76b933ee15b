//! Canvas widget - UI rendering and input translation

use eframe::egui;
use eframe::egui::epaint::CubicBezierShape;
use log::info;
use std::collections::HashMap;

use super::SceneSurface;
use crate::core::{CanvasEvent, CardLayer, Surface, ViewBox, Visualizer};
use crate::entities::{CardMetrics, LineRole, Node, NodeId};
use crate::help::render_help_overlay;
use crate::widgets::actions::{ActionQueue, AppAction};
use crate::widgets::file_dialogs::create_json_dialog;

/// Card text below this on-screen size is skipped
const MIN_TEXT_PX: f32 = 4.0;
const CARD_CORNER: f32 = 4.0;

/// Colors for the canvas, derived from the active egui theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPalette {
    pub background: egui::Color32,
    pub card_fill: egui::Color32,
    pub card_stroke: egui::Color32,
    pub title: egui::Color32,
    pub text: egui::Color32,
    pub nested: egui::Color32,
    pub connector: egui::Color32,
}

impl CanvasPalette {
    pub fn from_visuals(visuals: &egui::Visuals) -> Self {
        if visuals.dark_mode {
            Self {
                background: egui::Color32::from_gray(24),
                card_fill: egui::Color32::from_gray(44),
                card_stroke: egui::Color32::from_gray(90),
                title: egui::Color32::from_rgb(255, 200, 100),
                text: egui::Color32::from_gray(220),
                nested: egui::Color32::from_rgb(120, 180, 255),
                connector: egui::Color32::from_gray(130),
            }
        } else {
            Self {
                background: egui::Color32::from_gray(245),
                card_fill: egui::Color32::WHITE,
                card_stroke: egui::Color32::from_gray(160),
                title: egui::Color32::from_rgb(170, 90, 0),
                text: egui::Color32::from_gray(30),
                nested: egui::Color32::from_rgb(20, 90, 200),
                connector: egui::Color32::from_gray(120),
            }
        }
    }

    fn line_color(&self, role: LineRole) -> egui::Color32 {
        match role {
            LineRole::Title => self.title,
            LineRole::Scalar => self.text,
            LineRole::Nested => self.nested,
        }
    }
}

/// Raw pointer state for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub hovered: bool,
    pub pressed: bool,
    pub released: bool,
    pub moved: bool,
    pub pos: Option<egui::Pos2>,
    /// egui scroll delta (positive = wheel up)
    pub scroll_y: f32,
}

impl PointerSample {
    fn read(ui: &egui::Ui, hovered: bool) -> Self {
        ui.input(|i| Self {
            hovered,
            pressed: i.pointer.any_pressed(),
            released: i.pointer.any_released(),
            moved: i.pointer.delta() != egui::Vec2::ZERO,
            pos: i.pointer.latest_pos(),
            scroll_y: i.raw_scroll_delta.y,
        })
    }
}

/// Translate one frame of pointer state into input-port events.
///
/// Presses only count over the canvas; moves and releases are forwarded
/// while a drag is active so a drag can leave the panel. Wheel deltas use
/// the DOM sign convention (positive = scroll down = zoom out).
pub fn pointer_events(sample: &PointerSample, dragging: bool) -> Vec<CanvasEvent> {
    let mut events = Vec::new();
    let mut dragging = dragging;

    if sample.pressed
        && sample.hovered
        && let Some(pos) = sample.pos
    {
        events.push(CanvasEvent::PointerDown(pos));
        dragging = true;
    }

    if dragging
        && sample.moved
        && let Some(pos) = sample.pos
    {
        events.push(CanvasEvent::PointerMove(pos));
    }

    if sample.released && dragging {
        events.push(CanvasEvent::PointerUp);
    }

    if sample.hovered && sample.scroll_y != 0.0 {
        events.push(CanvasEvent::Wheel {
            delta_y: -sample.scroll_y,
        });
    }

    events
}

/// Cards in draw order with their screen rects, skipping anything outside
/// `screen`. Draw order is card layer order.
fn visible_cards<'a>(
    root: &'a Node,
    cards: &CardLayer,
    view_box: ViewBox,
    screen: egui::Rect,
) -> Vec<(&'a Node, egui::Rect)> {
    let by_id: HashMap<NodeId, &Node> = root.iter().map(|n| (n.id, n)).collect();
    cards
        .iter()
        .filter_map(|id| by_id.get(id).copied())
        .map(|node| (node, view_box.scene_rect_to_screen(node.rect(), screen)))
        .filter(|(_, rect)| rect.intersects(screen))
        .collect()
}

fn paint_connectors(
    painter: &egui::Painter,
    root: &Node,
    view_box: ViewBox,
    screen: egui::Rect,
    palette: &CanvasPalette,
) {
    let stroke = egui::Stroke::new(1.5, palette.connector);
    for node in root.iter() {
        for child in &node.children {
            let from = view_box.scene_to_screen(node.out_anchor(), screen);
            let to = view_box.scene_to_screen(child.in_anchor(), screen);
            if !egui::Rect::from_two_pos(from, to).intersects(screen) {
                continue;
            }
            let bend = egui::vec2((to.x - from.x) * 0.5, 0.0);
            painter.add(CubicBezierShape::from_points_stroke(
                [from, from + bend, to - bend, to],
                false,
                egui::Color32::TRANSPARENT,
                stroke,
            ));
        }
    }
}

fn paint_card(
    painter: &egui::Painter,
    node: &Node,
    rect: egui::Rect,
    scale: f32,
    metrics: &CardMetrics,
    palette: &CanvasPalette,
) {
    let corner = CARD_CORNER * scale;
    painter.rect_filled(rect, corner, palette.card_fill);
    painter.rect_stroke(
        rect,
        corner,
        egui::Stroke::new(1.0, palette.card_stroke),
        egui::StrokeKind::Inside,
    );

    let font_px = metrics.font_size * scale;
    if font_px < MIN_TEXT_PX {
        return;
    }
    let font_id = egui::FontId::monospace(font_px);
    for (i, line) in node.lines().iter().enumerate() {
        let offset = egui::vec2(
            metrics.padding.x,
            metrics.padding.y + i as f32 * metrics.line_height,
        ) * scale;
        painter.text(
            rect.min + offset,
            egui::Align2::LEFT_TOP,
            &line.text,
            font_id.clone(),
            palette.line_color(line.role),
        );
    }
}

/// Render the canvas inside provided UI and drive the visualizer's input.
pub fn render(
    ui: &mut egui::Ui,
    visualizer: Option<&mut Visualizer<SceneSurface>>,
    palette: &CanvasPalette,
    error_msg: Option<&str>,
    show_help: bool,
) -> ActionQueue {
    let mut actions = ActionQueue::new();
    let panel_rect = ui.max_rect();
    ui.painter().rect_filled(panel_rect, 0.0, palette.background);

    let response = ui.interact(
        panel_rect,
        ui.id().with("canvas_interaction"),
        egui::Sense::click_and_drag(),
    );
    actions.hovered = response.hovered();

    if response.double_clicked() {
        info!("Double-click detected, opening file dialog");
        if let Some(path) = create_json_dialog("Open JSON").pick_file() {
            actions.send(AppAction::Open(path));
        }
    }

    if let Some(vis) = visualizer {
        let emitter = vis.emitter();
        if vis.surface_mut().set_available_rect(panel_rect) {
            emitter.emit(CanvasEvent::Resize);
        }

        let sample = PointerSample::read(ui, response.hovered());
        if sample.hovered && sample.scroll_y != 0.0 {
            // Keep the wheel from also scrolling parent containers
            ui.ctx().input_mut(|i| {
                i.raw_scroll_delta = egui::Vec2::ZERO;
                i.smooth_scroll_delta = egui::Vec2::ZERO;
            });
        }
        for event in pointer_events(&sample, vis.viewport().is_dragging()) {
            emitter.emit(event);
        }
        if vis.process_input() {
            ui.ctx().request_repaint();
        }

        if vis.viewport().is_dragging() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }

        let screen = vis.surface().rect();
        let view_box = vis.view_box();
        if let (Some(root), Some(cards)) = (vis.root(), vis.surface().cards()) {
            let painter = ui.painter_at(screen);
            let scale = view_box.scale(screen);
            paint_connectors(&painter, root, view_box, screen, palette);
            for (node, rect) in visible_cards(root, cards, view_box, screen) {
                paint_card(&painter, node, rect, scale, vis.metrics(), palette);
            }
        }
    }

    if let Some(error) = error_msg {
        ui.painter().text(
            panel_rect.center_bottom() - egui::vec2(0.0, 24.0),
            egui::Align2::CENTER_BOTTOM,
            error,
            egui::FontId::proportional(14.0),
            egui::Color32::RED,
        );
    }

    if show_help {
        egui::Area::new(ui.id().with("canvas_help"))
            .fixed_pos(panel_rect.min + egui::vec2(10.0, 10.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ui.ctx(), |ui| {
                render_help_overlay(ui);
            });
    }

    actions
}
