//! Visualizer - owns the node tree and the viewport for one surface.
//!
//! Flow:
//! 1. `new()` resizes the surface, seeds the viewport, builds and draws the tree
//! 2. UI code emits `CanvasEvent`s into the injected input port
//! 3. `process_input()` drains the port and pans/zooms/resizes
//! 4. `update_data()` throws the whole tree away and rebuilds it
//!
//! The view box is re-published to the surface after every change.

use log::{debug, info, warn};

use super::canvas_events::CanvasEvent;
use super::event_bus::{EventBus, EventEmitter};
use super::layout::LayoutConfig;
use super::surface::Surface;
use super::tree_builder::{BuildError, TreeBuilder};
use super::viewport::{DEFAULT_MIN_DIMENSION, ViewBox, ViewportController};
use crate::entities::{CardMetrics, Node, NodeId, Value};

#[derive(Debug, thiserror::Error)]
pub enum VisualizerError {
    #[error("surface has no card layer to draw nodes into")]
    MissingCardLayer,
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Visualizer settings: tree layout plus viewport limits.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub layout: LayoutConfig,
    pub min_dimension: f32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            min_dimension: DEFAULT_MIN_DIMENSION,
        }
    }
}

pub struct Visualizer<S: Surface> {
    surface: S,
    data: Value,
    root: Option<Node>,
    generation: u32,
    viewport: ViewportController,
    config: VisualizerConfig,
    metrics: CardMetrics,
    input: EventBus<CanvasEvent>,
}

impl<S: Surface> Visualizer<S> {
    /// Wire the surface, build and draw the tree for `data`.
    ///
    /// Fails fast if the surface has no card layer.
    pub fn new(
        mut surface: S,
        data: Value,
        config: VisualizerConfig,
        metrics: CardMetrics,
        input: EventBus<CanvasEvent>,
    ) -> Result<Self, VisualizerError> {
        if surface.cards().is_none() {
            return Err(VisualizerError::MissingCardLayer);
        }

        surface.resize();
        let viewport = ViewportController::new(surface.intrinsic_size(), config.min_dimension);

        let mut visualizer = Self {
            surface,
            data,
            root: None,
            generation: 0,
            viewport,
            config,
            metrics,
            input,
        };
        visualizer.publish();
        visualizer.init()?;
        visualizer.draw(None);
        Ok(visualizer)
    }

    /// Build a fresh tree from `self.data`.
    fn init(&mut self) -> Result<(), VisualizerError> {
        self.generation = self.generation.wrapping_add(1);
        let cards = self
            .surface
            .cards_mut()
            .ok_or(VisualizerError::MissingCardLayer)?;
        let root = TreeBuilder::new(&self.config.layout, &self.metrics, self.generation)
            .build(&self.data, cards)?;
        info!(
            "Built {} nodes (generation {})",
            root.count(),
            self.generation
        );
        self.root = Some(root);
        Ok(())
    }

    /// Append a node's card to the card layer and re-measure it.
    /// `None` draws the root.
    pub fn draw(&mut self, id: Option<NodeId>) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        let node = match id {
            None => root,
            Some(id) => match root.find_mut(id) {
                Some(node) => node,
                None => {
                    warn!("draw: no node {:?} in current tree", id);
                    return;
                }
            },
        };

        if let Some(cards) = self.surface.cards_mut() {
            cards.append(node.id);
        }
        node.update_size(&self.metrics);
    }

    /// Replace all visual content with a tree for `data`.
    ///
    /// The old tree and its cards are discarded first, so on error the
    /// visualizer is left empty.
    pub fn update_data(&mut self, data: Value) -> Result<(), VisualizerError> {
        self.data = data;
        if let Some(cards) = self.surface.cards_mut() {
            cards.clear();
        }
        self.root = None;

        self.init()?;
        self.draw(None);
        self.publish();
        Ok(())
    }

    /// Rebuild with new layout settings and apply the viewport minimum.
    pub fn set_config(&mut self, config: VisualizerConfig) -> Result<(), VisualizerError> {
        let layout_changed = config.layout != self.config.layout;
        self.config = config;
        self.viewport.set_min_dimension(config.min_dimension);
        self.publish();

        if layout_changed {
            debug!("Layout settings changed, rebuilding");
            self.update_data(self.data.clone())?;
        }
        Ok(())
    }

    /// Change card metrics (e.g. font size) and rebuild.
    pub fn set_metrics(&mut self, metrics: CardMetrics) -> Result<(), VisualizerError> {
        if metrics == self.metrics {
            return Ok(());
        }
        self.metrics = metrics;
        self.update_data(self.data.clone())
    }

    /// Drain the input port. Returns true if the view box changed.
    pub fn process_input(&mut self) -> bool {
        let mut changed = false;
        for event in self.input.poll() {
            changed |= self.handle_event(event);
        }
        changed
    }

    /// Apply one input event. Returns true if the view box changed.
    pub fn handle_event(&mut self, event: CanvasEvent) -> bool {
        let changed = match event {
            CanvasEvent::PointerDown(raw) => {
                let pos = self.surface.pointer_position(raw);
                self.viewport.pointer_down(pos);
                false
            }
            CanvasEvent::PointerMove(raw) => {
                let pos = self.surface.pointer_position(raw);
                self.viewport.pointer_move(pos)
            }
            CanvasEvent::PointerUp => {
                self.viewport.pointer_up();
                false
            }
            CanvasEvent::Wheel { delta_y } => {
                self.viewport.wheel(delta_y);
                true
            }
            CanvasEvent::Resize => {
                self.surface.resize();
                self.viewport.resize(self.surface.intrinsic_size());
                // Re-published even when unchanged
                true
            }
            CanvasEvent::ResetView => {
                self.viewport.reset();
                true
            }
        };

        if changed {
            self.publish();
        }
        changed
    }

    fn publish(&mut self) {
        self.surface.set_view_box(self.viewport.view_box());
    }

    /// Emitter for the input port, for UI code.
    pub fn emitter(&self) -> EventEmitter<CanvasEvent> {
        self.input.emitter()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::count)
    }

    pub fn view_box(&self) -> ViewBox {
        self.viewport.view_box()
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &CardMetrics {
        &self.metrics
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::CardLayer;
    use eframe::egui;
    use serde_json::json;

    /// Minimal surface: fixed size, pointer offset by `origin`.
    struct TestSurface {
        size: egui::Vec2,
        pending: egui::Vec2,
        origin: egui::Vec2,
        view_box_attr: String,
        published: usize,
        cards: Option<CardLayer>,
    }

    impl TestSurface {
        fn new(w: f32, h: f32) -> Self {
            Self {
                size: egui::Vec2::ZERO,
                pending: egui::vec2(w, h),
                origin: egui::Vec2::ZERO,
                view_box_attr: String::new(),
                published: 0,
                cards: Some(CardLayer::new()),
            }
        }
    }

    impl Surface for TestSurface {
        fn resize(&mut self) {
            self.size = self.pending;
        }
        fn intrinsic_size(&self) -> egui::Vec2 {
            self.size
        }
        fn pointer_position(&self, raw: egui::Pos2) -> egui::Pos2 {
            raw - self.origin
        }
        fn set_view_box(&mut self, view_box: ViewBox) {
            self.view_box_attr = view_box.to_string();
            self.published += 1;
        }
        fn view_box_attr(&self) -> &str {
            &self.view_box_attr
        }
        fn cards(&self) -> Option<&CardLayer> {
            self.cards.as_ref()
        }
        fn cards_mut(&mut self) -> Option<&mut CardLayer> {
            self.cards.as_mut()
        }
    }

    fn visualizer(input: serde_json::Value) -> Visualizer<TestSurface> {
        Visualizer::new(
            TestSurface::new(800.0, 600.0),
            Value::from(input),
            VisualizerConfig::default(),
            CardMetrics::default(),
            EventBus::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_card_layer_fails_fast() {
        let mut surface = TestSurface::new(800.0, 600.0);
        surface.cards = None;
        let result = Visualizer::new(
            surface,
            Value::Null,
            VisualizerConfig::default(),
            CardMetrics::default(),
            EventBus::new(),
        );
        assert!(matches!(result, Err(VisualizerError::MissingCardLayer)));
    }

    #[test]
    fn test_construction_publishes_and_draws() {
        let vis = visualizer(json!({"a": [1, 2]}));
        assert_eq!(vis.surface().view_box_attr(), "0 0 800 600");
        assert_eq!(vis.node_count(), 4);

        let cards = vis.surface().cards().unwrap();
        assert_eq!(cards.len(), 4);
        // Root is drawn last
        assert_eq!(cards.iter().last(), Some(&vis.root().unwrap().id));
    }

    #[test]
    fn test_update_data_discards_old_cards() {
        let mut vis = visualizer(json!({"a": {"b": {}}, "c": [1, 2, 3]}));
        let old_ids: Vec<NodeId> = vis.root().unwrap().iter().map(|n| n.id).collect();

        vis.update_data(Value::from(json!({"x": {}}))).unwrap();

        let cards = vis.surface().cards().unwrap();
        assert_eq!(cards.len(), 2);
        assert!(old_ids.iter().all(|id| !cards.contains(*id)));
        assert_eq!(vis.data(), &Value::from(json!({"x": {}})));
    }

    #[test]
    fn test_update_data_with_top_level_list() {
        let mut vis = visualizer(json!({"a": {}}));
        vis.update_data(Value::from(json!([1, 2]))).unwrap();
        assert_eq!(vis.node_count(), 1);
        assert_eq!(vis.root().unwrap().kind.name(), "empty");
        assert_eq!(vis.surface().cards().unwrap().len(), 1);
    }

    #[test]
    fn test_update_data_error_leaves_empty() {
        let mut vis = visualizer(json!({"a": {}}));
        let mut config = VisualizerConfig::default();
        config.layout.max_depth = 1;
        vis.set_config(config).unwrap();
        assert_eq!(vis.node_count(), 2);

        let err = vis.update_data(Value::from(json!({"a": {"b": {}}}))).unwrap_err();
        assert!(matches!(err, VisualizerError::Build(BuildError::DepthExceeded { limit: 1 })));
        assert!(vis.root().is_none());
        assert!(vis.surface().cards().unwrap().is_empty());
    }

    #[test]
    fn test_draw_specific_node() {
        let mut vis = visualizer(json!({"a": {}, "b": {}}));
        let first_child = vis.root().unwrap().children[0].id;
        vis.draw(Some(first_child));
        let last = *vis.surface().cards().unwrap().iter().last().unwrap();
        assert_eq!(last, first_child);

        // Unknown ids are ignored
        let count = vis.surface().cards().unwrap().len();
        vis.draw(Some(NodeId { generation: 99, index: 0 }));
        assert_eq!(vis.surface().cards().unwrap().len(), count);
    }

    #[test]
    fn test_drag_through_input_port() {
        let mut vis = visualizer(json!({}));
        vis.surface_mut().origin = egui::vec2(10.0, 10.0);
        let emitter = vis.emitter();

        emitter.emit(CanvasEvent::PointerDown(egui::pos2(110.0, 110.0)));
        emitter.emit(CanvasEvent::PointerMove(egui::pos2(150.0, 90.0)));
        emitter.emit(CanvasEvent::PointerUp);
        emitter.emit(CanvasEvent::PointerMove(egui::pos2(500.0, 500.0)));
        assert!(vis.process_input());

        assert_eq!(vis.view_box().origin(), egui::pos2(-40.0, 20.0));
        assert_eq!(vis.surface().view_box_attr(), "-40 20 800 600");
    }

    #[test]
    fn test_wheel_zoom_clamped() {
        let mut vis = visualizer(json!({}));
        for _ in 0..5 {
            vis.handle_event(CanvasEvent::Wheel { delta_y: -10000.0 });
        }
        assert_eq!(vis.surface().view_box_attr(), "0 0 300 300");
    }

    #[test]
    fn test_resize_republishes() {
        let mut vis = visualizer(json!({}));
        let before = vis.surface().published;

        assert!(vis.handle_event(CanvasEvent::Resize));
        assert_eq!(vis.surface().published, before + 1);
        assert_eq!(vis.surface().view_box_attr(), "0 0 800 600");

        vis.surface_mut().pending = egui::vec2(1600.0, 600.0);
        vis.handle_event(CanvasEvent::Resize);
        assert_eq!(vis.surface().view_box_attr(), "0 0 1600 600");
    }

    #[test]
    fn test_reset_view() {
        let mut vis = visualizer(json!({}));
        vis.handle_event(CanvasEvent::Wheel { delta_y: 200.0 });
        vis.handle_event(CanvasEvent::ResetView);
        assert_eq!(vis.surface().view_box_attr(), "0 0 800 600");
    }

    #[test]
    fn test_resize_drops_zoom_and_moves_reset_target() {
        let mut vis = visualizer(json!({}));
        vis.handle_event(CanvasEvent::Wheel { delta_y: 100.0 });
        assert_eq!(vis.surface().view_box_attr(), "0 0 900 700");

        vis.surface_mut().pending = egui::vec2(1600.0, 600.0);
        vis.handle_event(CanvasEvent::Resize);
        assert_eq!(vis.surface().view_box_attr(), "0 0 1600 600");

        vis.handle_event(CanvasEvent::Wheel { delta_y: -200.0 });
        vis.handle_event(CanvasEvent::ResetView);
        assert_eq!(vis.surface().view_box_attr(), "0 0 1600 600");
    }

    #[test]
    fn test_set_metrics_rebuilds() {
        let mut vis = visualizer(json!({"a": {"b": 1}}));
        let old_width = vis.root().unwrap().size.x;
        vis.set_metrics(CardMetrics::for_font_size(24.0)).unwrap();
        assert!(vis.root().unwrap().size.x > old_width);
        assert_eq!(vis.root().unwrap().id.generation, 2);
    }
}
