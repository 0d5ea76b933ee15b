//! Core engine modules - tree building, layout, viewport, input
//!
//! These modules form the diagram engine, independent of egui painting.

pub mod canvas_events;
pub mod event_bus;
pub mod layout;
pub mod surface;
pub mod tree_builder;
pub mod viewport;
pub mod visualizer;

// Re-exports for convenience
pub use canvas_events::CanvasEvent;
pub use event_bus::{EventBus, EventEmitter};
pub use layout::{LayoutConfig, recalculate_positions};
pub use surface::{CardLayer, Surface};
pub use tree_builder::{BuildError, TreeBuilder};
pub use viewport::{ViewBox, ViewportController};
pub use visualizer::{Visualizer, VisualizerConfig, VisualizerError};
