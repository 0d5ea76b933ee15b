//! Nestview - nested value visualizer library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (tree building, layout, viewport, input port)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod dialogs;
pub mod entities;
pub mod help;
pub mod paths;
pub mod widgets;

// Re-export commonly used types from core
pub use core::event_bus::{EventBus, EventEmitter};
pub use core::visualizer::{Visualizer, VisualizerConfig, VisualizerError};

// Re-export entities
pub use entities::{Node, NodeId, NodeKind, Value};
