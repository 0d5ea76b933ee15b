//! Canvas widget - paints the node tree and feeds pointer input to the
//! visualizer's input port.

mod canvas_ui;
mod surface;

pub use canvas_ui::{CanvasPalette, PointerSample, pointer_events, render};
pub use surface::SceneSurface;
