//! Layout engine - vertical placement of sibling cards.
//!
//! Children of a node are spread over a band centered on the parent's y,
//! then each child recurses with its own children. Positions are derived
//! entirely from the parent's y and the sibling sizes, so running the pass
//! again over an unchanged tree is a no-op.
//!
//! Placement is cumulative: child `i` of `n` sits at
//! `start + group * (i + 1) / n`, not on a symmetric ladder around the parent.

use log::trace;

use crate::entities::Node;

/// Horizontal gap between a parent card and its children
pub const DEFAULT_GAP_X: f32 = 100.0;
/// Vertical gap between sibling cards
pub const DEFAULT_GAP_Y: f32 = 50.0;
/// Scene position of the root card
pub const DEFAULT_ORIGIN: [f32; 2] = [200.0, 200.0];
/// Deepest input nesting the builder accepts
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tree layout parameters, in scene units.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub origin: [f32; 2],
    pub gap_x: f32,
    pub gap_y: f32,
    pub max_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            gap_x: DEFAULT_GAP_X,
            gap_y: DEFAULT_GAP_Y,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Assign y to every descendant of `parent`, top-down.
pub fn recalculate_positions(parent: &mut Node, gap_y: f32) {
    let n = parent.children.len();
    if n == 0 {
        return;
    }

    // A lone child sits level with its parent
    let group_height = if n == 1 {
        0.0
    } else {
        let total: f32 = parent.children.iter().map(|c| c.size.y).sum();
        total + gap_y * (n - 1) as f32
    };
    let start_y = parent.location.y - group_height / 2.0;

    for (i, child) in parent.children.iter_mut().enumerate() {
        let new_y = start_y + group_height * ((i + 1) as f32 / n as f32);
        child.update_y(new_y);
        recalculate_positions(child, gap_y);
    }

    trace!(
        "Placed {} children of {:?} over {:.1} units",
        n, parent.id, group_height
    );
}
