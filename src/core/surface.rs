//! Drawing surface interface.
//!
//! The visualizer never touches egui directly; it talks to a `Surface`,
//! which owns the intrinsic pixel size, pointer mapping, the published view
//! box and the layer of drawn cards.

use eframe::egui;
use indexmap::IndexSet;

use super::viewport::ViewBox;
use crate::entities::NodeId;

/// Ordered set of drawn cards. Appending a card that is already present
/// moves it to the end.
#[derive(Debug, Clone, Default)]
pub struct CardLayer {
    cards: IndexSet<NodeId>,
}

impl CardLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, id: NodeId) {
        let (index, inserted) = self.cards.insert_full(id);
        if !inserted {
            self.cards.move_index(index, self.cards.len() - 1);
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.cards.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.cards.iter()
    }
}

pub trait Surface {
    /// Recompute the intrinsic pixel size from the current available area.
    fn resize(&mut self);

    /// Intrinsic size as last computed by `resize`.
    fn intrinsic_size(&self) -> egui::Vec2;

    /// Map a raw pointer position to surface-local coordinates.
    fn pointer_position(&self, raw: egui::Pos2) -> egui::Pos2;

    /// Publish the visible scene rectangle.
    fn set_view_box(&mut self, view_box: ViewBox);

    /// Last published view box as `"x y w h"`.
    fn view_box_attr(&self) -> &str;

    /// Container for node cards, if the surface has one.
    fn cards(&self) -> Option<&CardLayer>;

    fn cards_mut(&mut self) -> Option<&mut CardLayer>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> NodeId {
        NodeId { generation: 3, index }
    }

    #[test]
    fn test_append_moves_existing_card_to_end() {
        let mut layer = CardLayer::new();
        layer.append(id(1));
        layer.append(id(2));
        layer.append(id(1));

        let order: Vec<_> = layer.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut layer = CardLayer::new();
        layer.append(id(1));
        assert!(layer.contains(id(1)));

        layer.clear();
        assert!(layer.is_empty());
        assert!(!layer.contains(id(1)));
    }
}
