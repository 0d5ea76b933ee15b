//! Node - one rendered card in the diagram.
//!
//! Nodes form an owned tree: every child belongs to exactly one parent,
//! and children are ordered by key enumeration, then array element order.
//!
//! A node's x is fixed when it is created (right of its parent plus the
//! horizontal gap). Its y is owned by the layout pass and may be rewritten
//! any number of times.

use eframe::egui;

use super::card::{self, CardLine, CardMetrics};
use super::value::Value;

/// Identity of a node's card in the card layer.
///
/// `generation` changes on every rebuild, so ids from a discarded tree never
/// match cards of the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub generation: u32,
    pub index: u32,
}

/// What a node wraps.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A nested structure or a scalar.
    Object { value: Value },
    /// An array, labeled by the key it was found under.
    Extension { label: String },
    /// Placeholder for an unsupported top-level shape.
    Empty,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Object { .. } => "object",
            NodeKind::Extension { .. } => "extension",
            NodeKind::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub location: egui::Pos2,
    pub size: egui::Vec2,
    pub children: Vec<Node>,
}

impl Node {
    /// Create an unmeasured node. Call `update_size` before placing children.
    pub fn new(id: NodeId, kind: NodeKind, location: egui::Pos2) -> Self {
        Self {
            id,
            kind,
            location,
            size: egui::Vec2::ZERO,
            children: Vec::new(),
        }
    }

    /// Wrapped value, for `Object` nodes.
    pub fn value(&self) -> Option<&Value> {
        match &self.kind {
            NodeKind::Object { value } => Some(value),
            _ => None,
        }
    }

    pub fn lines(&self) -> Vec<CardLine> {
        card::card_lines(&self.kind)
    }

    /// Re-measure the card from its current content.
    pub fn update_size(&mut self, metrics: &CardMetrics) {
        self.size = metrics.measure(&self.lines());
    }

    pub fn update_y(&mut self, y: f32) {
        self.location.y = y;
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(self.location, self.size)
    }

    /// Connector anchor on the right edge (outgoing edges).
    pub fn out_anchor(&self) -> egui::Pos2 {
        egui::pos2(self.location.x + self.size.x, self.location.y + self.size.y * 0.5)
    }

    /// Connector anchor on the left edge (incoming edge).
    pub fn in_anchor(&self) -> egui::Pos2 {
        egui::pos2(self.location.x, self.location.y + self.size.y * 0.5)
    }

    /// Pre-order traversal, self first.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// Total node count of this subtree.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.iter().find(|n| n.id == id)
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }
}

/// Pre-order iterator over a node subtree.
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> NodeId {
        NodeId { generation: 1, index }
    }

    fn leaf(index: u32) -> Node {
        Node::new(id(index), NodeKind::Object { value: Value::from(index as i64) }, egui::Pos2::ZERO)
    }

    #[test]
    fn test_iter_is_preorder() {
        let mut root = leaf(0);
        let mut a = leaf(1);
        a.add_child(leaf(2));
        root.add_child(a);
        root.add_child(leaf(3));

        let order: Vec<_> = root.iter().map(|n| n.id.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(root.count(), 4);
    }

    #[test]
    fn test_find_mut() {
        let mut root = leaf(0);
        let mut a = leaf(1);
        a.add_child(leaf(2));
        root.add_child(a);

        root.find_mut(id(2)).unwrap().update_y(42.0);
        assert_eq!(root.find(id(2)).unwrap().location.y, 42.0);
        assert!(root.find(NodeId { generation: 2, index: 2 }).is_none());
    }

    #[test]
    fn test_update_size_and_anchors() {
        let metrics = CardMetrics::default();
        let mut node = Node::new(
            id(0),
            NodeKind::Extension { label: "items".into() },
            egui::pos2(10.0, 20.0),
        );
        assert_eq!(node.size, egui::Vec2::ZERO);

        node.update_size(&metrics);
        assert!(node.size.x >= metrics.min_width);
        assert_eq!(node.in_anchor(), egui::pos2(10.0, 20.0 + node.size.y / 2.0));
        assert_eq!(node.out_anchor().x, 10.0 + node.size.x);
        assert_eq!(node.kind.name(), "extension");
        assert!(node.value().is_none());
    }
}
