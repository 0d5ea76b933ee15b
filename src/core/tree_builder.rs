//! Tree builder - turns a `Value` into a tree of node cards.
//!
//! Shape rules, applied to every entry of an expanded node:
//! - keyed value  -> one `Object` child wrapping it, expanded recursively
//! - list value   -> one `Extension` child labeled with the entry's key,
//!                   whose children are the list elements (`Object` nodes)
//! - scalar value -> no child (shown as a line on the parent card)
//!
//! A list at the top level yields a single `Empty` placeholder.
//!
//! Every card is measured as soon as it is created: a child's x is
//! `parent.x + parent.width + gap_x` and needs the parent's width.
//! y stays provisional until the layout pass runs on the finished tree.

use eframe::egui;
use log::debug;

use super::layout::{self, LayoutConfig};
use super::surface::CardLayer;
use crate::entities::{CardMetrics, Node, NodeId, NodeKind, Value};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("input nesting exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

pub struct TreeBuilder<'a> {
    config: &'a LayoutConfig,
    metrics: &'a CardMetrics,
    generation: u32,
    next_index: u32,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(config: &'a LayoutConfig, metrics: &'a CardMetrics, generation: u32) -> Self {
        Self {
            config,
            metrics,
            generation,
            next_index: 0,
        }
    }

    /// Build and lay out the tree for `value`, registering every non-root
    /// card with `cards` in creation order.
    pub fn build(mut self, value: &Value, cards: &mut CardLayer) -> Result<Node, BuildError> {
        let origin = egui::pos2(self.config.origin[0], self.config.origin[1]);

        if value.is_list() {
            debug!("Top-level list, building placeholder");
            return Ok(self.create(NodeKind::Empty, origin));
        }

        let mut root = self.create(NodeKind::Object { value: value.clone() }, origin);
        self.expand(&mut root, cards, 0)?;
        layout::recalculate_positions(&mut root, self.config.gap_y);

        debug!(
            "Built tree: {} nodes (generation {})",
            self.next_index, self.generation
        );
        Ok(root)
    }

    fn create(&mut self, kind: NodeKind, location: egui::Pos2) -> Node {
        let id = NodeId {
            generation: self.generation,
            index: self.next_index,
        };
        self.next_index += 1;

        let mut node = Node::new(id, kind, location);
        node.update_size(self.metrics);
        node
    }

    fn child_location(&self, parent: &Node) -> egui::Pos2 {
        egui::pos2(
            parent.location.x + parent.size.x + self.config.gap_x,
            parent.location.y,
        )
    }

    /// `depth` is the nesting depth of a container about to get a node.
    fn check_depth(&self, depth: usize) -> Result<(), BuildError> {
        if depth > self.config.max_depth {
            return Err(BuildError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// Add children for the container-valued entries of an `Object` node.
    /// `depth` is the nesting depth of the parent's value (root = 0).
    fn expand(&mut self, parent: &mut Node, cards: &mut CardLayer, depth: usize) -> Result<(), BuildError> {
        let value = match &parent.kind {
            NodeKind::Object { value } if value.is_container() => value.clone(),
            _ => return Ok(()),
        };

        for (key, entry) in value.entries() {
            if entry.is_container() {
                self.check_depth(depth + 1)?;
            }
            match entry {
                Value::Keyed(_) => {
                    let location = self.child_location(parent);
                    let mut child = self.create(NodeKind::Object { value: entry.clone() }, location);
                    cards.append(child.id);
                    self.expand(&mut child, cards, depth + 1)?;
                    parent.add_child(child);
                }
                Value::List(items) => {
                    let location = self.child_location(parent);
                    let mut extension = self.create(
                        NodeKind::Extension {
                            label: key.into_owned(),
                        },
                        location,
                    );
                    cards.append(extension.id);
                    extension.update_size(self.metrics);
                    self.expand_elements(&mut extension, items, cards, depth + 1)?;
                    parent.add_child(extension);
                }
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
            }
        }
        Ok(())
    }

    /// Add one `Object` child per list element under an `Extension` node.
    fn expand_elements(
        &mut self,
        extension: &mut Node,
        items: &[Value],
        cards: &mut CardLayer,
        depth: usize,
    ) -> Result<(), BuildError> {
        for item in items {
            if item.is_container() {
                self.check_depth(depth + 1)?;
            }
            let location = self.child_location(extension);
            let mut child = self.create(NodeKind::Object { value: item.clone() }, location);
            cards.append(child.id);
            self.expand(&mut child, cards, depth + 1)?;
            extension.add_child(child);
        }
        Ok(())
    }
}
