use crate::error::CanvasError;
use mindfull_core::{NodeId, PortAnchor, PortId, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A draggable memory card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryNode {
    pub id: NodeId,
    pub label: String,
    /// Top-left corner in viewport pixels.
    pub position: Vec2,
    pub size: Vec2,
}

impl MemoryNode {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    pub fn port(&self, anchor: PortAnchor) -> PortId {
        PortId::new(self.id.clone(), anchor)
    }

    pub fn ports(&self) -> impl Iterator<Item = PortId> + '_ {
        PortAnchor::ALL.into_iter().map(|anchor| self.port(anchor))
    }
}

/// Mounted memory cards in paint order (later entries are drawn on top).
#[derive(Debug, Default, Clone)]
pub struct NodeStore {
    nodes: Vec<MemoryNode>,
    index: HashMap<NodeId, usize>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: MemoryNode) -> Result<(), CanvasError> {
        if self.index.contains_key(&node.id) {
            return Err(CanvasError::DuplicateNode(node.id));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    pub fn get(&self, id: &NodeId) -> Option<&MemoryNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut MemoryNode> {
        self.index.get(id).map(|&idx| &mut self.nodes[idx])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes bottom-to-top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MemoryNode> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MemoryNode> {
        self.nodes.iter_mut()
    }
}
