use crate::node::{MemoryNode, NodeStore};
use mindfull_core::{NodeId, Vec2};
use mindfull_events::telemetry::{self, GESTURE_NODE_DRAG};

/// Clamp a candidate top-left so a node of `size` stays inside `viewport`.
///
/// Each axis is limited to `[0, viewport - size]`. When the node is larger
/// than the viewport on an axis it is pinned at 0.
pub fn clamp_to_viewport(candidate: Vec2, size: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        candidate.x.min(viewport.x - size.x).max(0.0),
        candidate.y.min(viewport.y - size.y).max(0.0),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeDragSession {
    pub node: NodeId,
    /// Pointer position relative to the node's top-left at press time.
    pub offset: Vec2,
    pub correlation_id: String,
}

/// Idle → Dragging → Idle.
#[derive(Debug, Default)]
pub struct NodeDragController {
    session: Option<NodeDragSession>,
}

impl NodeDragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&NodeDragSession> {
        self.session.as_ref()
    }

    /// Start dragging `node`, grabbed at `pointer`. A drag already in
    /// progress is replaced.
    pub fn begin(&mut self, node: &MemoryNode, pointer: Vec2) {
        let correlation_id = telemetry::new_correlation_id();
        telemetry::gesture_start(GESTURE_NODE_DRAG, &correlation_id, node.id.as_str());
        self.session = Some(NodeDragSession {
            node: node.id.clone(),
            offset: pointer - node.position,
            correlation_id,
        });
    }

    /// Move the dragged node under the pointer, clamped to the viewport.
    /// Returns the node and its new position, or `None` when idle or when
    /// the node is no longer mounted.
    pub fn drag_to(
        &mut self,
        nodes: &mut NodeStore,
        pointer: Vec2,
        viewport: Vec2,
    ) -> Option<(NodeId, Vec2)> {
        let session = self.session.as_ref()?;
        let Some(node) = nodes.get_mut(&session.node) else {
            tracing::debug!(node = %session.node, "Dragged node is no longer mounted");
            return None;
        };

        let position = clamp_to_viewport(pointer - session.offset, node.size, viewport);
        node.position = position;
        Some((node.id.clone(), position))
    }

    /// Finish the drag, returning the session that ended.
    pub fn end(&mut self) -> Option<NodeDragSession> {
        let session = self.session.take()?;
        telemetry::gesture_commit(GESTURE_NODE_DRAG, &session.correlation_id, session.node.as_str());
        Some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1000.0, 800.0);

    fn store() -> NodeStore {
        let mut nodes = NodeStore::new();
        nodes
            .insert(MemoryNode::new(
                "memory-a",
                "A",
                Vec2::new(100.0, 100.0),
                Vec2::new(200.0, 100.0),
            ))
            .unwrap();
        nodes
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut nodes = store();
        let mut drag = NodeDragController::new();
        let node = nodes.get(&NodeId::new("memory-a")).unwrap().clone();

        drag.begin(&node, Vec2::new(150.0, 120.0));
        assert!(drag.is_dragging());
        assert_eq!(drag.session().unwrap().offset, Vec2::new(50.0, 20.0));

        let (id, pos) = drag
            .drag_to(&mut nodes, Vec2::new(450.0, 320.0), VIEWPORT)
            .unwrap();
        assert_eq!(id, NodeId::new("memory-a"));
        assert_eq!(pos, Vec2::new(400.0, 300.0));
        assert_eq!(nodes.get(&id).unwrap().position, pos);

        let ended = drag.end().unwrap();
        assert_eq!(ended.node, id);
        assert!(!drag.is_dragging());
        assert!(drag.end().is_none());
    }

    #[test]
    fn test_drag_beyond_right_edge_clamps() {
        let mut nodes = store();
        let mut drag = NodeDragController::new();
        let node = nodes.get(&NodeId::new("memory-a")).unwrap().clone();
        drag.begin(&node, Vec2::new(100.0, 100.0));

        let (_, pos) = drag
            .drag_to(&mut nodes, Vec2::new(5000.0, -300.0), VIEWPORT)
            .unwrap();
        assert_eq!(pos, Vec2::new(800.0, 0.0));
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut nodes = store();
        let mut drag = NodeDragController::new();
        assert!(drag.drag_to(&mut nodes, Vec2::new(10.0, 10.0), VIEWPORT).is_none());
        assert_eq!(
            nodes.get(&NodeId::new("memory-a")).unwrap().position,
            Vec2::new(100.0, 100.0)
        );
    }

    #[test]
    fn test_oversized_node_pinned_at_origin() {
        let pos = clamp_to_viewport(
            Vec2::new(50.0, 50.0),
            Vec2::new(300.0, 100.0),
            Vec2::new(200.0, 400.0),
        );
        assert_eq!(pos, Vec2::new(0.0, 50.0));
    }
}
