use crate::node::NodeStore;
use mindfull_core::{PortAnchor, PortId, Rect, Vec2};

/// Current absolute position of a port: the center of its box, which sits on
/// the midpoint of the owning card's edge.
///
/// Nodes move between calls, so callers resolve fresh every time they need a
/// position. Returns `None` when the owning node is not mounted.
pub fn resolve_port(nodes: &NodeStore, port: &PortId) -> Option<Vec2> {
    let node = nodes.get(port.owner())?;
    Some(anchor_point(node.rect(), port.anchor))
}

/// Hit box of a port, `size` pixels square around its anchor point.
pub fn port_rect(nodes: &NodeStore, port: &PortId, size: f32) -> Option<Rect> {
    resolve_port(nodes, port).map(|center| Rect::from_center_size(center, Vec2::new(size, size)))
}

pub fn anchor_point(rect: Rect, anchor: PortAnchor) -> Vec2 {
    match anchor {
        PortAnchor::Top => rect.top_center(),
        PortAnchor::Right => rect.right_center(),
        PortAnchor::Bottom => rect.bottom_center(),
        PortAnchor::Left => rect.left_center(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::MemoryNode;
    use mindfull_core::NodeId;

    fn store_with(node: MemoryNode) -> NodeStore {
        let mut store = NodeStore::new();
        store.insert(node).unwrap();
        store
    }

    #[test]
    fn test_resolve_follows_node_position() {
        let mut store = store_with(MemoryNode::new(
            "memory-a",
            "A",
            Vec2::new(100.0, 100.0),
            Vec2::new(200.0, 100.0),
        ));
        let port = PortId::new("memory-a", PortAnchor::Right);

        assert_eq!(resolve_port(&store, &port), Some(Vec2::new(300.0, 150.0)));

        store.get_mut(&NodeId::new("memory-a")).unwrap().position = Vec2::new(0.0, 0.0);
        assert_eq!(resolve_port(&store, &port), Some(Vec2::new(200.0, 50.0)));
    }

    #[test]
    fn test_unknown_owner_resolves_to_none() {
        let store = NodeStore::new();
        let port = PortId::new("memory-missing", PortAnchor::Top);
        assert_eq!(resolve_port(&store, &port), None);
        assert_eq!(port_rect(&store, &port, 14.0), None);
    }

    #[test]
    fn test_port_rect_centered_on_anchor() {
        let store = store_with(MemoryNode::new(
            "memory-a",
            "A",
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 60.0),
        ));
        let rect = port_rect(&store, &PortId::new("memory-a", PortAnchor::Left), 10.0).unwrap();
        assert_eq!(rect.center(), Vec2::new(0.0, 30.0));
        assert_eq!(rect.width(), 10.0);
    }
}
