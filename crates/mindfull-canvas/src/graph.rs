use crate::error::ConnectError;
use crate::visuals::PathwayVisuals;
use mindfull_core::{ConnectionId, NodeId, PortId, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A neural pathway between ports on two different memory cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: PortId,
    pub to: PortId,
    /// Position of the traveling light along the pathway, in `[0, 1)`.
    pub progress: f32,
    /// Progress added per frame tick.
    pub speed: f32,
    pub pulse_phase: f32,
    pub halo_phase: f32,
    pub visuals: PathwayVisuals,
}

impl Connection {
    pub fn touches(&self, node: &NodeId) -> bool {
        self.from.owner() == node || self.to.owner() == node
    }

    pub fn node_pair(&self) -> (NodeId, NodeId) {
        node_pair(self.from.owner(), self.to.owner())
    }
}

/// Unordered pair key: pathways are undirected.
fn node_pair(a: &NodeId, b: &NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Every pathway on the canvas, in creation order.
#[derive(Debug, Default)]
pub struct ConnectionGraph {
    connections: Vec<Connection>,
    pairs: HashSet<(NodeId, NodeId)>,
    next_id: u64,
}

impl ConnectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the pathway rules without mutating anything: endpoints on two
    /// different nodes, and at most one pathway per node pair.
    pub fn validate(&self, from: &PortId, to: &PortId) -> Result<(), ConnectError> {
        if from.owner() == to.owner() {
            return Err(ConnectError::SelfConnection(from.owner().clone()));
        }
        if self.are_connected(from.owner(), to.owner()) {
            let (a, b) = node_pair(from.owner(), to.owner());
            return Err(ConnectError::AlreadyConnected { a, b });
        }
        Ok(())
    }

    /// Register a validated pathway and allocate its visuals at the given
    /// endpoint positions.
    pub fn register(
        &mut self,
        from: PortId,
        to: PortId,
        from_pos: Vec2,
        to_pos: Vec2,
        speed: f32,
    ) -> Result<ConnectionId, ConnectError> {
        self.validate(&from, &to)?;

        self.next_id += 1;
        let id = ConnectionId(self.next_id);
        self.pairs.insert(node_pair(from.owner(), to.owner()));
        self.connections.push(Connection {
            id,
            from,
            to,
            progress: 0.0,
            speed,
            pulse_phase: 0.0,
            halo_phase: 0.0,
            visuals: PathwayVisuals::allocate(from_pos, to_pos),
        });
        Ok(id)
    }

    pub fn are_connected(&self, a: &NodeId, b: &NodeId) -> bool {
        self.pairs.contains(&node_pair(a, b))
    }

    /// Remove a pathway together with its visual bundle.
    pub fn remove(&mut self, id: ConnectionId) -> Option<Connection> {
        let idx = self.connections.iter().position(|c| c.id == id)?;
        let removed = self.connections.remove(idx);
        self.pairs.remove(&removed.node_pair());
        Some(removed)
    }

    /// Remove every pathway touching `node`.
    pub fn remove_touching(&mut self, node: &NodeId) -> Vec<Connection> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.connections)
            .into_iter()
            .partition(|c| c.touches(node));
        self.connections = kept;
        for connection in &removed {
            self.pairs.remove(&connection.node_pair());
        }
        removed
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Connection> {
        self.connections.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindfull_core::PortAnchor;

    fn port(node: &str, anchor: PortAnchor) -> PortId {
        PortId::new(node, anchor)
    }

    fn register(graph: &mut ConnectionGraph, from: PortId, to: PortId) -> Result<ConnectionId, ConnectError> {
        graph.register(from, to, Vec2::ZERO, Vec2::new(100.0, 0.0), 0.0015)
    }

    #[test]
    fn test_register_pathway() {
        let mut graph = ConnectionGraph::new();
        let id = register(
            &mut graph,
            port("memory-a", PortAnchor::Right),
            port("memory-b", PortAnchor::Left),
        )
        .unwrap();

        assert_eq!(graph.len(), 1);
        let connection = graph.get(id).unwrap();
        assert_eq!(connection.progress, 0.0);
        assert_eq!(connection.speed, 0.0015);
        assert!(graph.are_connected(&NodeId::new("memory-b"), &NodeId::new("memory-a")));
    }

    #[test]
    fn test_self_connection_rejected() {
        let mut graph = ConnectionGraph::new();
        let err = register(
            &mut graph,
            port("memory-a", PortAnchor::Right),
            port("memory-a", PortAnchor::Left),
        )
        .unwrap_err();
        assert_eq!(err, ConnectError::SelfConnection(NodeId::new("memory-a")));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_reverse_duplicate_rejected() {
        let mut graph = ConnectionGraph::new();
        register(
            &mut graph,
            port("memory-a", PortAnchor::Right),
            port("memory-b", PortAnchor::Left),
        )
        .unwrap();

        // Different ports, opposite direction: still the same node pair
        let err = register(
            &mut graph,
            port("memory-b", PortAnchor::Top),
            port("memory-a", PortAnchor::Bottom),
        )
        .unwrap_err();
        assert!(matches!(err, ConnectError::AlreadyConnected { .. }));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_remove_frees_the_pair() {
        let mut graph = ConnectionGraph::new();
        let id = register(
            &mut graph,
            port("memory-a", PortAnchor::Right),
            port("memory-b", PortAnchor::Left),
        )
        .unwrap();

        let removed = graph.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(graph.is_empty());
        assert!(graph.remove(id).is_none());

        let again = register(
            &mut graph,
            port("memory-b", PortAnchor::Left),
            port("memory-a", PortAnchor::Right),
        );
        assert!(again.is_ok());
        assert_ne!(again.unwrap(), id);
    }

    #[test]
    fn test_remove_touching_node() {
        let mut graph = ConnectionGraph::new();
        for (a, b) in [("memory-a", "memory-b"), ("memory-a", "memory-c"), ("memory-b", "memory-c")] {
            register(&mut graph, port(a, PortAnchor::Right), port(b, PortAnchor::Left)).unwrap();
        }

        let removed = graph.remove_touching(&NodeId::new("memory-a"));
        assert_eq!(removed.len(), 2);
        assert_eq!(graph.len(), 1);
        assert!(!graph.are_connected(&NodeId::new("memory-a"), &NodeId::new("memory-c")));
        assert!(graph.are_connected(&NodeId::new("memory-c"), &NodeId::new("memory-b")));
    }
}
