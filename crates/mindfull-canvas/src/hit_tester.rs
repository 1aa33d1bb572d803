use crate::geometry::port_rect;
use crate::graph::ConnectionGraph;
use crate::node::NodeStore;
use mindfull_core::geometry::distance_to_segment;
use mindfull_core::{ConnectionId, NodeId, PortId, Vec2};

/// Result of a hit test at a given position.
///
/// Priority order: topmost card (its ports, then its body) > Pathway > None
#[derive(Debug, Clone, PartialEq)]
pub enum HitResult {
    /// Nothing was hit at the tested position.
    None,
    /// A connection port on the edge of a memory card.
    Port(PortId),
    /// The body of a memory card (outside its ports).
    Node(NodeId),
    /// The glow line of a pathway.
    Pathway(ConnectionId),
}

/// Finds the element under the pointer.
///
/// Holds no spatial cache: positions are read from the node store and the
/// pathway primitives at query time, so a hit test right after a drag sees
/// the moved geometry.
#[derive(Debug, Clone)]
pub struct HitTester {
    /// Side of the square hit box around each port anchor.
    port_size: f32,
    /// Maximum distance (in pixels) from a glow line to count as a hit.
    pathway_tolerance: f32,
}

impl Default for HitTester {
    fn default() -> Self {
        Self::new(14.0, 6.0)
    }
}

impl HitTester {
    pub fn new(port_size: f32, pathway_tolerance: f32) -> Self {
        Self {
            port_size,
            pathway_tolerance,
        }
    }

    pub fn port_size(&self) -> f32 {
        self.port_size
    }

    pub fn pathway_tolerance(&self) -> f32 {
        self.pathway_tolerance
    }

    /// Perform a hit test at the given position.
    ///
    /// Cards are walked top to bottom. On each card its ports (which sit on
    /// the edges, half outside the body) are tested before its body, so a card
    /// painted on top hides the ports of any card beneath it. Pathways are
    /// only hit where no card is.
    pub fn hit_test(&self, nodes: &NodeStore, graph: &ConnectionGraph, pos: Vec2) -> HitResult {
        if let Some(hit) = self.hit_test_cards(nodes, pos) {
            return hit;
        }

        if let Some(id) = self.hit_test_pathway(graph, pos) {
            return HitResult::Pathway(id);
        }

        HitResult::None
    }

    /// Topmost card element under `pos`: a port or a card body.
    fn hit_test_cards(&self, nodes: &NodeStore, pos: Vec2) -> Option<HitResult> {
        for node in nodes.iter().rev() {
            let port = node.ports().find(|port| {
                port_rect(nodes, port, self.port_size).is_some_and(|rect| rect.contains(pos))
            });
            if let Some(port) = port {
                return Some(HitResult::Port(port));
            }
            if node.rect().contains(pos) {
                return Some(HitResult::Node(node.id.clone()));
            }
        }
        None
    }

    /// The port under `pos`, unless a card above it covers that spot.
    pub fn hit_test_port(&self, nodes: &NodeStore, pos: Vec2) -> Option<PortId> {
        match self.hit_test_cards(nodes, pos)? {
            HitResult::Port(port) => Some(port),
            _ => None,
        }
    }

    /// Closest pathway glow line within tolerance.
    pub fn hit_test_pathway(&self, graph: &ConnectionGraph, pos: Vec2) -> Option<ConnectionId> {
        let mut best_id = None;
        let mut best_dist = self.pathway_tolerance;

        for connection in graph.iter() {
            let line = &connection.visuals.glow_line;
            let dist = distance_to_segment(pos, line.start, line.end);
            if dist <= best_dist {
                best_dist = dist;
                best_id = Some(connection.id);
            }
        }

        best_id
    }
}
