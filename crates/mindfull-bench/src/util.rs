use mindfull_canvas::{ConnectionGraph, MemoryNode, NodeStore, resolve_port};
use mindfull_core::{NodeId, PortAnchor, PortId, Vec2};

const CARD: Vec2 = Vec2::new(220.0, 140.0);
const COLUMNS: usize = 20;

/// A synthetic constellation: `node_count` cards on a grid, each connected to
/// the card after it.
pub fn generate_constellation(node_count: usize) -> anyhow::Result<(NodeStore, ConnectionGraph)> {
    let mut nodes = NodeStore::new();
    for i in 0..node_count {
        let position = Vec2::new(
            (i % COLUMNS) as f32 * (CARD.x + 60.0),
            (i / COLUMNS) as f32 * (CARD.y + 60.0),
        );
        nodes.insert(MemoryNode::new(
            format!("memory-{i}"),
            format!("Memory {i}"),
            position,
            CARD,
        ))?;
    }

    let mut graph = ConnectionGraph::new();
    for i in 1..node_count {
        let from = PortId::new(NodeId::from(format!("memory-{}", i - 1)), PortAnchor::Right);
        let to = PortId::new(NodeId::from(format!("memory-{i}")), PortAnchor::Left);
        let (Some(from_pos), Some(to_pos)) = (resolve_port(&nodes, &from), resolve_port(&nodes, &to))
        else {
            anyhow::bail!("missing port for pathway {i}");
        };
        graph.register(from, to, from_pos, to_pos, 0.0015)?;
    }

    Ok((nodes, graph))
}

/// Viewport large enough to hold a constellation of `node_count` cards.
pub fn viewport_for(node_count: usize) -> Vec2 {
    let rows = node_count.div_ceil(COLUMNS).max(1);
    Vec2::new(
        COLUMNS as f32 * (CARD.x + 60.0),
        rows as f32 * (CARD.y + 60.0),
    )
}
