use crate::graph::Connection;
use crate::node::MemoryNode;
use crate::visuals::{LinePrimitive, PortVisualState};
use mindfull_core::{PortId, Vec2};
use serde::{Deserialize, Serialize};

/// Everything a renderer needs for one frame, detached from the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub viewport: Vec2,
    pub frame: u64,
    /// Cards in paint order.
    pub nodes: Vec<MemoryNode>,
    pub pathways: Vec<Connection>,
    pub preview: Option<LinePrimitive>,
    /// Ports that are not idle.
    pub highlighted_ports: Vec<(PortId, PortVisualState)>,
}

impl Scene {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn port_state(&self, port: &PortId) -> PortVisualState {
        self.highlighted_ports
            .iter()
            .find(|(p, _)| p == port)
            .map(|(_, state)| *state)
            .unwrap_or_default()
    }
}
