use mindfull_core::{NodeId, PortId};
use mindfull_events::RejectReason;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("Memory node already mounted: {0}")]
    DuplicateNode(NodeId),
    #[error("Memory node not mounted: {0}")]
    UnknownNode(NodeId),
}

/// Why the graph store refused to register a pathway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("Cannot connect memory {0} to itself")]
    SelfConnection(NodeId),
    #[error("A pathway already exists between {a} and {b}")]
    AlreadyConnected { a: NodeId, b: NodeId },
    #[error("Port is not mounted: {0}")]
    UnknownPort(PortId),
}

impl ConnectError {
    pub fn reason(&self) -> RejectReason {
        match self {
            ConnectError::SelfConnection(_) => RejectReason::SelfConnection,
            ConnectError::AlreadyConnected { .. } => RejectReason::AlreadyConnected,
            ConnectError::UnknownPort(_) => RejectReason::UnknownPort,
        }
    }
}
