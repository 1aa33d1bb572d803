use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod color;
pub mod error;
pub mod geometry;

pub use color::Color;
pub use error::IdParseError;
pub use geometry::{Rect, Vec2};

/// Separator between a node id and a port anchor in a port element id,
/// e.g. `memory-17#right`.
pub const PORT_ID_SEPARATOR: char = '#';

/// Stable element identity of a memory card.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pathway-{}", self.0)
    }
}

/// Which edge of a memory card a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PortAnchor {
    Top,
    Right,
    Bottom,
    Left,
}

impl PortAnchor {
    pub const ALL: [PortAnchor; 4] = [
        PortAnchor::Top,
        PortAnchor::Right,
        PortAnchor::Bottom,
        PortAnchor::Left,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PortAnchor::Top => "top",
            PortAnchor::Right => "right",
            PortAnchor::Bottom => "bottom",
            PortAnchor::Left => "left",
        }
    }
}

impl FromStr for PortAnchor {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(PortAnchor::Top),
            "right" => Ok(PortAnchor::Right),
            "bottom" => Ok(PortAnchor::Bottom),
            "left" => Ok(PortAnchor::Left),
            other => Err(IdParseError::UnknownAnchor(other.to_string())),
        }
    }
}

/// A connection port. Ownership is part of the identity: the owning node is
/// always recoverable from the port itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortId {
    pub node: NodeId,
    pub anchor: PortAnchor,
}

impl PortId {
    pub fn new(node: impl Into<NodeId>, anchor: PortAnchor) -> Self {
        Self {
            node: node.into(),
            anchor,
        }
    }

    pub fn owner(&self) -> &NodeId {
        &self.node
    }

    /// Element id used by renderers, e.g. `memory-17#right`.
    pub fn element_id(&self) -> String {
        format!("{}{}{}", self.node, PORT_ID_SEPARATOR, self.anchor.label())
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element_id())
    }
}

impl FromStr for PortId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (node, anchor) = s
            .rsplit_once(PORT_ID_SEPARATOR)
            .ok_or_else(|| IdParseError::MissingSeparator(s.to_string()))?;
        if node.is_empty() {
            return Err(IdParseError::EmptyNode(s.to_string()));
        }
        Ok(PortId {
            node: NodeId::new(node),
            anchor: anchor.parse()?,
        })
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
