use crate::error::ConnectError;
use crate::geometry::resolve_port;
use crate::graph::ConnectionGraph;
use crate::node::NodeStore;
use crate::visuals::{LinePrimitive, PortVisualState};
use mindfull_core::{ConnectionId, PortId, Vec2};
use mindfull_events::RejectReason;
use mindfull_events::telemetry::{self, GESTURE_CONNECT};

/// A pathway being drawn from a port.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSession {
    pub origin: PortId,
    /// Dashed line from the origin port to the pointer.
    pub preview: LinePrimitive,
    /// Port under the pointer, other than the origin.
    pub hover_target: Option<PortId>,
    pub correlation_id: String,
}

/// How a connection drag ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Committed {
        id: ConnectionId,
        from: PortId,
        to: PortId,
    },
    /// Dropped on another port, but the pathway breaks a graph rule.
    Rejected {
        from: PortId,
        to: PortId,
        reason: RejectReason,
    },
    /// Dropped on empty space, a card body, or back onto the origin port.
    Cancelled { from: PortId },
}

impl DropOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, DropOutcome::Committed { .. })
    }
}

/// Idle → ConnectingFromPort → {Committed | Rejected | Cancelled} → Idle.
#[derive(Debug, Default)]
pub struct PortConnectionManager {
    session: Option<ConnectionSession>,
}

impl PortConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ConnectionSession> {
        self.session.as_ref()
    }

    pub fn preview(&self) -> Option<&LinePrimitive> {
        self.session.as_ref().map(|s| &s.preview)
    }

    /// Start drawing from `origin`. Returns `false` (and stays idle) when the
    /// port's owner is not mounted.
    pub fn begin(&mut self, nodes: &NodeStore, origin: PortId, pointer: Vec2) -> bool {
        let Some(origin_pos) = resolve_port(nodes, &origin) else {
            tracing::debug!(port = %origin, "Ignoring press on unmounted port");
            return false;
        };

        let correlation_id = telemetry::new_correlation_id();
        telemetry::gesture_start(GESTURE_CONNECT, &correlation_id, &origin.element_id());
        self.session = Some(ConnectionSession {
            origin,
            preview: LinePrimitive::preview(origin_pos, pointer),
            hover_target: None,
            correlation_id,
        });
        true
    }

    /// Follow the pointer. `hovered` is the port currently under it, if any.
    pub fn update(&mut self, nodes: &NodeStore, pointer: Vec2, hovered: Option<PortId>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Some(origin_pos) = resolve_port(nodes, &session.origin) {
            session.preview.start = origin_pos;
        }
        session.preview.end = pointer;
        session.hover_target = hovered.filter(|port| port != &session.origin);
    }

    /// Re-anchor the preview on the origin port after a layout change.
    pub fn refresh_preview(&mut self, nodes: &NodeStore) {
        if let Some(session) = self.session.as_mut()
            && let Some(origin_pos) = resolve_port(nodes, &session.origin)
        {
            session.preview.start = origin_pos;
        }
    }

    /// End the drag over `target`, registering the pathway when every rule
    /// holds. Always returns to idle. `None` when no drag was active.
    pub fn finish(
        &mut self,
        nodes: &NodeStore,
        graph: &mut ConnectionGraph,
        target: Option<PortId>,
        speed: f32,
    ) -> Option<DropOutcome> {
        let session = self.session.take()?;
        let from = session.origin;

        let Some(to) = target.filter(|port| port != &from) else {
            telemetry::gesture_cancel(GESTURE_CONNECT, &session.correlation_id, None);
            return Some(DropOutcome::Cancelled { from });
        };

        match Self::commit(nodes, graph, &from, &to, speed) {
            Ok(id) => {
                tracing::info!(
                    pathway = %id,
                    from = %from,
                    to = %to,
                    "Neural pathway created: {} -> {}",
                    from.owner(),
                    to.owner()
                );
                telemetry::gesture_commit(
                    GESTURE_CONNECT,
                    &session.correlation_id,
                    &id.to_string(),
                );
                Some(DropOutcome::Committed { id, from, to })
            }
            Err(err) => {
                tracing::warn!(from = %from, to = %to, "Pathway rejected: {}", err.reason());
                telemetry::gesture_cancel(
                    GESTURE_CONNECT,
                    &session.correlation_id,
                    Some(err.to_string()),
                );
                Some(DropOutcome::Rejected {
                    from,
                    to,
                    reason: err.reason(),
                })
            }
        }
    }

    fn commit(
        nodes: &NodeStore,
        graph: &mut ConnectionGraph,
        from: &PortId,
        to: &PortId,
        speed: f32,
    ) -> Result<ConnectionId, ConnectError> {
        graph.validate(from, to)?;
        let from_pos =
            resolve_port(nodes, from).ok_or_else(|| ConnectError::UnknownPort(from.clone()))?;
        let to_pos = resolve_port(nodes, to).ok_or_else(|| ConnectError::UnknownPort(to.clone()))?;
        graph.register(from.clone(), to.clone(), from_pos, to_pos, speed)
    }

    pub fn port_state(&self, port: &PortId) -> PortVisualState {
        match &self.session {
            Some(session) if &session.origin == port => PortVisualState::Active,
            Some(session) if session.hover_target.as_ref() == Some(port) => {
                PortVisualState::HoverTarget
            }
            _ => PortVisualState::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::MemoryNode;
    use mindfull_core::{NodeId, PortAnchor};

    fn nodes() -> NodeStore {
        let mut nodes = NodeStore::new();
        let size = Vec2::new(100.0, 50.0);
        nodes
            .insert(MemoryNode::new("memory-a", "A", Vec2::new(0.0, 0.0), size))
            .unwrap();
        nodes
            .insert(MemoryNode::new("memory-b", "B", Vec2::new(300.0, 0.0), size))
            .unwrap();
        nodes
    }

    fn a_right() -> PortId {
        PortId::new("memory-a", PortAnchor::Right)
    }

    fn b_left() -> PortId {
        PortId::new("memory-b", PortAnchor::Left)
    }

    #[test]
    fn test_begin_creates_preview() {
        let nodes = nodes();
        let mut manager = PortConnectionManager::new();
        assert!(manager.begin(&nodes, a_right(), Vec2::new(101.0, 26.0)));

        let preview = manager.preview().unwrap();
        assert_eq!(preview.start, Vec2::new(100.0, 25.0));
        assert_eq!(preview.dash, Some((6.0, 6.0)));
        assert_eq!(manager.port_state(&a_right()), PortVisualState::Active);
    }

    #[test]
    fn test_begin_on_unmounted_port() {
        let nodes = nodes();
        let mut manager = PortConnectionManager::new();
        assert!(!manager.begin(&nodes, PortId::new("memory-x", PortAnchor::Top), Vec2::ZERO));
        assert!(!manager.is_active());
    }

    #[test]
    fn test_update_tracks_hover_target() {
        let nodes = nodes();
        let mut manager = PortConnectionManager::new();
        manager.begin(&nodes, a_right(), Vec2::new(100.0, 25.0));

        manager.update(&nodes, Vec2::new(300.0, 25.0), Some(b_left()));
        assert_eq!(manager.preview().unwrap().end, Vec2::new(300.0, 25.0));
        assert_eq!(manager.port_state(&b_left()), PortVisualState::HoverTarget);

        // The origin port is never its own hover target
        manager.update(&nodes, Vec2::new(100.0, 25.0), Some(a_right()));
        assert_eq!(manager.session().unwrap().hover_target, None);
        assert_eq!(manager.port_state(&b_left()), PortVisualState::Idle);
    }

    #[test]
    fn test_commit() {
        let nodes = nodes();
        let mut graph = ConnectionGraph::new();
        let mut manager = PortConnectionManager::new();
        manager.begin(&nodes, a_right(), Vec2::new(100.0, 25.0));

        let outcome = manager
            .finish(&nodes, &mut graph, Some(b_left()), 0.0015)
            .unwrap();
        assert!(outcome.is_committed());
        assert_eq!(graph.len(), 1);
        assert!(!manager.is_active());
        assert_eq!(manager.port_state(&a_right()), PortVisualState::Idle);
    }

    #[test]
    fn test_drop_on_empty_space_cancels() {
        let nodes = nodes();
        let mut graph = ConnectionGraph::new();
        let mut manager = PortConnectionManager::new();
        manager.begin(&nodes, a_right(), Vec2::new(100.0, 25.0));

        let outcome = manager.finish(&nodes, &mut graph, None, 0.0015).unwrap();
        assert_eq!(outcome, DropOutcome::Cancelled { from: a_right() });
        assert!(graph.is_empty());
        assert!(manager.preview().is_none());
    }

    #[test]
    fn test_drop_on_origin_port_cancels() {
        let nodes = nodes();
        let mut graph = ConnectionGraph::new();
        let mut manager = PortConnectionManager::new();
        manager.begin(&nodes, a_right(), Vec2::new(100.0, 25.0));

        let outcome = manager
            .finish(&nodes, &mut graph, Some(a_right()), 0.0015)
            .unwrap();
        assert!(matches!(outcome, DropOutcome::Cancelled { .. }));
    }

    #[test]
    fn test_same_node_rejected() {
        let nodes = nodes();
        let mut graph = ConnectionGraph::new();
        let mut manager = PortConnectionManager::new();
        manager.begin(&nodes, a_right(), Vec2::new(100.0, 25.0));

        let target = PortId::new("memory-a", PortAnchor::Bottom);
        let outcome = manager
            .finish(&nodes, &mut graph, Some(target.clone()), 0.0015)
            .unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Rejected {
                from: a_right(),
                to: target,
                reason: RejectReason::SelfConnection,
            }
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn test_unmounted_target_rejected() {
        let nodes = nodes();
        let mut graph = ConnectionGraph::new();
        let mut manager = PortConnectionManager::new();
        manager.begin(&nodes, a_right(), Vec2::new(100.0, 25.0));

        let outcome = manager
            .finish(
                &nodes,
                &mut graph,
                Some(PortId::new("memory-gone", PortAnchor::Left)),
                0.0015,
            )
            .unwrap();
        assert!(matches!(
            outcome,
            DropOutcome::Rejected {
                reason: RejectReason::UnknownPort,
                ..
            }
        ));
        assert!(!graph.are_connected(&NodeId::new("memory-a"), &NodeId::new("memory-gone")));
    }

    #[test]
    fn test_finish_while_idle() {
        let nodes = nodes();
        let mut graph = ConnectionGraph::new();
        let mut manager = PortConnectionManager::new();
        assert!(manager.finish(&nodes, &mut graph, Some(b_left()), 0.0015).is_none());
    }
}
