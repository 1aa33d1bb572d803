use crate::animation::ParticleEngine;
use crate::audio::{NullAudio, SoundEffect, SoundEffects};
use crate::connect::{DropOutcome, PortConnectionManager};
use crate::drag::{NodeDragController, clamp_to_viewport};
use crate::error::CanvasError;
use crate::geometry::resolve_port;
use crate::graph::{Connection, ConnectionGraph};
use crate::hit_tester::{HitResult, HitTester};
use crate::layout::GridLayouter;
use crate::node::{MemoryNode, NodeStore};
use crate::scene::Scene;
use crate::scheduler::FrameTask;
use crate::settings::CanvasSettings;
use crate::visuals::{LinePrimitive, PortVisualState};
use mindfull_core::{ConnectionId, NodeId, PortId, Vec2};
use mindfull_events::{Event, EventBus, InputEvent, PointerButton};

/// Owns all canvas state and routes pointer input to the drag and connection
/// state machines.
///
/// Single-threaded: input handling and frame ticks both take `&mut self`, so
/// they can never interleave.
pub struct CanvasController {
    settings: CanvasSettings,
    viewport: Vec2,
    nodes: NodeStore,
    graph: ConnectionGraph,
    drag: NodeDragController,
    connect: PortConnectionManager,
    engine: ParticleEngine,
    hit_tester: HitTester,
    audio: Box<dyn SoundEffects>,
    bus: EventBus,
}

impl CanvasController {
    pub fn new(settings: CanvasSettings, viewport: Vec2) -> Self {
        let engine = ParticleEngine::new(settings.animation.clone());
        let hit_tester = HitTester::new(settings.port_size, settings.pathway_hit_tolerance);
        Self {
            settings,
            viewport,
            nodes: NodeStore::new(),
            graph: ConnectionGraph::new(),
            drag: NodeDragController::new(),
            connect: PortConnectionManager::new(),
            engine,
            hit_tester,
            audio: Box::new(NullAudio),
            bus: EventBus::new(),
        }
    }

    pub fn with_audio(mut self, audio: impl SoundEffects + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    /// Mount a memory card at `position` (clamped into the viewport) with the
    /// configured card size.
    pub fn add_node(
        &mut self,
        id: impl Into<NodeId>,
        label: impl Into<String>,
        position: Vec2,
    ) -> Result<(), CanvasError> {
        let size = self.settings.node_size();
        let position = clamp_to_viewport(position, size, self.viewport);
        self.nodes.insert(MemoryNode::new(id, label, position, size))
    }

    /// Mount one card per item, laid out on a grid. Returns how many were
    /// mounted.
    pub fn mount_grid<I>(&mut self, items: I) -> Result<usize, CanvasError>
    where
        I: IntoIterator<Item = (NodeId, String)>,
    {
        let items: Vec<_> = items.into_iter().collect();
        let positions = GridLayouter::default().positions(
            items.len(),
            self.settings.node_size(),
            self.viewport,
        );
        for ((id, label), position) in items.into_iter().zip(positions) {
            self.add_node(id, label, position)?;
        }
        tracing::info!(nodes = self.nodes.len(), "Constellation mounted");
        Ok(self.nodes.len())
    }

    /// Place a card programmatically, with the same clamping and geometry
    /// refresh as a drag.
    pub fn move_node(&mut self, id: &NodeId, position: Vec2) -> Result<Vec2, CanvasError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| CanvasError::UnknownNode(id.clone()))?;
        let position = clamp_to_viewport(position, node.size, self.viewport);
        node.position = position;
        self.refresh_geometry();
        self.bus.publish(Event::NodeMoved {
            node: id.clone(),
            x: position.x,
            y: position.y,
        });
        Ok(position)
    }

    pub fn hit_test(&self, pos: Vec2) -> HitResult {
        self.hit_tester.hit_test(&self.nodes, &self.graph, pos)
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerPressed {
                pos,
                button: PointerButton::Primary,
            } => self.on_primary_press(*pos),
            InputEvent::PointerPressed {
                pos,
                button: PointerButton::Secondary,
            } => self.on_secondary_press(*pos),
            InputEvent::PointerMoved { pos } => self.on_move(*pos),
            InputEvent::PointerReleased { pos } => self.on_release(*pos),
            InputEvent::ViewportResized { width, height } => {
                self.set_viewport(Vec2::new(*width, *height))
            }
        }
    }

    fn on_primary_press(&mut self, pos: Vec2) {
        if self.drag.is_dragging() || self.connect.is_active() {
            return;
        }

        match self.hit_test(pos) {
            HitResult::Port(port) => {
                if self.connect.begin(&self.nodes, port.clone(), pos) {
                    self.bus.publish(Event::ConnectionDragStarted { port });
                }
            }
            HitResult::Node(id) => {
                if let Some(node) = self.nodes.get(&id) {
                    self.drag.begin(node, pos);
                    self.bus.publish(Event::NodeDragStarted { node: id });
                }
            }
            HitResult::Pathway(_) | HitResult::None => {}
        }
    }

    fn on_secondary_press(&mut self, pos: Vec2) {
        if let Some(id) = self.hit_tester.hit_test_pathway(&self.graph, pos) {
            self.remove_connection(id);
        }
    }

    fn on_move(&mut self, pos: Vec2) {
        if self.drag.is_dragging() {
            if let Some((node, position)) = self.drag.drag_to(&mut self.nodes, pos, self.viewport) {
                self.refresh_geometry();
                self.bus.publish(Event::NodeMoved {
                    node,
                    x: position.x,
                    y: position.y,
                });
            }
        } else if self.connect.is_active() {
            let hovered = self.hit_tester.hit_test_port(&self.nodes, pos);
            self.connect.update(&self.nodes, pos, hovered);
        }
    }

    fn on_release(&mut self, pos: Vec2) {
        if let Some(session) = self.drag.end() {
            self.bus.publish(Event::NodeDragEnded { node: session.node });
            return;
        }

        let target = self.hit_tester.hit_test_port(&self.nodes, pos);
        let speed = self.settings.animation.pathway_speed();
        let Some(outcome) = self.connect.finish(&self.nodes, &mut self.graph, target, speed)
        else {
            return;
        };

        match outcome {
            DropOutcome::Committed { id, from, to } => {
                self.engine.refresh_geometry(&self.nodes, &mut self.graph);
                self.bus.publish(Event::PathwayCreated { id, from, to });
                self.play(SoundEffect::Connect);
            }
            DropOutcome::Rejected { from, to, reason } => {
                self.bus.publish(Event::PathwayRejected { from, to, reason });
            }
            DropOutcome::Cancelled { from } => {
                self.bus.publish(Event::ConnectionCancelled { from });
            }
        }
    }

    /// Fire-and-forget: a failing backend is logged and reported, never
    /// propagated.
    fn play(&self, effect: SoundEffect) {
        if let Err(err) = self.audio.play(effect) {
            tracing::error!(effect = %effect, "Failed to play sound effect: {err:#}");
            self.bus.publish(Event::SoundFailed {
                effect: effect.name().to_string(),
                error: format!("{err:#}"),
            });
        }
    }

    /// Advance the animation by one frame.
    pub fn tick(&mut self) -> usize {
        self.engine.tick(&self.nodes, &mut self.graph)
    }

    /// Rewrite every pathway's primitives from current node positions without
    /// advancing the animation.
    pub fn refresh_geometry(&mut self) {
        self.engine.refresh_geometry(&self.nodes, &mut self.graph);
        self.connect.refresh_preview(&self.nodes);
    }

    /// Resize the viewport, pulling any card that no longer fits back inside.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        let mut moved = Vec::new();
        for node in self.nodes.iter_mut() {
            let clamped = clamp_to_viewport(node.position, node.size, viewport);
            if clamped != node.position {
                node.position = clamped;
                moved.push((node.id.clone(), clamped));
            }
        }
        self.refresh_geometry();

        tracing::debug!(
            width = viewport.x,
            height = viewport.y,
            moved = moved.len(),
            "Viewport resized"
        );
        for (node, position) in moved {
            self.bus.publish(Event::NodeMoved {
                node,
                x: position.x,
                y: position.y,
            });
        }
    }

    /// Remove a pathway and its visuals. An in-progress connection drag is
    /// unaffected.
    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let removed = self.graph.remove(id)?;
        tracing::info!(
            pathway = %id,
            from = %removed.from,
            to = %removed.to,
            "Neural pathway removed"
        );
        self.bus.publish(Event::PathwayRemoved { id });
        Some(removed)
    }

    pub fn remove_connections_for_node(&mut self, node: &NodeId) -> Vec<Connection> {
        let removed = self.graph.remove_touching(node);
        for connection in &removed {
            self.bus.publish(Event::PathwayRemoved { id: connection.id });
        }
        if !removed.is_empty() {
            tracing::info!(node = %node, count = removed.len(), "Removed pathways for memory");
        }
        removed
    }

    pub fn port_position(&self, port: &PortId) -> Option<Vec2> {
        resolve_port(&self.nodes, port)
    }

    pub fn port_state(&self, port: &PortId) -> PortVisualState {
        self.connect.port_state(port)
    }

    pub fn preview(&self) -> Option<&LinePrimitive> {
        self.connect.preview()
    }

    pub fn is_dragging_node(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_connecting(&self) -> bool {
        self.connect.is_active()
    }

    pub fn scene(&self) -> Scene {
        let highlighted_ports = self
            .nodes
            .iter()
            .flat_map(|node| node.ports())
            .filter_map(|port| match self.port_state(&port) {
                PortVisualState::Idle => None,
                state => Some((port, state)),
            })
            .collect();

        Scene {
            viewport: self.viewport,
            frame: self.engine.ticks(),
            nodes: self.nodes.iter().cloned().collect(),
            pathways: self.graph.iter().cloned().collect(),
            preview: self.preview().cloned(),
            highlighted_ports,
        }
    }
}

impl FrameTask for CanvasController {
    fn on_frame(&mut self) {
        self.tick();
    }
}
