use crossbeam_channel::{Receiver, Sender, unbounded};
use mindfull_core::{ConnectionId, NodeId, PortId, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod telemetry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

/// Typed pointer phases consumed by the canvas state machines.
///
/// Positions are in viewport pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerPressed { pos: Vec2, button: PointerButton },
    PointerMoved { pos: Vec2 },
    PointerReleased { pos: Vec2 },
    ViewportResized { width: f32, height: f32 },
}

impl InputEvent {
    pub fn press(x: f32, y: f32) -> Self {
        InputEvent::PointerPressed {
            pos: Vec2::new(x, y),
            button: PointerButton::Primary,
        }
    }

    pub fn secondary_press(x: f32, y: f32) -> Self {
        InputEvent::PointerPressed {
            pos: Vec2::new(x, y),
            button: PointerButton::Secondary,
        }
    }

    pub fn move_to(x: f32, y: f32) -> Self {
        InputEvent::PointerMoved {
            pos: Vec2::new(x, y),
        }
    }

    pub fn release(x: f32, y: f32) -> Self {
        InputEvent::PointerReleased {
            pos: Vec2::new(x, y),
        }
    }
}

/// Why a dropped connection was not committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    SelfConnection,
    AlreadyConnected,
    UnknownPort,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfConnection => write!(f, "cannot connect a memory to itself"),
            Self::AlreadyConnected => write!(f, "a pathway already exists between these memories"),
            Self::UnknownPort => write!(f, "port is not mounted on the canvas"),
        }
    }
}

/// Outcomes published by the canvas for anything listening (toasts, the CLI
/// transcript, tests).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    NodeDragStarted {
        node: NodeId,
    },
    NodeMoved {
        node: NodeId,
        x: f32,
        y: f32,
    },
    NodeDragEnded {
        node: NodeId,
    },
    ConnectionDragStarted {
        port: PortId,
    },
    PathwayCreated {
        id: ConnectionId,
        from: PortId,
        to: PortId,
    },
    PathwayRejected {
        from: PortId,
        to: PortId,
        reason: RejectReason,
    },
    ConnectionCancelled {
        from: PortId,
    },
    PathwayRemoved {
        id: ConnectionId,
    },
    SoundFailed {
        effect: String,
        error: String,
    },
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    /// Drain everything published so far without blocking.
    pub fn drain(&self) -> Vec<Event> {
        self.rx.try_iter().collect()
    }

    /// Dispatch all pending events to a listener.
    /// This is useful for processing events in the UI loop.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }
}

/// Trait for components that respond to events.
/// Implement this to receive events from the EventBus.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}
