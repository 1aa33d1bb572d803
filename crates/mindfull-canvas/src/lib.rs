//! Inner Space canvas: draggable memory cards, port-to-port neural pathways
//! and the traveling-light animation that runs along them.
//!
//! Everything here is single-threaded and input-surface agnostic. A host (the
//! egui app, the headless CLI, tests) owns one [`CanvasController`], feeds it
//! typed [`mindfull_events::InputEvent`]s and drives its frames through a
//! [`FrameScheduler`], then reads the render primitives back out.

pub mod animation;
pub mod audio;
pub mod connect;
pub mod controller;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod hit_tester;
pub mod layout;
pub mod node;
pub mod scene;
pub mod scheduler;
pub mod settings;
pub mod visuals;

pub use animation::{ParticleEngine, advance_progress, fade_envelope, pulse_intensity};
pub use audio::{FailingAudio, MutedAwareAudio, NullAudio, RecordingAudio, SoundEffect, SoundEffects};
pub use connect::{ConnectionSession, DropOutcome, PortConnectionManager};
pub use controller::CanvasController;
pub use drag::{NodeDragController, NodeDragSession, clamp_to_viewport};
pub use error::{CanvasError, ConnectError};
pub use geometry::{port_rect, resolve_port};
pub use graph::{Connection, ConnectionGraph};
pub use hit_tester::{HitResult, HitTester};
pub use layout::GridLayouter;
pub use node::{MemoryNode, NodeStore};
pub use scene::Scene;
pub use scheduler::{CancellationToken, FrameScheduler, FrameStatus, FrameTask};
pub use settings::{AnimationSettings, CanvasSettings, PulseRange, WrapMode};
pub use visuals::{EllipsePrimitive, LinePrimitive, PathwayVisuals, PortVisualState};
