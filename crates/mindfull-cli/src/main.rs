use anyhow::{Context, Result};
use clap::Parser;
use mindfull_canvas::{CanvasController, CanvasSettings, FrameScheduler, MutedAwareAudio, Scene};
use mindfull_core::{NodeId, PortAnchor, PortId, Vec2};
use mindfull_events::{Event, InputEvent};
use mindfull_storage::MemoryStore;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Run the constellation canvas headlessly: mount the journal's memories,
/// replay pointer input, animate, and report what happened.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of animation frames to run after the input is replayed
    #[arg(short, long, default_value_t = 240)]
    frames: u64,

    /// Canvas settings JSON (missing fields keep their defaults)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// JSON array of input events to replay instead of the built-in demo
    #[arg(long)]
    script: Option<PathBuf>,

    /// Drag a pathway between two ports, e.g. `memory-1#right=memory-2#left`.
    /// Repeatable; replaces the built-in demo
    #[arg(long, value_name = "FROM=TO", value_parser = parse_link, conflicts_with = "script")]
    connect: Vec<(PortId, PortId)>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1200.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Print the final scene and event transcript as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    events: Vec<Event>,
    scene: Scene,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => CanvasSettings::from_json_file(path)?,
        None => CanvasSettings::default(),
    };
    let store = MemoryStore::with_defaults();
    let mut canvas = CanvasController::new(settings, Vec2::new(args.width, args.height))
        .with_audio(MutedAwareAudio::default());
    canvas.mount_grid(store.card_labels())?;

    let script = match &args.script {
        Some(path) => load_script(path)?,
        None if !args.connect.is_empty() => link_script(&canvas, &args.connect)?,
        None => demo_script(&canvas, &store.card_labels()),
    };
    tracing::info!(events = script.len(), "Replaying input");
    for event in &script {
        canvas.handle_input(event);
    }

    let mut scheduler = FrameScheduler::new();
    let ran = scheduler.run_frames(&mut canvas, args.frames);
    let events = canvas.events().drain();

    if args.json {
        let report = Report {
            events,
            scene: canvas.scene(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for event in &events {
        println!("{}", describe(event));
    }
    println!(
        "Ran {} frames: {} memories, {} pathways.",
        ran,
        canvas.nodes().len(),
        canvas.graph().len()
    );
    for connection in canvas.graph().iter() {
        println!(
            "  {} {} -> {} progress {:.4}",
            connection.id, connection.from, connection.to, connection.progress
        );
    }

    Ok(())
}

fn load_script(path: &Path) -> Result<Vec<InputEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input script {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse input script {}", path.display()))
}

fn parse_link(s: &str) -> Result<(PortId, PortId)> {
    let (from, to) = s
        .split_once('=')
        .with_context(|| format!("Expected FROM=TO, got {s}"))?;
    Ok((from.trim().parse()?, to.trim().parse()?))
}

fn link_script(
    canvas: &CanvasController,
    links: &[(PortId, PortId)],
) -> Result<Vec<InputEvent>> {
    let position = |port: &PortId| {
        canvas
            .port_position(port)
            .with_context(|| format!("Port {port} is not on the canvas"))
    };
    let mut script = Vec::with_capacity(links.len() * 3);
    for (from, to) in links {
        script.extend(gesture(position(from)?, position(to)?));
    }
    Ok(script)
}

/// Press on `from`, move to `to`, release.
fn gesture(from: Vec2, to: Vec2) -> [InputEvent; 3] {
    [
        InputEvent::press(from.x, from.y),
        InputEvent::move_to(to.x, to.y),
        InputEvent::release(to.x, to.y),
    ]
}

/// Connect the first two memories, then try a self-connection and a reverse
/// duplicate, then drag the first card off the right edge.
fn demo_script(canvas: &CanvasController, cards: &[(NodeId, String)]) -> Vec<InputEvent> {
    let [(a, _), (b, _), ..] = cards else {
        return Vec::new();
    };
    let port = |node: &NodeId, anchor| canvas.port_position(&PortId::new(node.clone(), anchor));
    let (
        Some(a_right),
        Some(a_bottom),
        Some(a_top),
        Some(b_left),
        Some(b_top),
        Some(a_node),
    ) = (
        port(a, PortAnchor::Right),
        port(a, PortAnchor::Bottom),
        port(a, PortAnchor::Top),
        port(b, PortAnchor::Left),
        port(b, PortAnchor::Top),
        canvas.nodes().get(a).map(|n| n.rect().center()),
    )
    else {
        return Vec::new();
    };

    let mut script = Vec::new();
    script.extend(gesture(a_right, b_left));
    script.extend(gesture(a_right, a_bottom));
    script.extend(gesture(b_top, a_top));
    script.extend(gesture(
        a_node,
        Vec2::new(canvas.viewport().x + 500.0, a_node.y + 120.0),
    ));
    script
}

fn describe(event: &Event) -> String {
    match event {
        Event::NodeDragStarted { node } => format!("drag started: {node}"),
        Event::NodeMoved { node, x, y } => format!("moved: {node} to ({x:.1}, {y:.1})"),
        Event::NodeDragEnded { node } => format!("drag ended: {node}"),
        Event::ConnectionDragStarted { port } => format!("connecting from {port}"),
        Event::PathwayCreated { id, from, to } => format!("created {id}: {from} -> {to}"),
        Event::PathwayRejected { from, to, reason } => {
            format!("rejected {from} -> {to}: {reason}")
        }
        Event::ConnectionCancelled { from } => format!("cancelled connection from {from}"),
        Event::PathwayRemoved { id } => format!("removed {id}"),
        Event::SoundFailed { effect, error } => format!("sound {effect} failed: {error}"),
    }
}
