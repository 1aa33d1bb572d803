//! Traveling-light animation for every pathway on the canvas.
//!
//! The engine is frame-coupled: each [`ParticleEngine::tick`] adds fixed
//! increments to progress and phase, scaled only by
//! [`AnimationSettings::animation_speed`]. Geometry is resolved fresh from the
//! node store on every pass, so a node moved between frames is picked up on
//! the next write.

use crate::geometry::resolve_port;
use crate::graph::{Connection, ConnectionGraph};
use crate::node::NodeStore;
use crate::settings::{AnimationSettings, WrapMode};
use mindfull_core::{Color, Vec2};

/// Advance a progress value by `increment`, keeping it in `[0, 1)`.
pub fn advance_progress(progress: f32, increment: f32, wrap: WrapMode) -> f32 {
    let next = progress + increment;
    if next < 1.0 {
        return next.max(0.0);
    }
    match wrap {
        WrapMode::Reset => 0.0,
        WrapMode::Carry => next % 1.0,
    }
}

/// Map an oscillator phase onto `[0, 1]`.
pub fn pulse_intensity(phase: f32) -> f32 {
    (phase.sin() + 1.0) / 2.0
}

/// Opacity multiplier that fades the particle in over the first `distance`
/// of the path and out over the last `distance`.
pub fn fade_envelope(progress: f32, distance: f32) -> f32 {
    if distance <= 0.0 {
        return 1.0;
    }
    let value = if progress < distance {
        progress / distance
    } else if progress > 1.0 - distance {
        (1.0 - progress) / distance
    } else {
        1.0
    };
    value.clamp(0.0, 1.0)
}

/// Progress at which the comet tail starts, `trail_px` behind the particle.
fn trail_start(progress: f32, path_length: f32, trail_px: f32) -> f32 {
    if path_length <= f32::EPSILON {
        return progress;
    }
    (progress - trail_px / path_length).max(0.0)
}

#[derive(Debug, Clone, Default)]
pub struct ParticleEngine {
    settings: AnimationSettings,
    ticks: u64,
}

impl ParticleEngine {
    pub fn new(settings: AnimationSettings) -> Self {
        Self { settings, ticks: 0 }
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One complete pass over every connection: advance progress and both
    /// phases, then rewrite all four primitives from current geometry.
    /// Returns how many connections were rendered.
    pub fn tick(&mut self, nodes: &NodeStore, graph: &mut ConnectionGraph) -> usize {
        let multiplier = self.settings.effective_multiplier();
        let mut rendered = 0;

        for connection in graph.iter_mut() {
            connection.progress = advance_progress(
                connection.progress,
                connection.speed * multiplier,
                self.settings.wrap,
            );
            connection.pulse_phase += self.settings.pulse_increment * multiplier;
            connection.halo_phase += self.settings.halo_increment * multiplier;

            if self.render(nodes, connection) {
                rendered += 1;
            }
        }

        self.ticks += 1;
        tracing::trace!(
            tick = self.ticks,
            connections = graph.len(),
            rendered,
            "Animation tick"
        );
        rendered
    }

    /// Rewrite primitives from current geometry without advancing any
    /// animation state. Used right after a node moves so its pathways follow
    /// within the same frame.
    pub fn refresh_geometry(&self, nodes: &NodeStore, graph: &mut ConnectionGraph) {
        for connection in graph.iter_mut() {
            self.render(nodes, connection);
        }
    }

    fn render(&self, nodes: &NodeStore, connection: &mut Connection) -> bool {
        let (Some(from), Some(to)) = (
            resolve_port(nodes, &connection.from),
            resolve_port(nodes, &connection.to),
        ) else {
            tracing::debug!(
                pathway = %connection.id,
                from = %connection.from,
                to = %connection.to,
                "Skipping pathway with unmounted port"
            );
            return false;
        };

        let s = &self.settings;
        let progress = connection.progress;
        let particle_pos = from.lerp(to, progress);
        let angle = (to - from).angle_degrees();
        let path_length = from.distance(to);

        let visuals = &mut connection.visuals;
        visuals.glow_line.start = from;
        visuals.glow_line.end = to;

        let tail = trail_start(progress, path_length, s.trail_length_px);
        visuals.trail.start = from.lerp(to, tail);
        visuals.trail.end = particle_pos;
        let trail_alpha =
            (connection.pulse_phase.sin() * s.trail_alpha_swing + s.trail_alpha_base).clamp(0.0, 1.0);
        visuals.trail.stroke = Color::NEURAL_BLUE.with_alpha(trail_alpha);

        let fade = fade_envelope(progress, s.fade_distance);

        let intensity = pulse_intensity(connection.pulse_phase);
        let (rx, ry) = s.particle.radii_at(intensity);
        let brightness = s.particle_min_brightness + (1.0 - s.particle_min_brightness) * intensity;
        let particle = &mut visuals.particle;
        particle.center = particle_pos;
        particle.rotation_deg = angle;
        particle.rx = rx;
        particle.ry = ry;
        particle.fill = Color::WHITE.with_alpha(brightness);
        particle.glow = Some((
            s.glow_base_px + s.glow_swing_px * intensity,
            Color::NEURAL_BLUE.with_alpha(brightness),
        ));
        particle.opacity = fade * brightness;

        let halo_intensity = pulse_intensity(connection.halo_phase);
        let (halo_rx, halo_ry) = s.halo.radii_at(halo_intensity);
        let halo_opacity =
            s.halo_min_opacity + (s.halo_max_opacity - s.halo_min_opacity) * halo_intensity;
        let halo = &mut visuals.halo;
        halo.center = particle_pos;
        halo.rotation_deg = angle;
        halo.rx = halo_rx;
        halo.ry = halo_ry;
        halo.opacity = fade * halo_opacity;

        true
    }

    /// Particle position for a given progress along `from`-`to`.
    pub fn particle_position(from: Vec2, to: Vec2, progress: f32) -> Vec2 {
        from.lerp(to, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::MemoryNode;
    use mindfull_core::{PortAnchor, PortId};

    fn two_cards() -> NodeStore {
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

    fn connected(nodes: &NodeStore) -> ConnectionGraph {
        let mut graph = ConnectionGraph::new();
        let from = PortId::new("memory-a", PortAnchor::Right);
        let to = PortId::new("memory-b", PortAnchor::Left);
        let from_pos = resolve_port(nodes, &from).unwrap();
        let to_pos = resolve_port(nodes, &to).unwrap();
        graph.register(from, to, from_pos, to_pos, 0.0015).unwrap();
        graph
    }

    #[test]
    fn test_reset_wrap_drops_overshoot() {
        assert_eq!(advance_progress(0.9996, 0.0015, WrapMode::Reset), 0.0);
        assert!((advance_progress(0.5, 0.0015, WrapMode::Reset) - 0.5015).abs() < 1e-6);
    }

    #[test]
    fn test_carry_wrap_keeps_overshoot() {
        let progress = advance_progress(0.9996, 0.0015, WrapMode::Carry);
        assert!((progress - 0.0011).abs() < 1e-5, "got {progress}");
    }

    #[test]
    fn test_fade_envelope_shape() {
        assert_eq!(fade_envelope(0.0, 0.15), 0.0);
        assert!((fade_envelope(0.075, 0.15) - 0.5).abs() < 1e-6);
        assert_eq!(fade_envelope(0.15, 0.15), 1.0);
        assert_eq!(fade_envelope(0.5, 0.15), 1.0);
        assert!((fade_envelope(0.85, 0.15) - 1.0).abs() < 1e-6);
        assert!(fade_envelope(0.9999, 0.15) < 0.001);
    }

    #[test]
    fn test_pulse_intensity_range() {
        assert_eq!(pulse_intensity(0.0), 0.5);
        assert!((pulse_intensity(std::f32::consts::FRAC_PI_2) - 1.0).abs() < 1e-6);
        assert!(pulse_intensity(-std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_tick_advances_state() {
        let nodes = two_cards();
        let mut graph = connected(&nodes);
        let mut engine = ParticleEngine::default();

        assert_eq!(engine.tick(&nodes, &mut graph), 1);
        let connection = graph.iter().next().unwrap();
        assert!((connection.progress - 0.0015).abs() < 1e-7);
        assert!((connection.pulse_phase - 0.03).abs() < 1e-7);
        assert!((connection.halo_phase - 0.05).abs() < 1e-7);
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn test_particle_at_origin_when_progress_zero() {
        let nodes = two_cards();
        let mut graph = connected(&nodes);
        let engine = ParticleEngine::default();
        engine.refresh_geometry(&nodes, &mut graph);

        let connection = graph.iter().next().unwrap();
        assert_eq!(connection.visuals.particle.center, Vec2::new(100.0, 25.0));
        assert_eq!(connection.visuals.particle.opacity, 0.0);
        assert_eq!(connection.visuals.glow_line.end, Vec2::new(300.0, 25.0));
    }

    #[test]
    fn test_particle_approaches_target() {
        let nodes = two_cards();
        let mut graph = connected(&nodes);
        graph.iter_mut().next().unwrap().progress = 0.9999;
        let engine = ParticleEngine::default();
        engine.refresh_geometry(&nodes, &mut graph);

        let particle = &graph.iter().next().unwrap().visuals.particle;
        assert!(particle.center.distance(Vec2::new(300.0, 25.0)) < 0.1);
    }

    #[test]
    fn test_trail_is_twenty_pixels_behind() {
        let nodes = two_cards();
        let mut graph = connected(&nodes);
        graph.iter_mut().next().unwrap().progress = 0.5;
        ParticleEngine::default().refresh_geometry(&nodes, &mut graph);

        let trail = &graph.iter().next().unwrap().visuals.trail;
        assert!((trail.length() - 20.0).abs() < 1e-3);
        assert_eq!(trail.end, Vec2::new(200.0, 25.0));
    }

    #[test]
    fn test_trail_clamped_at_path_start() {
        let nodes = two_cards();
        let mut graph = connected(&nodes);
        graph.iter_mut().next().unwrap().progress = 0.01;
        ParticleEngine::default().refresh_geometry(&nodes, &mut graph);

        let trail = &graph.iter().next().unwrap().visuals.trail;
        assert_eq!(trail.start, Vec2::new(100.0, 25.0));
    }

    #[test]
    fn test_zero_length_path_is_stable() {
        let mut nodes = NodeStore::new();
        let size = Vec2::new(100.0, 50.0);
        nodes
            .insert(MemoryNode::new("memory-a", "A", Vec2::new(0.0, 0.0), size))
            .unwrap();
        // Left edge of B sits exactly on the right edge of A
        nodes
            .insert(MemoryNode::new("memory-b", "B", Vec2::new(100.0, 0.0), size))
            .unwrap();
        let mut graph = connected(&nodes);
        let mut engine = ParticleEngine::default();

        for _ in 0..10 {
            engine.tick(&nodes, &mut graph);
        }
        let visuals = &graph.iter().next().unwrap().visuals;
        assert_eq!(visuals.trail.length(), 0.0);
        assert!(visuals.particle.center.x.is_finite());
        assert_eq!(visuals.particle.rotation_deg, 0.0);
    }

    #[test]
    fn test_animation_speed_scales_increments() {
        let nodes = two_cards();
        let mut graph = connected(&nodes);
        let mut engine = ParticleEngine::new(AnimationSettings {
            animation_speed: 2.0,
            ..Default::default()
        });
        engine.tick(&nodes, &mut graph);

        let connection = graph.iter().next().unwrap();
        assert!((connection.progress - 0.003).abs() < 1e-7);
        assert!((connection.halo_phase - 0.1).abs() < 1e-7);
    }

    #[test]
    fn test_particle_pulse_values() {
        let nodes = two_cards();
        let mut graph = connected(&nodes);
        {
            let connection = graph.iter_mut().next().unwrap();
            connection.progress = 0.5;
            connection.pulse_phase = std::f32::consts::FRAC_PI_2;
            connection.halo_phase = -std::f32::consts::FRAC_PI_2;
        }
        ParticleEngine::default().refresh_geometry(&nodes, &mut graph);

        let visuals = &graph.iter().next().unwrap().visuals;
        assert!((visuals.particle.rx - 12.0).abs() < 1e-4);
        assert!((visuals.particle.ry - 6.0).abs() < 1e-4);
        assert!((visuals.particle.opacity - 1.0).abs() < 1e-4);
        let (glow, _) = visuals.particle.glow.unwrap();
        assert!((glow - 16.0).abs() < 1e-4);
        assert!((visuals.halo.rx - 16.0).abs() < 1e-4);
        assert!((visuals.halo.opacity - 0.1).abs() < 1e-4);
        // Trail alpha would be 1.1 here; strokes saturate at 1
        assert_eq!(visuals.trail.stroke.a, 1.0);
    }
}
