use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens to a particle's progress once it reaches the end of its
/// pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WrapMode {
    /// Snap back to exactly 0; the overshoot is dropped.
    #[default]
    Reset,
    /// Keep the overshoot, so the particle re-enters at `progress - 1`.
    Carry,
}

/// Base and peak radii of a pulsing ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseRange {
    pub base_rx: f32,
    pub max_rx: f32,
    pub base_ry: f32,
    pub max_ry: f32,
}

impl PulseRange {
    pub fn radii_at(&self, intensity: f32) -> (f32, f32) {
        (
            self.base_rx + (self.max_rx - self.base_rx) * intensity,
            self.base_ry + (self.max_ry - self.base_ry) * intensity,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Progress added per frame tick.
    pub speed: f32,
    /// Per-frame multiplier applied to every increment (speed and phases).
    pub animation_speed: f32,
    pub wrap: WrapMode,
    pub pulse_increment: f32,
    pub halo_increment: f32,
    pub trail_length_px: f32,
    pub trail_alpha_base: f32,
    pub trail_alpha_swing: f32,
    /// Share of the path over which the particle fades in (and out).
    pub fade_distance: f32,
    pub particle: PulseRange,
    pub particle_min_brightness: f32,
    pub glow_base_px: f32,
    pub glow_swing_px: f32,
    pub halo: PulseRange,
    pub halo_min_opacity: f32,
    pub halo_max_opacity: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            speed: 0.0015,
            animation_speed: 1.0,
            wrap: WrapMode::Reset,
            pulse_increment: 0.03,
            halo_increment: 0.05,
            trail_length_px: 20.0,
            trail_alpha_base: 0.8,
            trail_alpha_swing: 0.3,
            fade_distance: 0.15,
            particle: PulseRange {
                base_rx: 8.0,
                max_rx: 12.0,
                base_ry: 4.0,
                max_ry: 6.0,
            },
            particle_min_brightness: 0.6,
            glow_base_px: 8.0,
            glow_swing_px: 8.0,
            halo: PulseRange {
                base_rx: 16.0,
                max_rx: 24.0,
                base_ry: 10.0,
                max_ry: 14.0,
            },
            halo_min_opacity: 0.1,
            halo_max_opacity: 0.4,
        }
    }
}

impl AnimationSettings {
    /// Speed handed to newly created pathways. Non-positive or non-finite
    /// values fall back to the default, since a pathway must always move.
    pub fn pathway_speed(&self) -> f32 {
        if self.speed.is_finite() && self.speed > 0.0 {
            self.speed
        } else {
            tracing::warn!(speed = self.speed, "Invalid pathway speed, using default");
            Self::default().speed
        }
    }

    pub fn effective_multiplier(&self) -> f32 {
        if self.animation_speed.is_finite() && self.animation_speed > 0.0 {
            self.animation_speed
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub node_width: f32,
    pub node_height: f32,
    /// Side of the square hit box around each port anchor.
    pub port_size: f32,
    /// Distance in pixels within which a press counts as hitting a pathway.
    pub pathway_hit_tolerance: f32,
    pub animation: AnimationSettings,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            node_width: 220.0,
            node_height: 140.0,
            port_size: 14.0,
            pathway_hit_tolerance: 6.0,
            animation: AnimationSettings::default(),
        }
    }
}

impl CanvasSettings {
    pub fn node_size(&self) -> mindfull_core::Vec2 {
        mindfull_core::Vec2::new(self.node_width, self.node_height)
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("Failed to parse canvas settings")
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read canvas settings from {}", path.display()))?;
        Self::from_json_str(&content)
    }
}
