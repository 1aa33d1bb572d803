use mindfull_core::{Color, Vec2};
use serde::{Deserialize, Serialize};

pub const GLOW_LINE_STROKE: Color = Color::rgba(102, 126, 234, 0.3);
pub const GLOW_LINE_WIDTH: f32 = 8.0;
pub const TRAIL_WIDTH: f32 = 10.0;
pub const TRAIL_BLUR: f32 = 6.0;
pub const PARTICLE_INITIAL_GLOW: f32 = 6.0;
pub const HALO_FILL: Color = Color::rgba(102, 126, 234, 0.3);
pub const HALO_BLUR: f32 = 8.0;
pub const PREVIEW_STROKE: Color = Color::rgba(102, 126, 234, 0.5);
pub const PREVIEW_WIDTH: f32 = 4.0;
pub const PREVIEW_DASH: (f32, f32) = (6.0, 6.0);

/// Interaction highlight of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PortVisualState {
    #[default]
    Idle,
    /// Origin of the pathway currently being drawn.
    Active,
    /// Candidate drop target under the pointer.
    HoverTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub start: Vec2,
    pub end: Vec2,
    pub stroke: Color,
    pub width: f32,
    pub round_cap: bool,
    pub blur: f32,
    /// Dash and gap length, for dashed strokes.
    pub dash: Option<(f32, f32)>,
}

impl LinePrimitive {
    pub fn solid(start: Vec2, end: Vec2, stroke: Color, width: f32) -> Self {
        Self {
            start,
            end,
            stroke,
            width,
            round_cap: false,
            blur: 0.0,
            dash: None,
        }
    }

    /// The dashed line following the pointer while a pathway is drawn.
    pub fn preview(start: Vec2, end: Vec2) -> Self {
        Self {
            dash: Some(PREVIEW_DASH),
            ..Self::solid(start, end, PREVIEW_STROKE, PREVIEW_WIDTH)
        }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipsePrimitive {
    pub center: Vec2,
    /// Radius along the direction of travel.
    pub rx: f32,
    /// Radius across the direction of travel.
    pub ry: f32,
    pub rotation_deg: f32,
    pub fill: Color,
    pub opacity: f32,
    pub blur: f32,
    /// Drop-shadow glow radius and color.
    pub glow: Option<(f32, Color)>,
}

/// The four shapes that render one pathway. Created, updated and dropped
/// together with their connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayVisuals {
    pub glow_line: LinePrimitive,
    pub trail: LinePrimitive,
    pub particle: EllipsePrimitive,
    pub halo: EllipsePrimitive,
}

impl PathwayVisuals {
    /// Allocate the bundle with its initial styling. The particle and halo
    /// start at the origin port; the trail is invisible until the first tick.
    pub fn allocate(from: Vec2, to: Vec2) -> Self {
        Self {
            glow_line: LinePrimitive::solid(from, to, GLOW_LINE_STROKE, GLOW_LINE_WIDTH),
            trail: LinePrimitive {
                round_cap: true,
                blur: TRAIL_BLUR,
                ..LinePrimitive::solid(from, from, Color::TRANSPARENT, TRAIL_WIDTH)
            },
            particle: EllipsePrimitive {
                center: from,
                rx: 8.0,
                ry: 4.0,
                rotation_deg: 0.0,
                fill: Color::WHITE,
                opacity: 1.0,
                blur: 0.0,
                glow: Some((PARTICLE_INITIAL_GLOW, Color::NEURAL_BLUE)),
            },
            halo: EllipsePrimitive {
                center: from,
                rx: 16.0,
                ry: 10.0,
                rotation_deg: 0.0,
                fill: HALO_FILL,
                opacity: 1.0,
                blur: HALO_BLUR,
                glow: None,
            },
        }
    }
}
