use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color with a fractional alpha channel, matching how pathway styles
/// are authored (`rgba(102, 126, 234, 0.3)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    /// The indigo used for every pathway glow.
    pub const NEURAL_BLUE: Color = Color::rgb(102, 126, 234);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(&self, a: f32) -> Self {
        Self { a, ..*self }
    }

    /// Alpha as a byte, clamped to the displayable range. Pulse envelopes may
    /// momentarily exceed 1.0.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_clamped() {
        assert_eq!(Color::NEURAL_BLUE.with_alpha(1.1).alpha_u8(), 255);
        assert_eq!(Color::NEURAL_BLUE.with_alpha(-0.2).alpha_u8(), 0);
        assert_eq!(Color::WHITE.with_alpha(0.5).alpha_u8(), 128);
    }

    #[test]
    fn test_display_matches_css() {
        assert_eq!(
            Color::NEURAL_BLUE.with_alpha(0.3).to_string(),
            "rgba(102, 126, 234, 0.3)"
        );
    }
}
