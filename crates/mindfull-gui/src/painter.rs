//! Paints canvas render primitives with egui shapes.
//!
//! egui has no blur filter, so blurred strokes and glows are approximated by
//! a few widening translucent layers under the crisp shape.

use egui::{Color32, Pos2, Shape, Stroke};
use mindfull_canvas::{EllipsePrimitive, LinePrimitive};
use mindfull_core::{Color, Vec2};

const ELLIPSE_SEGMENTS: usize = 32;
const BLUR_LAYERS: usize = 3;

pub fn to_color32(color: Color, opacity: f32) -> Color32 {
    let alpha = (color.a * opacity).clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, (alpha * 255.0).round() as u8)
}

pub fn to_pos2(origin: Pos2, point: Vec2) -> Pos2 {
    egui::pos2(origin.x + point.x, origin.y + point.y)
}

/// Outline of a rotated ellipse.
pub fn ellipse_points(
    center: Pos2,
    rx: f32,
    ry: f32,
    rotation_deg: f32,
    segments: usize,
) -> Vec<Pos2> {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    (0..segments)
        .map(|i| {
            let t = i as f32 / segments as f32 * std::f32::consts::TAU;
            let (x, y) = (rx * t.cos(), ry * t.sin());
            egui::pos2(center.x + x * cos - y * sin, center.y + x * sin + y * cos)
        })
        .collect()
}

pub fn paint_line(painter: &egui::Painter, origin: Pos2, line: &LinePrimitive) {
    let start = to_pos2(origin, line.start);
    let end = to_pos2(origin, line.end);
    if line.stroke.a <= 0.0 {
        return;
    }

    if let Some((dash, gap)) = line.dash {
        let stroke = Stroke::new(line.width, to_color32(line.stroke, 1.0));
        painter.extend(Shape::dashed_line(&[start, end], stroke, dash, gap));
        return;
    }

    for layer in (1..=blur_layers(line.blur)).rev() {
        let spread = line.blur * layer as f32 / BLUR_LAYERS as f32;
        let color = to_color32(line.stroke, 0.25 / layer as f32);
        painter.line_segment([start, end], Stroke::new(line.width + spread * 2.0, color));
        if line.round_cap {
            let radius = line.width / 2.0 + spread;
            painter.circle_filled(start, radius, color);
            painter.circle_filled(end, radius, color);
        }
    }

    let color = to_color32(line.stroke, 1.0);
    painter.line_segment([start, end], Stroke::new(line.width, color));
    if line.round_cap {
        painter.circle_filled(start, line.width / 2.0, color);
        painter.circle_filled(end, line.width / 2.0, color);
    }
}

pub fn paint_ellipse(painter: &egui::Painter, origin: Pos2, ellipse: &EllipsePrimitive) {
    if ellipse.opacity <= 0.0 {
        return;
    }
    let center = to_pos2(origin, ellipse.center);

    if let Some((radius, color)) = ellipse.glow {
        for layer in 1..=BLUR_LAYERS {
            let grow = radius * layer as f32 / BLUR_LAYERS as f32;
            let fill = to_color32(color, ellipse.opacity * 0.3 / layer as f32);
            let points = ellipse_points(
                center,
                ellipse.rx + grow,
                ellipse.ry + grow,
                ellipse.rotation_deg,
                ELLIPSE_SEGMENTS,
            );
            painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
        }
    }

    for layer in (1..=blur_layers(ellipse.blur)).rev() {
        let grow = ellipse.blur * layer as f32 / BLUR_LAYERS as f32;
        let fill = to_color32(ellipse.fill, ellipse.opacity / (layer + 1) as f32);
        let points = ellipse_points(
            center,
            ellipse.rx + grow,
            ellipse.ry + grow,
            ellipse.rotation_deg,
            ELLIPSE_SEGMENTS,
        );
        painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
    }

    let points = ellipse_points(
        center,
        ellipse.rx,
        ellipse.ry,
        ellipse.rotation_deg,
        ELLIPSE_SEGMENTS,
    );
    painter.add(Shape::convex_polygon(
        points,
        to_color32(ellipse.fill, ellipse.opacity),
        Stroke::NONE,
    ));
}

fn blur_layers(blur: f32) -> usize {
    if blur > 0.0 { BLUR_LAYERS } else { 0 }
}
