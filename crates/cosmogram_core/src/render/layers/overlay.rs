//! Layer 5: markers for the currently active nodes.

use super::Frame;
use crate::activation::engine::ActiveNode;
use crate::config::numerology::NumerologyConstants;
use crate::config::palette::Palette;
use crate::render::canvas::{DrawContext, Paint, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStats {
    pub markers: usize,
}

/// Position of an active node on the overlay circle.
///
/// `angle` is in degrees, clockwise from twelve o'clock. `radius_ratio` is
/// clamped into `[0, 1]` of `radius`; a non-finite ratio sits at the center.
pub fn marker_position(center: Point, radius: f64, angle: f64, radius_ratio: f64) -> Point {
    let angle = if angle.is_finite() { angle.to_radians() } else { 0.0 };
    let ratio = if radius_ratio.is_finite() {
        radius_ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let distance = radius * ratio;
    Point::new(center.x + distance * angle.sin(), center.y - distance * angle.cos())
}

/// Draws one colored marker plus id label per active node.
pub fn draw(
    ctx: &mut dyn DrawContext,
    frame: &Frame,
    palette: &Palette,
    constants: &NumerologyConstants,
    radius: f64,
    active_nodes: &[ActiveNode],
) -> OverlayStats {
    // Marker and label stay within the margin around the overlay circle.
    let marker_radius = frame.scaled_stroke(constants.seven).min(frame.margin / 2.0);
    let label_offset = (marker_radius * constants.golden_ratio.max(1.0)).min(frame.margin);
    let text_size = marker_radius / constants.golden_ratio.max(1.0);
    let ring = Paint::solid(palette.ink).with_line_width(frame.stroke);
    let label = Paint::solid(palette.ink);

    for active in active_nodes {
        let geometry = &active.node.geometry;
        let at = marker_position(frame.center, radius, geometry.angle, geometry.radius_ratio);
        let fill = Paint::solid(active.node.correspondences.planetary_hour.color());
        ctx.fill_circle(at, marker_radius, &fill);
        ctx.stroke_circle(at, marker_radius, &ring);
        ctx.fill_text(
            &active.node.id,
            Point::new(at.x + label_offset, at.y),
            text_size,
            &label,
        );
    }

    OverlayStats {
        markers: active_nodes.len(),
    }
}
