//! Layer 1: field of overlapping circle pairs.

use super::Frame;
use crate::config::geometry::VesicaGeometry;
use crate::config::numerology::NumerologyConstants;
use crate::config::palette::Palette;
use crate::render::canvas::{DrawContext, Paint, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VesicaStats {
    pub pairs: usize,
}

/// Draws a `rows x columns` grid of vesica pairs plus a dashed symmetry axis.
///
/// Each pair is two circles of equal radius whose centers sit one radius
/// apart, so each circle passes through the other's center.
pub fn draw(
    ctx: &mut dyn DrawContext,
    frame: &Frame,
    palette: &Palette,
    constants: &NumerologyConstants,
    config: &VesicaGeometry,
) -> VesicaStats {
    let step_x = frame.inner.width / config.columns as f64;
    let step_y = frame.inner.height / config.rows as f64;
    let step = step_x.min(step_y);
    // A pair spans three radii, so at most `step / 3` keeps it inside its cell.
    let radius = (step / config.radius_divisor).min(step / 3.0);
    let paint = Paint::solid(palette.layer(0))
        .with_alpha(config.alpha)
        .with_line_width(frame.scaled_stroke(1.0 / constants.golden_ratio));

    let mut pairs = 0;
    for row in 0..config.rows {
        for column in 0..config.columns {
            let center = Point::new(
                frame.inner.x + (column as f64 + 0.5) * step_x,
                frame.inner.y + (row as f64 + 0.5) * step_y,
            );
            ctx.stroke_circle(Point::new(center.x - radius / 2.0, center.y), radius, &paint);
            ctx.stroke_circle(Point::new(center.x + radius / 2.0, center.y), radius, &paint);
            pairs += 1;
        }
    }

    let axis = Paint::solid(palette.ink)
        .with_alpha(config.alpha)
        .with_line_width(frame.stroke)
        .with_dash(frame.scaled_stroke(constants.nine), frame.scaled_stroke(constants.three));
    ctx.stroke_path(
        &[
            Point::new(frame.center.x, frame.inner.y),
            Point::new(frame.center.x, frame.inner.y + frame.inner.height),
        ],
        &axis,
    );

    VesicaStats { pairs }
}
