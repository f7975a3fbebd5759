//! Layer 3: logarithmic spiral sampled at Fibonacci-bounded resolution.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::{growth_factor, Frame, MAX_TURNS};
use crate::config::geometry::FibonacciGeometry;
use crate::config::numerology::NumerologyConstants;
use crate::config::palette::Palette;
use crate::render::canvas::{DrawContext, Paint, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FibonacciStats {
    pub samples: usize,
    pub markers: usize,
}

/// Fibonacci numbers `1, 1, 2, 3, ...` not exceeding `bound`.
pub fn fibonacci_sequence(bound: usize) -> Vec<usize> {
    let mut sequence = Vec::new();
    let (mut current, mut next) = (1_usize, 1_usize);
    while current <= bound {
        sequence.push(current);
        let Some(following) = current.checked_add(next) else {
            break;
        };
        current = next;
        next = following;
    }
    sequence
}

/// Spiral sample points from the center outwards.
///
/// The sample count is the largest Fibonacci number within
/// `config.sample_bound`. The angle advances by the same step between
/// consecutive samples, spreading them evenly over `config.turns` full turns
/// (at most `MAX_TURNS`); the golden ratio enters through the radius, which
/// grows by that ratio every quarter turn and is scaled so the last sample
/// lands exactly on the maximum radius.
pub fn spiral_points(
    frame: &Frame,
    constants: &NumerologyConstants,
    config: &FibonacciGeometry,
) -> Vec<Point> {
    let samples = fibonacci_sequence(config.sample_bound)
        .last()
        .copied()
        .unwrap_or(1)
        .max(2);
    let max_radius = (frame.min_side / config.radius_divisor).min(frame.max_radius());
    let total_angle = config.turns.min(MAX_TURNS) * TAU;
    let growth = growth_factor(constants.golden_ratio);
    let last = (samples - 1) as f64;

    (0..samples)
        .map(|index| {
            let angle = total_angle * index as f64 / last;
            let radius = max_radius * growth.powf((angle - total_angle) / FRAC_PI_2);
            frame.center.polar(radius, angle - FRAC_PI_2)
        })
        .collect()
}

pub fn draw(
    ctx: &mut dyn DrawContext,
    frame: &Frame,
    palette: &Palette,
    constants: &NumerologyConstants,
    config: &FibonacciGeometry,
) -> FibonacciStats {
    let points = spiral_points(frame, constants, config);
    let curve = Paint::solid(palette.layer(3))
        .with_alpha(config.alpha)
        .with_line_width(frame.stroke);
    ctx.stroke_path(&points, &curve);

    let marker = Paint::solid(palette.ink).with_alpha(config.alpha);
    let mut markers = 0;
    for point in points.iter().step_by(config.marker_interval.max(1)) {
        ctx.fill_circle(*point, frame.scaled_stroke(constants.three), &marker);
        markers += 1;
    }

    FibonacciStats {
        samples: points.len(),
        markers,
    }
}
