//! Layer 4: eight-point lattice star behind a double helix.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::{growth_factor, Frame, MAX_TURNS};
use crate::config::geometry::{HelixGeometry, LATTICE_POINTS};
use crate::config::numerology::NumerologyConstants;
use crate::config::palette::Palette;
use crate::render::canvas::{DrawContext, Paint, Point};

/// Vertex stride of the `{8/3}` star polygon.
const STAR_STRIDE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelixStats {
    pub lattice_points: usize,
    pub strands: usize,
    pub samples_per_strand: usize,
    pub rungs: usize,
}

/// Outer lattice radius, also used as the overlay radius.
pub fn lattice_radius(frame: &Frame, config: &HelixGeometry) -> f64 {
    (frame.min_side / config.lattice_radius_divisor).min(frame.max_radius())
}

fn ring(center: Point, radius: f64) -> Vec<Point> {
    (0..LATTICE_POINTS)
        .map(|k| center.polar(radius, TAU * k as f64 / LATTICE_POINTS as f64 - FRAC_PI_2))
        .collect()
}

/// Closed star path: every third vertex of the outer ring.
fn star_path(vertices: &[Point]) -> Vec<Point> {
    (0..=vertices.len())
        .map(|k| vertices[(k * STAR_STRIDE) % vertices.len()])
        .collect()
}

fn closed(mut points: Vec<Point>) -> Vec<Point> {
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

/// Samples of both strands, top to bottom across the inner height.
pub fn strand_points(
    frame: &Frame,
    config: &HelixGeometry,
) -> (Vec<Point>, Vec<Point>) {
    let amplitude = (frame.min_side / config.amplitude_divisor).min(frame.inner.width / 2.0);
    let last = (config.sample_count.max(2) - 1) as f64;
    let wave = TAU * config.wave_turns.min(MAX_TURNS);
    let strand = |phase: f64| -> Vec<Point> {
        (0..config.sample_count.max(2))
            .map(|index| {
                let t = index as f64 / last;
                Point::new(
                    frame.center.x + amplitude * (wave * t + phase).sin(),
                    frame.inner.y + t * frame.inner.height,
                )
            })
            .collect()
    };
    (strand(0.0), strand(config.phase_offset))
}

/// Sample indices joined by a rung, evenly spread from first to last.
pub fn rung_indices(sample_count: usize, rung_count: usize) -> Vec<usize> {
    let rung_count = rung_count.min(sample_count);
    match rung_count {
        0 => Vec::new(),
        1 => vec![(sample_count - 1) / 2],
        _ => {
            let step = (sample_count - 1) as f64 / (rung_count - 1) as f64;
            (0..rung_count)
                .map(|k| (k as f64 * step).round() as usize)
                .collect()
        }
    }
}

pub fn draw(
    ctx: &mut dyn DrawContext,
    frame: &Frame,
    palette: &Palette,
    constants: &NumerologyConstants,
    config: &HelixGeometry,
) -> HelixStats {
    let outer = lattice_radius(frame, config);
    let inner = outer / growth_factor(constants.golden_ratio);
    let lattice = Paint::solid(palette.layer(4))
        .with_alpha(config.alpha)
        .with_line_width(frame.stroke);
    let vertices = ring(frame.center, outer);
    ctx.stroke_path(&star_path(&vertices), &lattice);
    ctx.stroke_path(&closed(ring(frame.center, inner)), &lattice);

    let (strand_a, strand_b) = strand_points(frame, config);
    ctx.stroke_path(
        &strand_a,
        &Paint::solid(palette.layer(4))
            .with_alpha(config.alpha)
            .with_line_width(frame.scaled_stroke(constants.golden_ratio)),
    );
    ctx.stroke_path(
        &strand_b,
        &Paint::solid(palette.layer(5))
            .with_alpha(config.alpha)
            .with_line_width(frame.scaled_stroke(constants.golden_ratio)),
    );

    let rung = Paint::solid(palette.layer(5))
        .with_alpha(config.alpha / constants.golden_ratio.max(1.0))
        .with_line_width(frame.stroke);
    let rungs = rung_indices(strand_a.len(), config.cross_tie_count);
    for &index in &rungs {
        ctx.stroke_path(&[strand_a[index], strand_b[index]], &rung);
    }

    HelixStats {
        lattice_points: vertices.len(),
        strands: 2,
        samples_per_strand: strand_a.len(),
        rungs: rungs.len(),
    }
}
