//! Layer 2: the ten-node tree and its connecting paths.

use std::collections::HashMap;

use super::Frame;
use crate::config::geometry::TreeGeometry;
use crate::config::numerology::NumerologyConstants;
use crate::config::palette::Palette;
use crate::render::canvas::{DrawContext, Paint, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub paths: usize,
}

/// Canvas position of every node, keyed by id.
///
/// Levels are spread over the inner height; the deepest level touches the
/// bottom margin.
pub fn node_positions(frame: &Frame, config: &TreeGeometry) -> HashMap<String, Point> {
    let deepest = config
        .nodes
        .iter()
        .map(|node| node.level)
        .fold(0.0_f64, f64::max);
    let deepest = if deepest > 0.0 { deepest } else { 1.0 };
    config
        .nodes
        .iter()
        .map(|node| {
            let point = Point::new(
                frame.inner.x + node.x_factor * frame.inner.width,
                frame.inner.y + (node.level / deepest) * frame.inner.height,
            );
            (node.id.clone(), point)
        })
        .collect()
}

/// Draws every path first, then every node on top with its label.
pub fn draw(
    ctx: &mut dyn DrawContext,
    frame: &Frame,
    palette: &Palette,
    constants: &NumerologyConstants,
    config: &TreeGeometry,
) -> TreeStats {
    let positions = node_positions(frame, config);
    // Node plus label must fit inside the margin below the deepest level.
    let radius = (frame.min_side / config.node_radius_divisor).min(frame.margin / 2.0);

    let path_paint = Paint::solid(palette.layer(1))
        .with_alpha(config.path_alpha)
        .with_line_width(frame.stroke);
    let mut paths = 0;
    for path in &config.paths {
        let (Some(from), Some(to)) = (positions.get(&path.from), positions.get(&path.to)) else {
            continue;
        };
        ctx.stroke_path(&[*from, *to], &path_paint);
        paths += 1;
    }

    let fill = Paint::solid(palette.layer(2)).with_alpha(config.node_alpha);
    let ring = Paint::solid(palette.ink)
        .with_alpha(config.node_alpha)
        .with_line_width(frame.stroke);
    let label = Paint::solid(palette.ink).with_alpha(config.node_alpha);
    let text_size = (radius / constants.golden_ratio).min(frame.margin / 2.0);
    for node in &config.nodes {
        let Some(center) = positions.get(&node.id) else {
            continue;
        };
        ctx.fill_circle(*center, radius, &fill);
        ctx.stroke_circle(*center, radius, &ring);
        ctx.fill_text(
            &node.label,
            Point::new(center.x, center.y + radius + text_size),
            text_size,
            &label,
        );
    }

    TreeStats {
        nodes: config.nodes.len(),
        paths,
    }
}

#[cfg(test)]
mod tests {
    use super::node_positions;
    use crate::config::geometry::GeometryConfig;
    use crate::config::numerology::NumerologyConstants;
    use crate::render::layers::Frame;

    #[test]
    fn crown_and_kingdom_span_the_inner_height() {
        let constants = NumerologyConstants::default();
        let geometry = GeometryConfig::defaults(&constants);
        let frame = Frame::new(1440.0, 900.0, 11.0, &constants);
        let positions = node_positions(&frame, &geometry.tree);

        let crown = positions.get("kether").expect("crown position");
        let kingdom = positions.get("malkuth").expect("kingdom position");
        assert_eq!(crown.y, frame.inner.y);
        assert!((kingdom.y - (frame.inner.y + frame.inner.height)).abs() < 1e-9);
        assert_eq!(crown.x, kingdom.x);
        assert!(positions.values().all(|point| frame.inner.contains(*point)));
    }
}
