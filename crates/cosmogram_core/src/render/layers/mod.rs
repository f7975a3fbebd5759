//! The five ordered diagram layers.
//!
//! Every layer is a pure function of its inputs and the drawing context and
//! returns the counts it drew for the render summary.

pub mod fibonacci;
pub mod helix;
pub mod overlay;
pub mod tree;
pub mod vesica;

use super::canvas::{Point, Rect};
use crate::config::numerology::NumerologyConstants;

/// Shared layout frame derived once per render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub min_side: f64,
    /// `min_side / padding_divisor`, shared by every layer.
    pub margin: f64,
    /// Canvas minus the margin on every side.
    pub inner: Rect,
    pub center: Point,
    /// Base stroke width: `min_side / (ONEFORTYFOUR * THREE)`, at most `margin`.
    pub stroke: f64,
}

impl Frame {
    pub fn new(
        width: f64,
        height: f64,
        padding_divisor: f64,
        constants: &NumerologyConstants,
    ) -> Self {
        let min_side = width.min(height);
        // Keep the inner area non-empty even for tiny divisors.
        let margin = (min_side / padding_divisor).min(min_side / 2.0);
        Self {
            width,
            height,
            min_side,
            margin,
            inner: Rect::new(
                margin,
                margin,
                (width - 2.0 * margin).max(0.0),
                (height - 2.0 * margin).max(0.0),
            ),
            center: Point::new(width / 2.0, height / 2.0),
            stroke: (min_side / (constants.one_forty_four * constants.three)).min(margin),
        }
    }

    /// `stroke * factor`, capped at half the shorter side so extreme
    /// constants never yield infinite widths or offsets.
    pub fn scaled_stroke(&self, factor: f64) -> f64 {
        (self.stroke * factor).min(self.min_side / 2.0)
    }

    /// Largest radius around `center` that stays inside the margin.
    pub fn max_radius(&self) -> f64 {
        (self.min_side / 2.0 - self.margin).max(0.0)
    }
}

/// Upper bound on full turns for the spiral and helix waves.
pub(crate) const MAX_TURNS: f64 = 1024.0;

/// Growth factor that never shrinks, so radial curves stay monotonic.
pub(crate) fn growth_factor(golden_ratio: f64) -> f64 {
    if golden_ratio >= 1.0 {
        golden_ratio
    } else {
        1.0 / golden_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::{growth_factor, Frame};
    use crate::config::numerology::NumerologyConstants;

    #[test]
    fn frame_margin_uses_the_shorter_side() {
        let frame = Frame::new(1440.0, 900.0, 9.0, &NumerologyConstants::default());
        assert_eq!(frame.margin, 100.0);
        assert_eq!(frame.inner.width, 1240.0);
        assert_eq!(frame.inner.height, 700.0);
        assert_eq!(frame.max_radius(), 350.0);
    }

    #[test]
    fn tiny_divisor_never_inverts_the_inner_rect() {
        let frame = Frame::new(400.0, 300.0, 0.5, &NumerologyConstants::default());
        assert_eq!(frame.margin, 150.0);
        assert!(frame.inner.height >= 0.0);
        assert_eq!(frame.max_radius(), 0.0);
    }

    #[test]
    fn extreme_constants_keep_strokes_finite() {
        let constants = NumerologyConstants {
            one_forty_four: 1e-300,
            ..NumerologyConstants::default()
        };
        let frame = Frame::new(1440.0, 900.0, 11.0, &constants);
        assert!(frame.stroke.is_finite());
        assert!(frame.stroke <= frame.margin);
        assert_eq!(frame.scaled_stroke(f64::MAX), 450.0);
    }

    #[test]
    fn growth_factor_is_at_least_one() {
        assert!(growth_factor(0.5) >= 1.0);
        assert_eq!(growth_factor(1.618), 1.618);
    }
}
