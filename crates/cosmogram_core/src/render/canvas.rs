//! Drawing surface contracts.
//!
//! `Canvas` is the surface handle; it may or may not yield a usable
//! `DrawContext`, mirroring a 2D canvas whose context can be unavailable.

use crate::config::palette::Color;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` along `angle` radians (0 = +x axis).
    pub fn polar(self, radius: f64, angle: f64) -> Self {
        Self::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Stroke/fill settings for one drawing call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Paint {
    pub color: Color,
    /// In `[0, 1]`.
    pub alpha: f64,
    pub line_width: f64,
    /// `(dash, gap)` lengths for dashed strokes.
    pub dash: Option<(f64, f64)>,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            alpha: 1.0,
            line_width: 1.0,
            dash: None,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_dash(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some((dash, gap));
        self
    }
}

/// Color stop of a linear gradient, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
    pub alpha: f64,
}

/// Primitive drawing operations used by every layer.
pub trait DrawContext {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    fn fill_linear_gradient(&mut self, rect: Rect, from: Point, to: Point, stops: &[GradientStop]);
    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);
    fn stroke_circle(&mut self, center: Point, radius: f64, paint: &Paint);
    /// Strokes an open polyline through `points`.
    fn stroke_path(&mut self, points: &[Point], paint: &Paint);
    fn fill_text(&mut self, text: &str, at: Point, size: f64, paint: &Paint);
}

/// Drawing surface handle.
pub trait Canvas {
    /// Returns the drawing context, or `None` when the surface is unusable.
    fn context(&mut self) -> Option<&mut dyn DrawContext>;
}
