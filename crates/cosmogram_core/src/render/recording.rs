//! In-memory canvas that records every drawing call.

use super::canvas::{Canvas, DrawContext, GradientStop, Paint, Point, Rect};
use serde::Serialize;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    LinearGradient {
        rect: Rect,
        from: Point,
        to: Point,
        stops: Vec<GradientStop>,
    },
    FillCircle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    StrokePath {
        points: Vec<Point>,
        paint: Paint,
    },
    FillText {
        text: String,
        at: Point,
        size: f64,
        paint: Paint,
    },
}

/// Canvas backed by a command log.
///
/// A detached recording canvas models a surface whose context is
/// unavailable: `context()` returns `None` and nothing is ever recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    detached: bool,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas without a usable drawing context.
    pub fn detached() -> Self {
        Self {
            detached: true,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Every point touched by path, circle-center and text commands.
    pub fn points(&self) -> Vec<Point> {
        self.commands
            .iter()
            .flat_map(|command| match command {
                DrawCommand::StrokePath { points, .. } => points.clone(),
                DrawCommand::FillCircle { center, .. } | DrawCommand::StrokeCircle { center, .. } => {
                    vec![*center]
                }
                DrawCommand::FillText { at, .. } => vec![*at],
                DrawCommand::FillRect { .. } | DrawCommand::LinearGradient { .. } => Vec::new(),
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn context(&mut self) -> Option<&mut dyn DrawContext> {
        if self.detached {
            None
        } else {
            Some(self)
        }
    }
}

impl DrawContext for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: *paint,
        });
    }

    fn fill_linear_gradient(&mut self, rect: Rect, from: Point, to: Point, stops: &[GradientStop]) {
        self.commands.push(DrawCommand::LinearGradient {
            rect,
            from,
            to,
            stops: stops.to_vec(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn stroke_path(&mut self, points: &[Point], paint: &Paint) {
        self.commands.push(DrawCommand::StrokePath {
            points: points.to_vec(),
            paint: *paint,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, size: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            size,
            paint: *paint,
        });
    }
}
