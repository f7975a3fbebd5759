//! Layered diagram rendering.
//!
//! # Responsibility
//! - Define the drawing surface contracts and two concrete surfaces.
//! - Draw the fixed five-layer diagram through one pipeline.
//!
//! # See also
//! - `pipeline::render` for the entry point.

pub mod canvas;
pub mod layers;
pub mod pipeline;
pub mod recording;
pub mod summary;
pub mod svg;

pub use canvas::{Canvas, DrawContext, GradientStop, Paint, Point, Rect};
pub use pipeline::{
    render, render_svg, RenderOutcome, RenderPhase, RenderReport, RenderRequest, SkipReason,
};
pub use recording::{DrawCommand, RecordingCanvas};
pub use summary::RenderSummary;
pub use svg::SvgCanvas;
