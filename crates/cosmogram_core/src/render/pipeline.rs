//! Single render entry point.
//!
//! # Responsibility
//! - Normalize palette, constants and geometry for one call.
//! - Draw background then the five layers in fixed order, then the notice.
//!
//! # Invariants
//! - Layer order never changes and layer 5 is always entered.
//! - A missing surface or unusable dimensions skip the call before any
//!   drawing command is issued.
//! - All drawing stays within `[0, width] x [0, height]`.

use std::fmt::{Display, Formatter};
use std::time::Instant;

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;

use super::canvas::{Canvas, DrawContext, GradientStop, Paint, Point, Rect};
use super::layers::{self, Frame};
use super::summary::RenderSummary;
use super::svg::SvgCanvas;
use crate::activation::engine::ActiveNode;
use crate::config::geometry::normalize_geometry;
use crate::config::numerology::normalize_constants;
use crate::config::palette::normalize_palette;

/// Everything one render call needs. Candidates are normalized on every call.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub width: f64,
    pub height: f64,
    pub palette: Value,
    pub constants: Value,
    pub geometry: Value,
    pub notice: Option<String>,
    pub active_nodes: Vec<ActiveNode>,
}

impl RenderRequest {
    /// Request with default palette, constants and geometry.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            palette: Value::Null,
            constants: Value::Null,
            geometry: Value::Null,
            notice: None,
            active_nodes: Vec::new(),
        }
    }

    pub fn with_palette(mut self, palette: Value) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_constants(mut self, constants: Value) -> Self {
        self.constants = constants;
        self
    }

    pub fn with_geometry(mut self, geometry: Value) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn with_active_nodes(mut self, active_nodes: Vec<ActiveNode>) -> Self {
        self.active_nodes = active_nodes;
        self
    }

    fn has_usable_size(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    MissingContext,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingContext => "missing-context",
        }
    }
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderPhase {
    Clearing,
    /// Layer number in `1..=5`.
    DrawingLayer(u8),
    Notice,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderReport {
    pub summary: RenderSummary,
    pub phases: Vec<RenderPhase>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered(RenderReport),
    Skipped(SkipReason),
}

impl RenderOutcome {
    pub fn report(&self) -> Option<&RenderReport> {
        match self {
            Self::Rendered(report) => Some(report),
            Self::Skipped(_) => None,
        }
    }
}

/// Renders the full diagram onto `canvas`.
///
/// Returns `Skipped(MissingContext)` when there is no canvas, the canvas has
/// no drawing context, or the requested size is not positive and finite.
pub fn render(canvas: Option<&mut dyn Canvas>, request: &RenderRequest) -> RenderOutcome {
    let started_at = Instant::now();
    let Some(canvas) = canvas else {
        return skipped("no_canvas");
    };
    if !request.has_usable_size() {
        return skipped("invalid_size");
    }
    let Some(ctx) = canvas.context() else {
        return skipped("no_context");
    };

    let report = draw_all(ctx, request);
    info!(
        "event=render module=render status=ok duration_ms={} width={} height={} summary=\"{}\"",
        started_at.elapsed().as_millis(),
        request.width,
        request.height,
        report.summary
    );
    RenderOutcome::Rendered(report)
}

/// Renders into a fresh SVG document sized to the request.
pub fn render_svg(request: &RenderRequest) -> Result<(String, RenderReport), SkipReason> {
    let mut canvas = SvgCanvas::new(request.width, request.height);
    match render(Some(&mut canvas), request) {
        RenderOutcome::Rendered(report) => Ok((canvas.finish(), report)),
        RenderOutcome::Skipped(reason) => Err(reason),
    }
}

fn skipped(cause: &str) -> RenderOutcome {
    let reason = SkipReason::MissingContext;
    warn!(
        "event=render module=render status=skip reason={} cause={}",
        reason.as_str(),
        cause
    );
    RenderOutcome::Skipped(reason)
}

fn enter(phases: &mut Vec<RenderPhase>, phase: RenderPhase) {
    debug!("event=render_phase module=render phase={:?}", phase);
    phases.push(phase);
}

fn draw_all(ctx: &mut dyn DrawContext, request: &RenderRequest) -> RenderReport {
    let palette = normalize_palette(&request.palette);
    let constants = normalize_constants(&request.constants);
    let geometry = normalize_geometry(&constants, &request.geometry);
    let frame = Frame::new(
        request.width,
        request.height,
        geometry.vesica.padding_divisor,
        &constants,
    );
    let mut phases = Vec::with_capacity(8);

    enter(&mut phases, RenderPhase::Clearing);
    let full = Rect::new(0.0, 0.0, request.width, request.height);
    ctx.fill_rect(full, &Paint::solid(palette.background));
    ctx.fill_linear_gradient(
        full,
        Point::new(0.0, 0.0),
        Point::new(0.0, request.height),
        &[
            GradientStop {
                offset: 0.0,
                color: palette.layer(0),
                alpha: (constants.three / constants.thirty_three).clamp(0.0, 1.0),
            },
            GradientStop {
                offset: 1.0,
                color: palette.background,
                alpha: 0.0,
            },
        ],
    );

    enter(&mut phases, RenderPhase::DrawingLayer(1));
    let vesica = layers::vesica::draw(ctx, &frame, &palette, &constants, &geometry.vesica);
    enter(&mut phases, RenderPhase::DrawingLayer(2));
    let tree = layers::tree::draw(ctx, &frame, &palette, &constants, &geometry.tree);
    enter(&mut phases, RenderPhase::DrawingLayer(3));
    let fibonacci =
        layers::fibonacci::draw(ctx, &frame, &palette, &constants, &geometry.fibonacci);
    enter(&mut phases, RenderPhase::DrawingLayer(4));
    let helix = layers::helix::draw(ctx, &frame, &palette, &constants, &geometry.helix);
    enter(&mut phases, RenderPhase::DrawingLayer(5));
    let overlay = layers::overlay::draw(
        ctx,
        &frame,
        &palette,
        &constants,
        layers::helix::lattice_radius(&frame, &geometry.helix),
        &request.active_nodes,
    );

    if let Some(notice) = request.notice.as_deref().filter(|text| !text.trim().is_empty()) {
        enter(&mut phases, RenderPhase::Notice);
        let size = (frame.margin / constants.three).max(frame.stroke).min(frame.margin);
        ctx.fill_text(
            notice,
            Point::new(frame.margin, request.height - size),
            size,
            &Paint::solid(palette.ink).with_alpha((constants.seven / constants.nine).clamp(0.0, 1.0)),
        );
    }
    enter(&mut phases, RenderPhase::Done);

    RenderReport {
        summary: RenderSummary::from_layers(vesica, tree, fibonacci, helix, overlay),
        phases,
    }
}

#[cfg(test)]
mod tests {
    use super::{render, render_svg, RenderOutcome, RenderPhase, RenderRequest, SkipReason};
    use crate::render::recording::RecordingCanvas;

    #[test]
    fn missing_canvas_is_skipped() {
        let outcome = render(None, &RenderRequest::new(100.0, 100.0));
        assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::MissingContext));
        assert_eq!(SkipReason::MissingContext.as_str(), "missing-context");
    }

    #[test]
    fn unusable_sizes_are_skipped_without_drawing() {
        for (width, height) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0), (10.0, f64::INFINITY)] {
            let mut canvas = RecordingCanvas::new();
            let outcome = render(Some(&mut canvas), &RenderRequest::new(width, height));
            assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::MissingContext));
            assert!(canvas.commands().is_empty());
        }
    }

    #[test]
    fn phases_follow_fixed_order() {
        let mut canvas = RecordingCanvas::new();
        let outcome = render(
            Some(&mut canvas),
            &RenderRequest::new(320.0, 240.0).with_notice("fallback palette active"),
        );
        let report = outcome.report().expect("rendered");
        assert_eq!(
            report.phases,
            vec![
                RenderPhase::Clearing,
                RenderPhase::DrawingLayer(1),
                RenderPhase::DrawingLayer(2),
                RenderPhase::DrawingLayer(3),
                RenderPhase::DrawingLayer(4),
                RenderPhase::DrawingLayer(5),
                RenderPhase::Notice,
                RenderPhase::Done,
            ]
        );
    }

    #[test]
    fn blank_notice_is_not_drawn() {
        let mut canvas = RecordingCanvas::new();
        let outcome = render(Some(&mut canvas), &RenderRequest::new(320.0, 240.0).with_notice("  "));
        let report = outcome.report().expect("rendered");
        assert!(!report.phases.contains(&RenderPhase::Notice));
    }

    #[test]
    fn svg_render_produces_a_document() {
        let (svg, report) = render_svg(&RenderRequest::new(200.0, 100.0)).expect("svg render");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(report.summary.tree_nodes, 10);
        assert_eq!(render_svg(&RenderRequest::new(0.0, 0.0)), Err(SkipReason::MissingContext));
    }
}
