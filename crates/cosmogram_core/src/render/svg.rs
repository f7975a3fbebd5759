//! Canvas that serializes drawing calls into a standalone SVG document.

use super::canvas::{Canvas, DrawContext, GradientStop, Paint, Point, Rect};
use std::fmt::Write;

/// SVG document builder.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    defs: String,
    body: String,
    gradient_count: usize,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            defs: String::new(),
            body: String::new(),
            gradient_count: 0,
        }
    }

    /// Returns the complete SVG document.
    pub fn finish(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n<defs>\n{defs}</defs>\n{body}</svg>\n",
            w = fmt_num(self.width),
            h = fmt_num(self.height),
            defs = self.defs,
            body = self.body,
        )
    }
}

impl Canvas for SvgCanvas {
    fn context(&mut self) -> Option<&mut dyn DrawContext> {
        Some(self)
    }
}

impl DrawContext for SvgCanvas {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" fill-opacity=\"{}\"/>",
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            paint.color,
            fmt_num(paint.alpha)
        );
    }

    fn fill_linear_gradient(&mut self, rect: Rect, from: Point, to: Point, stops: &[GradientStop]) {
        self.gradient_count += 1;
        let id = format!("ambient{}", self.gradient_count);
        let _ = writeln!(
            self.defs,
            "<linearGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y)
        );
        for stop in stops {
            let _ = writeln!(
                self.defs,
                "<stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
                fmt_num(stop.offset),
                stop.color,
                fmt_num(stop.alpha)
            );
        }
        self.defs.push_str("</linearGradient>\n");
        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"url(#{id})\"/>",
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height)
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        let _ = writeln!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" fill-opacity=\"{}\"/>",
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(radius),
            paint.color,
            fmt_num(paint.alpha)
        );
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        let _ = writeln!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\"{}/>",
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(radius),
            stroke_attrs(paint)
        );
    }

    fn stroke_path(&mut self, points: &[Point], paint: &Paint) {
        if points.is_empty() {
            return;
        }
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
            .collect();
        let _ = writeln!(
            self.body,
            "<polyline points=\"{}\" fill=\"none\"{}/>",
            coords.join(" "),
            stroke_attrs(paint)
        );
    }

    fn fill_text(&mut self, text: &str, at: Point, size: f64, paint: &Paint) {
        let _ = writeln!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"serif\" fill=\"{}\" fill-opacity=\"{}\">{}</text>",
            fmt_num(at.x),
            fmt_num(at.y),
            fmt_num(size),
            paint.color,
            fmt_num(paint.alpha),
            escape_text(text)
        );
    }
}

fn stroke_attrs(paint: &Paint) -> String {
    let mut attrs = format!(
        " stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"",
        paint.color,
        fmt_num(paint.alpha),
        fmt_num(paint.line_width)
    );
    if let Some((dash, gap)) = paint.dash {
        let _ = write!(attrs, " stroke-dasharray=\"{} {}\"", fmt_num(dash), fmt_num(gap));
    }
    attrs
}

/// Two-decimal formatting keeps documents byte-stable across runs.
fn fmt_num(value: f64) -> String {
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
