//! Core logic for the cosmogram diagram engine.
//!
//! Normalizes palette, numerology and geometry configuration, validates the
//! node registry, tracks planetary-hour activations and renders the layered
//! diagram onto an abstract canvas.

pub mod activation;
pub mod config;
pub mod logging;
pub mod planetary;
pub mod registry;
pub mod render;
pub mod resource;
pub mod slot;

pub use activation::engine::{determine_active_nodes, ActivationOutcome, ActiveNode};
pub use activation::store::{ActivationGuard, ActivationRecord, ActivationStore};
pub use config::geometry::{normalize_geometry, GeometryConfig};
pub use config::numerology::{normalize_constants, NumerologyConstants};
pub use config::palette::{normalize_palette, Color, ColorError, Palette};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use planetary::hour::compute_planetary_hour;
pub use planetary::planet::Planet;
pub use registry::node::NodeRecord;
pub use registry::schema::{NodeSchema, SchemaError};
pub use registry::validator::{validate_nodes, ValidationIssue, ValidationReport};
pub use render::{
    render, render_svg, Canvas, DrawContext, RecordingCanvas, RenderOutcome, RenderRequest,
    RenderSummary, SkipReason, SvgCanvas,
};
pub use resource::resolver::{resolve_first, Resolved, ResolvedOrigin};
pub use resource::source::{FileSource, InlineSource, ResourceSource, SourceError};
pub use slot::resolve_slot;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
