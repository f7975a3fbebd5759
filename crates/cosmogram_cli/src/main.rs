//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `cosmogram_core` linkage.
//! - Print the current planetary hour and a default render summary.

use cosmogram_core::{
    compute_planetary_hour, init_logging, render, LogTarget, RecordingCanvas, RenderOutcome,
    RenderRequest,
};
use log::info;

const SMOKE_WIDTH: f64 = 1440.0;
const SMOKE_HEIGHT: f64 = 900.0;

fn main() {
    if let Err(err) = init_logging("warn", LogTarget::Stderr) {
        eprintln!("cosmogram logging disabled: {err}");
    }
    info!("event=cli_smoke module=cli status=start");

    println!("cosmogram_core ping={}", cosmogram_core::ping());
    println!("cosmogram_core version={}", cosmogram_core::core_version());
    println!(
        "planetary_hour={}",
        compute_planetary_hour(&chrono::Local::now())
    );

    let mut canvas = RecordingCanvas::new();
    match render(Some(&mut canvas), &RenderRequest::new(SMOKE_WIDTH, SMOKE_HEIGHT)) {
        RenderOutcome::Rendered(report) => {
            println!("render commands={}", canvas.commands().len());
            println!("render summary={}", report.summary);
        }
        RenderOutcome::Skipped(reason) => println!("render skipped={reason}"),
    }
}
