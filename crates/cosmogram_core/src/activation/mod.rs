//! Node activation keyed by planetary hour.
//!
//! # Responsibility
//! - Own the activation map (`store`) and its ND-safe guardrail.
//! - Run the per-cycle selection of active nodes (`engine`).
//!
//! # Invariants
//! - One writer per cycle; readers only ever see snapshots.

pub mod engine;
pub mod store;
