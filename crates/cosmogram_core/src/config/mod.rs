//! Configuration normalization.
//!
//! # Responsibility
//! - Turn untrusted palette, constant and geometry candidates into complete,
//!   valid records.
//!
//! # Invariants
//! - Normalization is total: no candidate can make it fail.
//! - Layout ratios come only from `NumerologyConstants`.

pub mod geometry;
pub mod numerology;
pub mod palette;
pub mod value;
