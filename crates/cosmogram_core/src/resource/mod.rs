//! External resource loading with ordered fallback.
//!
//! # Responsibility
//! - Define loadable sources (`source`).
//! - Resolve typed documents through a first-success combinator (`resolver`).
//!
//! # Invariants
//! - The only asynchronous part of the core; everything else runs to
//!   completion synchronously.

pub mod resolver;
pub mod source;
