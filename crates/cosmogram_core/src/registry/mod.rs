//! Node registry schema and validation.
//!
//! # Responsibility
//! - Describe what a valid node looks like (`schema`).
//! - Validate raw registry entries into typed `NodeRecord`s (`validator`).
//!
//! # Invariants
//! - Validity is recomputed on every load and never cached across loads.

pub mod node;
pub mod schema;
pub mod validator;
