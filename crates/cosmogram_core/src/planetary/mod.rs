//! Planetary hour clock.
//!
//! # Responsibility
//! - Name the seven classical rulers and their correspondences.
//! - Map any instant to its calendar-hour ruler.

pub mod hour;
pub mod planet;
