//! Deterministic seed-slot resolution for a node.
//!
//! Maps a node's title, arcana code, seed and date onto one of 72 slots.
//! The same inputs always produce the same slot.

use chrono::{Datelike, NaiveDate};

pub const SLOT_COUNT: u32 = 72;
pub const DEFAULT_SEED: u32 = 33;
/// Length of the day-slot cycle.
const DAY_CYCLE: u32 = 36;

/// Sum of letter positions (`A` = 1 .. `Z` = 26), case-insensitive.
pub fn letter_sum(text: &str) -> u32 {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1)
        .sum()
}

/// Sum of decimal digits anywhere in `text`.
pub fn digit_sum(text: &str) -> u32 {
    text.chars().filter_map(|c| c.to_digit(10)).sum()
}

/// Day slot in `0..36`; `None` maps to slot 0.
pub fn day_slot(date: Option<NaiveDate>) -> u32 {
    date.map_or(0, |date| date.ordinal0() % DAY_CYCLE)
}

/// Resolves the slot in `1..=72`.
///
/// `score = 3 * letters(title) + 2 * digits(arcana) + 4 * day + seed mod 72`.
pub fn resolve_slot(title: &str, arcana: &str, seed: u32, date: Option<NaiveDate>) -> u8 {
    let score = 3 * u64::from(letter_sum(title))
        + 2 * u64::from(digit_sum(arcana))
        + 4 * u64::from(day_slot(date))
        + u64::from(seed % SLOT_COUNT);
    // Always below 73, so the narrowing cannot truncate.
    (score % u64::from(SLOT_COUNT) + 1) as u8
}
