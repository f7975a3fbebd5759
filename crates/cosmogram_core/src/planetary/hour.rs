//! Calendar-hour planetary ruler.
//!
//! # Invariants
//! - Pure: identical instants always yield the same planet.
//! - Hours are whole wall-clock hours of the instant's own clock; sunrise and
//!   sunset are not consulted.

use super::planet::{Planet, CHALDEAN_ORDER};
use chrono::{Datelike, Timelike};

/// Starting ruler per weekday, indexed from Sunday.
const WEEKDAY_RULERS: [Planet; 7] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
];

/// Returns the planet ruling the hour that contains `instant`.
///
/// Works with any chrono value carrying both a date and a time of day, e.g.
/// `DateTime<Tz>` or `NaiveDateTime`.
pub fn compute_planetary_hour<T>(instant: &T) -> Planet
where
    T: Datelike + Timelike,
{
    let weekday = instant.weekday().num_days_from_sunday() as usize;
    let start = WEEKDAY_RULERS[weekday % WEEKDAY_RULERS.len()].chaldean_index();
    let hours_since_midnight = f64::from(instant.hour()) + f64::from(instant.minute()) / 60.0;
    let offset = (hours_since_midnight.floor() as usize) % CHALDEAN_ORDER.len();
    CHALDEAN_ORDER[(start + offset) % CHALDEAN_ORDER.len()]
}

/// Starting ruler of the given weekday (0 = Sunday).
pub fn weekday_ruler(days_from_sunday: u32) -> Planet {
    WEEKDAY_RULERS[days_from_sunday as usize % WEEKDAY_RULERS.len()]
}

#[cfg(test)]
mod tests {
    use super::{compute_planetary_hour, weekday_ruler};
    use crate::planetary::planet::Planet;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid test instant")
    }

    #[test]
    fn sunday_midnight_is_sun() {
        // 2024-01-07 is a Sunday.
        assert_eq!(compute_planetary_hour(&at(2024, 1, 7, 0, 0)), Planet::Sun);
    }

    #[test]
    fn hours_advance_through_chaldean_order() {
        assert_eq!(compute_planetary_hour(&at(2024, 1, 7, 1, 0)), Planet::Venus);
        assert_eq!(compute_planetary_hour(&at(2024, 1, 7, 2, 59)), Planet::Mercury);
        assert_eq!(compute_planetary_hour(&at(2024, 1, 7, 3, 30)), Planet::Moon);
        assert_eq!(compute_planetary_hour(&at(2024, 1, 7, 4, 0)), Planet::Saturn);
        assert_eq!(compute_planetary_hour(&at(2024, 1, 7, 7, 0)), Planet::Sun);
    }

    #[test]
    fn weekday_rulers_start_each_day() {
        assert_eq!(weekday_ruler(1), Planet::Moon);
        assert_eq!(weekday_ruler(6), Planet::Saturn);
        // 2024-01-13 is a Saturday.
        assert_eq!(compute_planetary_hour(&at(2024, 1, 13, 0, 0)), Planet::Saturn);
    }
}
