//! Candidate value coercion shared by the normalizers.
//!
//! # Invariants
//! - Every helper is total: malformed input yields the supplied default.
//! - Counts never exceed `MAX_LAYOUT_COUNT`, so no layer can be asked to
//!   sample an unbounded number of points.

use serde_json::Value;

/// Upper bound for any count accepted from an override.
pub const MAX_LAYOUT_COUNT: usize = 4096;

/// Returns the finite, strictly positive number held by `value`.
pub(crate) fn positive_number(value: Option<&Value>) -> Option<f64> {
    let number = value?.as_f64()?;
    (number.is_finite() && number > 0.0).then_some(number)
}

/// Positive-or-default rule for divisors and ratios.
pub(crate) fn positive_or(value: Option<&Value>, default: f64) -> f64 {
    positive_number(value).unwrap_or(default)
}

/// Floors a positive candidate into a count.
///
/// Counts below `min` or above `MAX_LAYOUT_COUNT` fall back to `default`.
pub(crate) fn count_or(value: Option<&Value>, default: usize, min: usize) -> usize {
    let Some(number) = positive_number(value) else {
        return default;
    };
    let floored = number.floor();
    if floored < min as f64 || floored > MAX_LAYOUT_COUNT as f64 {
        return default;
    }
    floored as usize
}

/// Clamps an opacity-like candidate into `[0, 1]`.
///
/// Non-numeric candidates use `default`, which is clamped as well.
pub(crate) fn unit_or(value: Option<&Value>, default: f64) -> f64 {
    match value.and_then(Value::as_f64) {
        Some(number) if number.is_finite() => number.clamp(0.0, 1.0),
        _ => default.clamp(0.0, 1.0),
    }
}

/// Resolves a dotted path such as `lattice.pillar`.
pub(crate) fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
}

#[cfg(test)]
mod tests {
    use super::{count_or, lookup, positive_or, unit_or, MAX_LAYOUT_COUNT};
    use serde_json::json;

    #[test]
    fn positive_or_rejects_zero_negative_and_strings() {
        assert_eq!(positive_or(Some(&json!(0)), 3.0), 3.0);
        assert_eq!(positive_or(Some(&json!(-4.5)), 3.0), 3.0);
        assert_eq!(positive_or(Some(&json!("9")), 3.0), 3.0);
        assert_eq!(positive_or(None, 3.0), 3.0);
        assert_eq!(positive_or(Some(&json!(2.5)), 3.0), 2.5);
    }

    #[test]
    fn count_or_floors_and_enforces_bounds() {
        assert_eq!(count_or(Some(&json!(7.9)), 3, 2), 7);
        assert_eq!(count_or(Some(&json!(1)), 3, 2), 3);
        assert_eq!(count_or(Some(&json!(MAX_LAYOUT_COUNT + 1)), 3, 1), 3);
    }

    #[test]
    fn unit_or_clamps_instead_of_rejecting() {
        assert_eq!(unit_or(Some(&json!(1.7)), 0.5), 1.0);
        assert_eq!(unit_or(Some(&json!(-0.2)), 0.5), 0.0);
        assert_eq!(unit_or(Some(&json!(null)), 0.5), 0.5);
    }

    #[test]
    fn lookup_walks_dotted_paths() {
        let value = json!({"lattice": {"pillar": 4}});
        assert_eq!(lookup(&value, "lattice.pillar"), Some(&json!(4)));
        assert!(lookup(&value, "lattice.gate").is_none());
    }
}
