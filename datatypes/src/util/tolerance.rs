//! Relative floating point tolerance used for touching tests on cell and feature bounds.

use float_cmp::{ApproxEq, F64Margin};

/// Units in the last place that two values may differ by.
pub const RELATIVE_TOLERANCE_ULPS: i64 = 128;

/// Margin of [`near_equal`]. Values very close to zero are compared against [`f64::MIN_POSITIVE`].
pub const TOLERANCE_MARGIN: F64Margin = F64Margin {
    epsilon: f64::MIN_POSITIVE,
    ulps: RELATIVE_TOLERANCE_ULPS,
};

/// Compares two values with a tolerance that scales with their magnitude.
///
/// # Examples
///
/// ```
/// use haze_datatypes::util::tolerance::near_equal;
///
/// assert!(near_equal(1.0, 1.0 + f64::EPSILON));
/// assert!(near_equal(1.0e9, 1.0e9 + 1.0e-8));
/// assert!(!near_equal(1.0, 1.0001));
/// ```
pub fn near_equal(a: f64, b: f64) -> bool {
    a.approx_eq(b, TOLERANCE_MARGIN)
}

/// `a <= b` or both are nearly equal
pub fn less_or_near_equal(a: f64, b: f64) -> bool {
    a < b || near_equal(a, b)
}

/// `a >= b` or both are nearly equal
pub fn greater_or_near_equal(a: f64, b: f64) -> bool {
    a > b || near_equal(a, b)
}

/// Absolute slack that covers at least what [`near_equal`] grants around `value`.
///
/// One unit in the last place of `value` is at most `f64::EPSILON * |value|`.
/// Used to inflate query envelopes so that touching neighbors are not filtered out.
pub fn slack(value: f64) -> f64 {
    TOLERANCE_MARGIN
        .epsilon
        .max(2. * RELATIVE_TOLERANCE_ULPS as f64 * f64::EPSILON * value.abs())
}
