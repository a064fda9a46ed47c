// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Precision at or above which [`round_to`] leaves values untouched.
pub const MAX_PRECISION: u32 = 15;

/// Round `value` to `places` decimal places, halves away from zero.
///
/// Values are returned unchanged when `places` reaches [`MAX_PRECISION`] or when
/// they are too large to scale.
///
/// ```
/// use avionix_bus::round_to;
///
/// assert_eq!(round_to(10.04, 0), 10.0);
/// assert_eq!(round_to(10.6, 0), 11.0);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// assert_eq!(round_to(39.987, 1), 40.0);
/// ```
pub fn round_to(value: f64, places: u32) -> f64 {
    if places >= MAX_PRECISION {
        return value;
    }
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    }
}

/// Whether `next` counts as a new value after `last`.
///
/// NaN is treated as equal to NaN.
pub(crate) fn is_distinct(next: f64, last: f64) -> bool {
    if next.is_nan() || last.is_nan() {
        return next.is_nan() != last.is_nan();
    }
    next != last
}
