//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point comparisons.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that two arrays of floating-point values are approximately element-wise equal.
///
/// # Panics
///
/// Panics if the arrays have different lengths or if any element-wise comparison fails.
pub fn assert_array_approx_eq(actual: &[f64], expected: &[f64], epsilon: Option<f64>) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Arrays have different lengths: actual = {}, expected = {}",
        actual.len(),
        expected.len()
    );

    let eps = epsilon.unwrap_or(DEFAULT_EPSILON);
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();

        assert!(
            diff <= eps,
            "Arrays differ at index {}: actual = {}, expected = {}, diff = {}, epsilon = {}",
            i,
            a,
            e,
            diff,
            eps
        );
    }
}

/// Assert that boundaries are strictly increasing.
pub fn assert_strictly_increasing(values: &[f64]) {
    for (i, pair) in values.windows(2).enumerate() {
        assert!(
            pair[0] < pair[1],
            "Not strictly increasing at index {}: {} >= {}",
            i,
            pair[0],
            pair[1]
        );
    }
}

/// Assert that `values` is the exact negation of `other` read backwards.
pub fn assert_mirrored(values: &[f64], other: &[f64]) {
    let mirrored: Vec<f64> = other.iter().rev().map(|v| -v).collect();
    assert_eq!(values, mirrored.as_slice(), "Sequences are not mirror images");
}

/// Assert that a result is within expected bounds.
///
/// # Panics
///
/// Panics if `actual` is less than `min` or greater than `max`.
pub fn assert_in_range(actual: f64, min: f64, max: f64) {
    assert!(
        actual >= min && actual <= max,
        "Value not in range: actual = {}, min = {}, max = {}",
        actual,
        min,
        max
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0 + 1e-12, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_mirrored() {
        assert_mirrored(&[-2.0, -1.0, 0.5], &[-0.5, 1.0, 2.0]);
    }

    #[test]
    #[should_panic]
    fn test_assert_strictly_increasing_rejects_repeats() {
        assert_strictly_increasing(&[0.0, 1.0, 1.0]);
    }
}
