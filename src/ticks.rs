//! Colorbar tick selection and labels.
//!
//! Discrete colormaps often have more boundaries than a colorbar can label
//! legibly. The selection here keeps a stride of the actual boundaries,
//! preferring "round" values and uniform spacing, and mirrors the choice
//! about zero for diverging levels so both halves read the same.

use crate::error::{ClimplotError, Result};

pub const DEFAULT_MAX_TICKS: usize = 9;
pub const DEFAULT_MIN_TICKS: usize = 5;

/// Bonus for a subset whose gaps are all equal
const UNIFORM_SPACING_BONUS: u32 = 20;

/// Values above this are formatted as floats, never as integers
const INTEGER_LIMIT: f64 = 1e15;

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < INTEGER_LIMIT
}

/// Tolerant equality in the manner of numpy's `isclose` defaults
fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 + 1e-5 * b.abs()
}

/// Up to `digits` significant digits, trailing zeros removed
fn significant(value: f64, digits: i32) -> String {
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - exponent).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Bonus for the last significant digit: 5 beats even beats odd
fn last_digit_bonus(digits: &str) -> u32 {
    match digits.chars().last().and_then(|c| c.to_digit(10)) {
        Some(5) => 2,
        Some(d) if d % 2 == 0 => 1,
        _ => 0,
    }
}

/// How "round" a value is as a tick label; higher is rounder.
///
/// Zero scores 30. Integers score 20 plus 3 per trailing zero. Fractions
/// score `max(1, 10 - 2 * decimals)`. Both tiers add a small bonus for
/// the last significant digit.
pub fn roundness_score(value: f64) -> u32 {
    if value == 0.0 {
        return 30;
    }
    let magnitude = value.abs();

    if is_integral(magnitude) {
        let text = format!("{}", magnitude as u64);
        let significant = text.trim_end_matches('0');
        let trailing_zeros = (text.len() - significant.len()) as u32;
        return 20 + 3 * trailing_zeros + last_digit_bonus(significant);
    }

    let text = significant(magnitude, 10);
    match text.split_once('.') {
        Some((_, decimals)) => {
            let decimals = decimals.trim_end_matches('0');
            let base = 10u32.saturating_sub(2 * decimals.len() as u32).max(1);
            base + last_digit_bonus(decimals)
        }
        None => 15,
    }
}

/// Whether the boundaries mirror about zero
pub fn is_symmetric(boundaries: &[f64]) -> bool {
    boundaries.len() > 2
        && boundaries
            .iter()
            .zip(boundaries.iter().rev())
            .all(|(&a, &b)| is_close(a, -b))
}

/// Total roundness plus the uniform-spacing bonus
pub fn score_subset(subset: &[f64]) -> u32 {
    let mut score: u32 = subset.iter().map(|&v| roundness_score(v)).sum();
    let gaps: Vec<f64> = subset.windows(2).map(|w| w[1] - w[0]).collect();
    if let Some(&first) = gaps.first() {
        if gaps.iter().all(|&g| is_close(g, first)) {
            score += UNIFORM_SPACING_BONUS;
        }
    }
    score
}

fn strided(values: &[f64], offset: usize, stride: usize) -> Vec<f64> {
    values.iter().skip(offset).step_by(stride).copied().collect()
}

/// Highest-scoring stride/offset subset whose length lies in
/// `[min_len, max_len]`. Ties keep the first candidate.
fn best_strided(values: &[f64], max_len: usize, min_len: usize) -> Option<Vec<f64>> {
    let min_stride = values.len().div_ceil(max_len.max(1)).max(1);
    let mut best: Option<(u32, Vec<f64>)> = None;

    for stride in min_stride..=2 * min_stride {
        for offset in 0..stride {
            let subset = strided(values, offset, stride);
            if subset.len() > max_len || subset.len() < min_len {
                continue;
            }
            let score = score_subset(&subset);
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, subset));
            }
        }
    }
    best.map(|(_, subset)| subset)
}

/// Best stride/offset subset of the boundaries. Endpoints are not forced.
///
/// Subsets shorter than `min_ticks` are rejected unless nothing else
/// fits, in which case any subset of at least two ticks is accepted.
pub fn best_stride_subset(boundaries: &[f64], max_ticks: usize, min_ticks: usize) -> Option<Vec<f64>> {
    best_strided(boundaries, max_ticks, min_ticks)
        .or_else(|| best_strided(boundaries, max_ticks, 2))
}

/// Thin the positive half and mirror it onto the negative half.
pub fn select_symmetric_ticks(boundaries: &[f64], max_ticks: usize) -> Vec<f64> {
    let non_negative: Vec<f64> = boundaries.iter().copied().filter(|&v| v >= 0.0).collect();
    let has_zero = non_negative.first().is_some_and(|&v| is_close(v, 0.0));

    // zero takes one slot of the budget
    let half_max = if has_zero {
        max_ticks.saturating_sub(1) / 2
    } else {
        max_ticks / 2
    };
    let positive = if has_zero {
        &non_negative[1..]
    } else {
        &non_negative[..]
    };
    if positive.is_empty() {
        return boundaries.to_vec();
    }

    let chosen = Some(half_max)
        .filter(|&half| half > 0)
        .and_then(|half| best_strided(positive, half, 1))
        .unwrap_or_else(|| positive.to_vec());

    let mut ticks: Vec<f64> = chosen.iter().rev().map(|v| -v).collect();
    if has_zero {
        ticks.push(0.0);
    }
    ticks.extend_from_slice(&chosen);
    ticks
}

/// Choose colorbar ticks from level boundaries.
///
/// All boundaries are kept when there are at most `max_ticks`.
pub fn select_ticks(boundaries: &[f64], max_ticks: usize, min_ticks: usize) -> Result<Vec<f64>> {
    if max_ticks < 2 {
        return Err(ClimplotError::InvalidParameter {
            param: "max_ticks".to_string(),
            message: format!("must be at least 2, got {}", max_ticks),
        });
    }
    if min_ticks > max_ticks {
        return Err(ClimplotError::InvalidParameter {
            param: "min_ticks".to_string(),
            message: format!("{} exceeds max_ticks {}", min_ticks, max_ticks),
        });
    }

    if boundaries.len() <= max_ticks {
        return Ok(boundaries.to_vec());
    }
    if is_symmetric(boundaries) {
        return Ok(select_symmetric_ticks(boundaries, max_ticks));
    }
    Ok(best_stride_subset(boundaries, max_ticks, min_ticks).unwrap_or_else(|| boundaries.to_vec()))
}

/// Label for a tick: "0" for zero, integers without decimals, otherwise
/// up to ten significant digits.
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if is_integral(value) {
        format!("{}", value as i64)
    } else if !value.is_finite() {
        format!("{}", value)
    } else {
        significant(value, 10)
    }
}
