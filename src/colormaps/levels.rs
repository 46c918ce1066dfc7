//! Level boundaries for discrete color mappings.
//!
//! Linear boundaries are computed as `start + k * interval` rather than by
//! accumulation, then rounded to the precision implied by the interval so
//! that `0.1 + 0.2` style noise never reaches a colorbar.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClimplotError, Result};

/// Upper bound on the number of bins a single level set may describe
pub const MAX_BINS: usize = 10_000;

/// Relative tolerance used when deciding whether a range is a whole number
/// of intervals
const STEP_TOLERANCE: f64 = 1e-9;

/// Most decimals `round_to` will round to
const MAX_DECIMALS: i32 = 15;

/// How the boundaries of a [`LevelSet`] are spaced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Spacing {
    /// Evenly spaced by a single interval
    Linear { interval: f64 },
    /// Log-spaced (powers of ten and their sub-steps)
    Logarithmic,
}

/// Ordered, strictly increasing bin boundaries (at least two).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    boundaries: Vec<f64>,
    spacing: Spacing,
}

impl LevelSet {
    /// Build a level set, checking that it has at least two finite,
    /// strictly increasing boundaries.
    pub fn new(boundaries: Vec<f64>, spacing: Spacing) -> Result<Self> {
        if boundaries.len() < 2 {
            return Err(ClimplotError::invalid_range(format!(
                "a level set needs at least 2 boundaries, got {}",
                boundaries.len()
            )));
        }
        if let Some(bad) = boundaries.iter().find(|b| !b.is_finite()) {
            return Err(ClimplotError::invalid_range(format!(
                "level boundaries must be finite, found {}",
                bad
            )));
        }
        if let Some(pair) = boundaries.windows(2).find(|w| w[1] <= w[0]) {
            return Err(ClimplotError::invalid_range(format!(
                "level boundaries must be strictly increasing ({} is followed by {})",
                pair[0], pair[1]
            )));
        }
        Ok(Self {
            boundaries,
            spacing,
        })
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// The interval of a linear level set
    pub fn interval(&self) -> Option<f64> {
        match self.spacing {
            Spacing::Linear { interval } => Some(interval),
            Spacing::Logarithmic => None,
        }
    }

    /// Number of boundaries
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Always false; a level set has at least two boundaries
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Number of bins between boundaries
    pub fn n_bins(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn first(&self) -> f64 {
        self.boundaries[0]
    }

    pub fn last(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Midpoint of each bin
    pub fn bin_centers(&self) -> Vec<f64> {
        self.boundaries
            .windows(2)
            .map(|w| 0.5 * (w[0] + w[1]))
            .collect()
    }

    /// Whether the boundaries mirror each other about zero
    pub fn is_symmetric(&self) -> bool {
        let n = self.boundaries.len();
        let scale = self.last().abs().max(self.first().abs()).max(f64::MIN_POSITIVE);
        n > 2
            && (0..n).all(|k| {
                (self.boundaries[k] + self.boundaries[n - 1 - k]).abs() <= 1e-12 * scale
            })
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &f64> {
        self.boundaries.iter()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.boundaries
    }
}

impl AsRef<[f64]> for LevelSet {
    fn as_ref(&self) -> &[f64] {
        &self.boundaries
    }
}

/// Number of decimals needed to print multiples of `interval` cleanly
pub(crate) fn interval_decimals(interval: f64) -> i32 {
    let exponent = interval.abs().log10().floor();
    if !exponent.is_finite() {
        return 0;
    }
    // `as` saturates, so only the subtraction can overflow
    1i32.saturating_sub(exponent as i32).max(0)
}

/// Round to a fixed number of decimals.
///
/// Past 15 decimals the scaled value no longer fits the grid, so the value
/// is returned unchanged instead of collapsing to zero.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    if decimals > MAX_DECIMALS {
        return value;
    }
    let factor = 10f64.powi(decimals.max(0));
    (value * factor).round() / factor
}

/// `mantissa * 10^exponent`, dividing for negative exponents so that values
/// such as 0.2 and 0.05 come out as the nearest double
pub(crate) fn scale_pow10(mantissa: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        mantissa * 10f64.powi(exponent)
    } else {
        mantissa / 10f64.powi(-exponent)
    }
}

fn check_linear_inputs(vmin: f64, vmax: f64, interval: f64) -> Result<()> {
    if !(vmin.is_finite() && vmax.is_finite() && interval.is_finite()) {
        return Err(ClimplotError::invalid_range(format!(
            "vmin ({}), vmax ({}) and interval ({}) must be finite",
            vmin, vmax, interval
        )));
    }
    if vmax <= vmin {
        return Err(ClimplotError::invalid_range(format!(
            "vmax ({}) must be greater than vmin ({})",
            vmax, vmin
        )));
    }
    if interval <= 0.0 {
        return Err(ClimplotError::invalid_range(format!(
            "interval ({}) must be positive",
            interval
        )));
    }
    Ok(())
}

/// Boundaries from `vmin` to at least `vmax`, spaced by `interval`.
///
/// When the range is a whole number of intervals the last boundary is
/// exactly `vmax`; otherwise one more step is added so that `vmax` is
/// covered.
pub fn discrete_levels(vmin: f64, vmax: f64, interval: f64) -> Result<LevelSet> {
    check_linear_inputs(vmin, vmax, interval)?;

    let ratio = (vmax - vmin) / interval;
    let nearest = ratio.round();
    let mut exact = (ratio - nearest).abs() <= STEP_TOLERANCE * nearest.max(1.0);
    let mut steps = if exact { nearest } else { ratio.ceil() };
    if steps < 1.0 {
        steps = 1.0;
        exact = false;
    }
    if steps > MAX_BINS as f64 {
        return Err(ClimplotError::invalid_range(format!(
            "interval ({}) yields {} bins over [{}, {}], more than {}",
            interval, steps, vmin, vmax, MAX_BINS
        )));
    }
    let steps = steps as usize;

    let decimals = interval_decimals(interval) + 6;
    let mut boundaries: Vec<f64> = (0..=steps)
        .map(|k| round_to(vmin + k as f64 * interval, decimals))
        .collect();
    boundaries[0] = vmin;
    if exact {
        boundaries[steps] = vmax;
        if vmin == -vmax {
            mirror_about_zero(&mut boundaries);
        }
    }

    debug!(vmin, vmax, interval, n_levels = boundaries.len(), "Built discrete levels");
    LevelSet::new(boundaries, Spacing::Linear { interval })
}

/// Make `b[n-1-k] == -b[k]` exactly, keeping the lower half
fn mirror_about_zero(boundaries: &mut [f64]) {
    let n = boundaries.len();
    for k in 0..n / 2 {
        boundaries[n - 1 - k] = -boundaries[k];
    }
    if n % 2 == 1 {
        boundaries[n / 2] = 0.0;
    }
}

/// Choose a "nice" interval (1, 2 or 5 times a power of ten) giving roughly
/// `n_levels` bins over the data range, and snap the range outward to
/// multiples of it.
///
/// Boundaries are integer multiples of the interval, so
/// `auto_levels(-b, -a)` is the exact mirror of `auto_levels(a, b)`.
pub fn auto_levels(data_min: f64, data_max: f64, n_levels: usize) -> Result<(f64, LevelSet)> {
    if !(data_min.is_finite() && data_max.is_finite()) {
        return Err(ClimplotError::invalid_range(format!(
            "data range [{}, {}] must be finite",
            data_min, data_max
        )));
    }
    if data_min >= data_max {
        return Err(ClimplotError::invalid_range(format!(
            "vmin ({}) must be less than vmax ({})",
            data_min, data_max
        )));
    }
    if n_levels < 1 {
        return Err(ClimplotError::invalid_range(format!(
            "n_levels ({}) must be >= 1",
            n_levels
        )));
    }

    let raw_interval = (data_max - data_min) / n_levels as f64;
    if !(raw_interval.is_finite() && raw_interval > 0.0) {
        return Err(ClimplotError::invalid_range(format!(
            "range [{}, {}] cannot be split into {} levels",
            data_min, data_max, n_levels
        )));
    }
    let exponent = raw_interval.log10().floor() as i32;

    let mut interval = scale_pow10(1.0, exponent);
    let mut best = f64::INFINITY;
    for mantissa in [1.0, 2.0, 5.0, 10.0] {
        let candidate = scale_pow10(mantissa, exponent);
        let distance = (candidate - raw_interval).abs();
        if distance < best {
            best = distance;
            interval = candidate;
        }
    }
    // subnormal spans underflow the power of ten
    if !(interval.is_finite() && interval > 0.0) {
        return Err(ClimplotError::invalid_range(format!(
            "range [{}, {}] is too narrow for a level interval",
            data_min, data_max
        )));
    }

    let k_min = snap_multiple(data_min / interval, f64::floor);
    let mut k_max = snap_multiple(data_max / interval, f64::ceil);
    if k_max <= k_min {
        k_max = k_min + 1.0;
    }
    if !(k_min.is_finite() && k_max.is_finite()) || k_max - k_min > MAX_BINS as f64 {
        return Err(ClimplotError::invalid_range(format!(
            "range [{}, {}] is too wide for interval {}",
            data_min, data_max, interval
        )));
    }

    let decimals = interval_decimals(interval);
    let boundaries: Vec<f64> = (k_min as i64..=k_max as i64)
        .map(|k| round_to(k as f64 * interval, decimals))
        .collect();

    debug!(
        data_min,
        data_max,
        n_levels,
        interval,
        n_boundaries = boundaries.len(),
        "Chose automatic levels"
    );
    let levels = LevelSet::new(boundaries, Spacing::Linear { interval })?;
    Ok((interval, levels))
}

/// Round `ratio` to an integer, using `outward` unless it already sits on
/// one within tolerance
fn snap_multiple(ratio: f64, outward: fn(f64) -> f64) -> f64 {
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= STEP_TOLERANCE * nearest.abs().max(1.0) {
        nearest
    } else {
        outward(ratio)
    }
}

/// Log-spaced boundaries between `vmin` and `vmax`.
///
/// `per_decade` selects the sub-steps inside each decade: 1 gives powers of
/// ten, 2 gives 1 and 3, 3 gives the 1-2-5 sequence. Larger values use
/// evenly log-spaced sub-steps.
pub fn log_levels(vmin: f64, vmax: f64, per_decade: usize) -> Result<LevelSet> {
    // `!(vmin > 0)` also rejects NaN
    if !(vmin > 0.0) || vmin.is_infinite() {
        return Err(ClimplotError::Domain {
            message: format!("vmin ({}) must be positive for log scale", vmin),
        });
    }
    if !vmax.is_finite() || vmax <= vmin {
        return Err(ClimplotError::invalid_range(format!(
            "vmax ({}) must be greater than vmin ({})",
            vmax, vmin
        )));
    }
    if per_decade == 0 {
        return Err(ClimplotError::invalid_range(
            "per_decade must be at least 1".to_string(),
        ));
    }
    let decades = vmax.log10() - vmin.log10();
    if per_decade > MAX_BINS || decades * per_decade as f64 > MAX_BINS as f64 {
        return Err(ClimplotError::invalid_range(format!(
            "{} levels per decade over [{}, {}] is more than {} bins",
            per_decade, vmin, vmax, MAX_BINS
        )));
    }

    let subs: Vec<f64> = match per_decade {
        1 => vec![1.0],
        2 => vec![1.0, 3.0],
        3 => vec![1.0, 2.0, 5.0],
        n => (0..n)
            .map(|i| 10f64.powf(i as f64 / n as f64))
            .collect(),
    };

    let low = vmin.log10().floor() as i32;
    let high = vmax.log10().ceil() as i32;

    let mut boundaries: Vec<f64> = (low..=high)
        .flat_map(|exp| subs.iter().map(move |&s| scale_pow10(s, exp)))
        .filter(|v| (vmin..=vmax).contains(v))
        .collect();

    if boundaries.len() < 2 {
        boundaries.push(vmin);
        boundaries.push(vmax);
    }
    boundaries.sort_by(f64::total_cmp);
    boundaries.dedup();

    debug!(vmin, vmax, per_decade, n_levels = boundaries.len(), "Built log levels");
    LevelSet::new(boundaries, Spacing::Logarithmic)
}
