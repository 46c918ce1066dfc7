//! Sequential mappings (single-direction progression).
//!
//! These suit data that progresses from low to high, on a linear or a
//! logarithmic scale.

use super::colormap::Palette;
use super::levels::{discrete_levels, log_levels};
use super::mapping::{build_mapping, CmapOptions, ColorMapping};
use super::norm::Extend;
use crate::error::{ClimplotError, Result};

/// Sequential mapping for non-negative data, extended above `vmax`.
pub fn sequential_cmap(vmin: f64, vmax: f64, interval: f64) -> Result<ColorMapping> {
    sequential_cmap_with(vmin, vmax, interval, &CmapOptions::default())
}

/// [`sequential_cmap`] with overrides; `allow_negative` lifts the
/// non-negative restriction on `vmin`
pub fn sequential_cmap_with(
    vmin: f64,
    vmax: f64,
    interval: f64,
    options: &CmapOptions,
) -> Result<ColorMapping> {
    if vmin < 0.0 && !options.allow_negative {
        return Err(ClimplotError::invalid_range(format!(
            "sequential colormaps expect vmin >= 0, got {} (set allow_negative to override)",
            vmin
        )));
    }
    let levels = discrete_levels(vmin, vmax, interval)?;
    let palette = options.palette.unwrap_or(Palette::Viridis);
    Ok(build_mapping(
        palette.to_string(),
        palette,
        levels,
        options.extend.unwrap_or(Extend::Max),
        None,
        Vec::new(),
    ))
}

/// Mapping with log-spaced boundaries; see [`log_levels`] for `per_decade`.
pub fn log_cmap(vmin: f64, vmax: f64, per_decade: usize) -> Result<ColorMapping> {
    log_cmap_with(vmin, vmax, per_decade, &CmapOptions::default())
}

/// [`log_cmap`] with palette and extension overrides
pub fn log_cmap_with(
    vmin: f64,
    vmax: f64,
    per_decade: usize,
    options: &CmapOptions,
) -> Result<ColorMapping> {
    let levels = log_levels(vmin, vmax, per_decade)?;
    let palette = options.palette.unwrap_or(Palette::Viridis);
    Ok(build_mapping(
        format!("{}_log", palette),
        palette,
        levels,
        options.extend.unwrap_or_default(),
        None,
        Vec::new(),
    ))
}
