//! Diverging mappings (two hues radiating from a neutral center).
//!
//! These suit signed data such as anomalies and model-minus-observation
//! differences.

use super::colormap::Palette;
use super::levels::discrete_levels;
use super::mapping::{build_mapping, CmapOptions, ColorMapping, Diagnostic};
use crate::error::Result;

/// Diverging mapping symmetric about zero, red for positive values.
///
/// An asymmetric range is used as given; the mapping carries a
/// [`Diagnostic::AsymmetricRange`] instead.
pub fn anomaly_cmap(
    vmin: f64,
    vmax: f64,
    interval: f64,
    center_on_white: bool,
) -> Result<ColorMapping> {
    anomaly_cmap_with(vmin, vmax, interval, center_on_white, &CmapOptions::default())
}

/// [`anomaly_cmap`] with palette and extension overrides
pub fn anomaly_cmap_with(
    vmin: f64,
    vmax: f64,
    interval: f64,
    center_on_white: bool,
    options: &CmapOptions,
) -> Result<ColorMapping> {
    let levels = discrete_levels(vmin, vmax, interval)?;

    let mut diagnostics = Vec::new();
    let scale = vmin.abs().max(vmax.abs());
    if (vmin.abs() - vmax.abs()).abs() > 1e-12 * scale {
        diagnostics.push(Diagnostic::AsymmetricRange { vmin, vmax });
    }

    let palette = options.palette.unwrap_or(Palette::RdBuR);
    let name = if center_on_white {
        format!("{}_white_center", palette)
    } else {
        palette.to_string()
    };
    Ok(build_mapping(
        name,
        palette,
        levels,
        options.extend.unwrap_or_default(),
        center_on_white.then_some(0.0),
        diagnostics,
    ))
}

/// General discrete mapping over `[vmin, vmax]`.
///
/// With `center_on_white` the white band sits on the middle of the range
/// rather than on zero.
pub fn discrete_cmap(
    vmin: f64,
    vmax: f64,
    interval: f64,
    center_on_white: bool,
) -> Result<ColorMapping> {
    discrete_cmap_with(vmin, vmax, interval, center_on_white, &CmapOptions::default())
}

/// [`discrete_cmap`] with palette and extension overrides
pub fn discrete_cmap_with(
    vmin: f64,
    vmax: f64,
    interval: f64,
    center_on_white: bool,
    options: &CmapOptions,
) -> Result<ColorMapping> {
    let levels = discrete_levels(vmin, vmax, interval)?;
    let palette = options.palette.unwrap_or(Palette::RdBuR);
    let center = 0.5 * (vmin + vmax);
    let name = if center_on_white {
        format!("{}_white_center", palette)
    } else {
        palette.to_string()
    };
    Ok(build_mapping(
        name,
        palette,
        levels,
        options.extend.unwrap_or_default(),
        center_on_white.then_some(center),
        Vec::new(),
    ))
}
