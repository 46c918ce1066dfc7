//! Categorical mappings: one distinct color per category, no interpolation.

use super::colormap::{Colormap, Palette};
use super::levels::{LevelSet, Spacing, MAX_BINS};
use super::mapping::ColorMapping;
use super::norm::{BoundaryNorm, Extend};
use crate::error::{ClimplotError, Result};

/// One color per category.
///
/// Up to ten categories use the tab10 table; beyond that colors are spread
/// evenly around a cyclic hue wheel. Boundaries sit at `k - 0.5`, so the
/// integer category `k` lands in bin `k`.
pub fn categorical_cmap(n_categories: usize) -> Result<ColorMapping> {
    if n_categories == 0 {
        return Err(ClimplotError::invalid_range(
            "n_categories must be at least 1".to_string(),
        ));
    }
    if n_categories > MAX_BINS {
        return Err(ClimplotError::invalid_range(format!(
            "n_categories ({}) is more than {}",
            n_categories, MAX_BINS
        )));
    }

    let table_len = Palette::Tab10.table_len().unwrap_or(0);
    let (palette, colors) = if n_categories <= table_len {
        let colors = (0..n_categories)
            .filter_map(|i| Palette::Tab10.table_color(i))
            .collect();
        (Palette::Tab10, colors)
    } else {
        // Cyclic palette: i / n keeps the first and last hues apart
        let positions: Vec<f64> = (0..n_categories)
            .map(|i| i as f64 / n_categories as f64)
            .collect();
        (Palette::Sinebow, Palette::Sinebow.sample(&positions))
    };

    let boundaries = (0..=n_categories).map(|k| k as f64 - 0.5).collect();
    let levels = LevelSet::new(boundaries, Spacing::Linear { interval: 1.0 })?;

    Ok(ColorMapping::from_parts(
        format!("{}_{}", palette, n_categories),
        palette,
        colors,
        BoundaryNorm::new(levels, Extend::Neither),
        Vec::new(),
        Vec::new(),
    ))
}
