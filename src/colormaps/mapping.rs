//! The immutable result of every colormap constructor.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::colormap::{Colormap, Palette, Rgba, WHITE};
use super::levels::LevelSet;
use super::norm::{Bin, BoundaryNorm, Extend};
use crate::logging::log_diagnostic;

/// Non-fatal problems noticed while building a mapping.
///
/// They never change the mapping; they are recorded on it and logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A diverging mapping was asked for with |vmin| != |vmax|
    AsymmetricRange { vmin: f64, vmax: f64 },
    /// The requested white band lies outside the level range
    CenterOutOfRange { center: f64, vmin: f64, vmax: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AsymmetricRange { vmin, vmax } => write!(
                f,
                "anomaly range is not symmetric about zero (vmin = {}, vmax = {})",
                vmin, vmax
            ),
            Diagnostic::CenterOutOfRange { center, vmin, vmax } => write!(
                f,
                "white band center {} lies outside [{}, {}]",
                center, vmin, vmax
            ),
        }
    }
}

/// Optional overrides accepted by the `*_with` constructors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CmapOptions {
    /// Base palette; each constructor has its own default
    #[serde(default)]
    pub palette: Option<Palette>,

    /// Out-of-range extension; each constructor has its own default
    #[serde(default)]
    pub extend: Option<Extend>,

    /// Let `sequential_cmap` accept a negative vmin
    #[serde(default)]
    pub allow_negative: bool,
}

/// A discrete color mapping: one color per bin, optional extension colors,
/// and the normalizer that assigns values to bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMapping {
    name: String,
    palette: Palette,
    colors: Vec<Rgba>,
    under: Option<Rgba>,
    over: Option<Rgba>,
    norm: BoundaryNorm,
    white_bins: Vec<usize>,
    diagnostics: Vec<Diagnostic>,
}

impl ColorMapping {
    pub(crate) fn from_parts(
        name: String,
        palette: Palette,
        colors: Vec<Rgba>,
        norm: BoundaryNorm,
        white_bins: Vec<usize>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let extend = norm.extend();
        let under = extend.has_min().then(|| palette.map_normalized(0.0));
        let over = extend.has_max().then(|| palette.map_normalized(1.0));
        for diagnostic in &diagnostics {
            log_diagnostic(diagnostic, palette.as_str());
        }
        Self {
            name,
            palette,
            colors,
            under,
            over,
            norm,
            white_bins,
            diagnostics,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// One color per bin, lowest bin first
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn norm(&self) -> &BoundaryNorm {
        &self.norm
    }

    pub fn levels(&self) -> &LevelSet {
        self.norm.levels()
    }

    pub fn extend(&self) -> Extend {
        self.norm.extend()
    }

    pub fn under_color(&self) -> Option<Rgba> {
        self.under
    }

    pub fn over_color(&self) -> Option<Rgba> {
        self.over
    }

    pub fn n_bins(&self) -> usize {
        self.colors.len()
    }

    /// Bins plus extension colors
    pub fn n_colors(&self) -> usize {
        self.colors.len() + self.under.iter().count() + self.over.iter().count()
    }

    /// Indices of bins painted white by `center_on_white`
    pub fn white_bins(&self) -> &[usize] {
        &self.white_bins
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Color for a data value. `None` for NaN, and for out-of-range values
    /// on a side without an extension.
    pub fn color_for(&self, value: f64) -> Option<Rgba> {
        match self.norm.bin(value) {
            Bin::Index(i) => self.colors.get(i).copied(),
            Bin::Under => self.under,
            Bin::Over => self.over,
            Bin::Missing => None,
        }
    }

    /// The mapping as a flat list: under color, bin colors, over color
    pub fn listed_colors(&self) -> Vec<Rgba> {
        self.under
            .into_iter()
            .chain(self.colors.iter().copied())
            .chain(self.over)
            .collect()
    }
}

/// Palette position of each bin: the bin center's relative place among `n`
/// evenly spaced bins.
pub(crate) fn bin_positions(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect()
}

/// Bins that `center` whitens: the two bins adjacent to it when it sits on
/// a boundary, else the single bin containing it.
pub(crate) fn white_band(levels: &LevelSet, center: f64) -> Option<Vec<usize>> {
    let b = levels.boundaries();
    let n_bins = levels.n_bins();
    let tolerance = 1e-9 * (levels.last() - levels.first());

    if center < b[0] - tolerance || center > b[b.len() - 1] + tolerance {
        return None;
    }
    if let Some(j) = b.iter().position(|&x| (x - center).abs() <= tolerance) {
        let bins = [j.checked_sub(1), Some(j)]
            .into_iter()
            .flatten()
            .filter(|&i| i < n_bins)
            .collect();
        return Some(bins);
    }
    let upper = b.partition_point(|&x| x <= center);
    Some(vec![(upper - 1).min(n_bins - 1)])
}

/// Sample colors for every bin, optionally with a white band centered on
/// `center`. Bins outside the band keep a gradient that still spans the
/// whole palette.
pub(crate) fn build_mapping(
    name: String,
    palette: Palette,
    levels: LevelSet,
    extend: Extend,
    center: Option<f64>,
    mut diagnostics: Vec<Diagnostic>,
) -> ColorMapping {
    let n = levels.n_bins();
    let band = match center {
        Some(c) => {
            let band = white_band(&levels, c);
            if band.is_none() {
                diagnostics.push(Diagnostic::CenterOutOfRange {
                    center: c,
                    vmin: levels.first(),
                    vmax: levels.last(),
                });
            }
            band
        }
        None => None,
    };

    let (colors, white_bins) = match band {
        Some(white) => {
            let first_white = white[0];
            let last_white = white[white.len() - 1];
            let n_below = first_white;
            let n_above = n - 1 - last_white;

            let mut positions = Vec::with_capacity(n);
            positions.extend((0..n_below).map(|j| 0.5 * j as f64 / n_below as f64));
            positions.extend(std::iter::repeat(0.5).take(white.len()));
            positions.extend((0..n_above).map(|j| 0.5 + 0.5 * (j + 1) as f64 / n_above as f64));

            let mut colors = palette.sample(&positions);
            for &i in &white {
                colors[i] = WHITE;
            }
            (colors, white)
        }
        None => (palette.sample(&bin_positions(n)), Vec::new()),
    };

    ColorMapping::from_parts(
        name,
        palette,
        colors,
        BoundaryNorm::new(levels, extend),
        white_bins,
        diagnostics,
    )
}
