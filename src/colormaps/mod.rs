//! Discrete colormap construction.
//!
//! Every constructor returns an immutable [`ColorMapping`]: per-bin colors,
//! the [`BoundaryNorm`] that assigns values to bins, and the [`LevelSet`]
//! of boundaries.

pub mod categorical;
pub mod colormap;
pub mod diverging;
pub mod levels;
pub mod mapping;
pub mod norm;
pub mod sequential;

pub use categorical::categorical_cmap;
pub use colormap::{get_colormap, list_colormaps, to_hex, Colormap, Palette, Rgba, WHITE};
pub use diverging::{anomaly_cmap, anomaly_cmap_with, discrete_cmap, discrete_cmap_with};
pub use levels::{auto_levels, discrete_levels, log_levels, LevelSet, Spacing};
pub use mapping::{CmapOptions, ColorMapping, Diagnostic};
pub use norm::{Bin, BoundaryNorm, Extend};
pub use sequential::{log_cmap, log_cmap_with, sequential_cmap, sequential_cmap_with};
