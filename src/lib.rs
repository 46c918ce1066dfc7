//! # climplot
//!
//! Discrete colormaps and area-weighted statistics for climate figures.
//!
//! This library provides the numeric core behind publication-quality maps of
//! climate model output: level boundaries with exact, symmetric values,
//! discrete colormaps that can paint the bins around zero white, and
//! area-weighted validation metrics that handle missing values consistently.
//!
//! ## Key Features
//!
//! - **Clean contour levels**: fixed-interval and automatic "nice" boundaries
//!   with no floating-point residue
//! - **Discrete colormaps**: anomaly, sequential, logarithmic and categorical
//!   maps with out-of-range extension colors
//! - **Area-weighted metrics**: mean, bias, RMSE, standard deviation and
//!   pattern correlation over named axes, with NaN masking and weight
//!   renormalization
//! - **Figure helpers**: style presets, colorbar tick selection and panel labels
//!
//! ## Architecture
//!
//! - **Level/Colormap Engine** ([`colormaps`]): boundaries, bin colors and
//!   the value-to-bin normalizer
//! - **Statistics Engine** ([`metrics`]): one masking kernel shared by the
//!   spatial and time-series metrics
//! - **Presentation** ([`style`], [`ticks`], [`panels`], [`series_style`]):
//!   figure-level defaults

pub mod colormaps;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod panels;
pub mod series_style;
pub mod style;
pub mod ticks;

pub use colormaps::{
    anomaly_cmap, auto_levels, categorical_cmap, discrete_cmap, discrete_levels, log_cmap,
    sequential_cmap, ColorMapping, LevelSet,
};
pub use config::Config;
pub use error::{ClimplotError, Result};
pub use logging::{init_tracing, log_diagnostic, log_error, log_timed_operation};
pub use metrics::{
    area_weighted_bias, area_weighted_corr, area_weighted_mean, area_weighted_rmse,
    area_weighted_std, metrics_summary, print_metrics_summary, timeseries_bias, timeseries_corr,
    timeseries_rmse, timeseries_std, GriddedField, MetricsSummary, Reduce,
};
pub use panels::panel_labels;
pub use series_style::{config_style, LineStyle, SeriesStyle};
pub use style::{StyleConfig, StyleMode};
pub use ticks::{format_tick, select_ticks};
