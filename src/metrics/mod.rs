//! Area-weighted statistics for gridded climate data.
//!
//! Missing values (NaN) in any input are excluded together with their
//! weight, and the remaining weights are renormalized by their own sum.
//! Spatial and time-series metrics share one kernel so the NaN semantics
//! never drift apart.

pub mod field;
pub mod input;
pub mod reduce;
pub mod spatial;
pub mod summary;
pub mod timeseries;

pub use field::GriddedField;
pub use input::MetricsInput;
pub use reduce::Reduce;
pub use spatial::{
    area_weighted_bias, area_weighted_corr, area_weighted_mean, area_weighted_rmse,
    area_weighted_std,
};
pub use summary::{format_metrics_summary, metrics_summary, print_metrics_summary, MetricsSummary};
pub use timeseries::{timeseries_bias, timeseries_corr, timeseries_rmse, timeseries_std};
