//! Bundled validation metrics and their fixed-precision rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::field::GriddedField;
use super::reduce::Reduce;
use super::spatial::{
    area_weighted_bias, area_weighted_corr, area_weighted_mean, area_weighted_rmse,
    area_weighted_std,
};
use crate::error::{ClimplotError, Result};

/// Scalar comparison of a model field against observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub name: String,
    pub bias: f64,
    pub rmse: f64,
    pub correlation: f64,
    pub model_mean: f64,
    pub obs_mean: f64,
    pub model_std: f64,
    pub obs_std: f64,
}

fn scalar(result: Result<GriddedField>, metric: &str) -> Result<f64> {
    let field = result?;
    field.as_scalar().ok_or_else(|| ClimplotError::InvalidDimension {
        message: format!(
            "metrics_summary needs a reduction over every axis, but {} keeps {:?}",
            metric,
            field.dims()
        ),
    })
}

/// Bias, RMSE, correlation and both fields' weighted mean and std.
///
/// `dim` must reduce every axis so that each metric is a single number.
pub fn metrics_summary(
    model: &GriddedField,
    obs: &GriddedField,
    weights: &GriddedField,
    dim: &Reduce,
    name: &str,
) -> Result<MetricsSummary> {
    Ok(MetricsSummary {
        name: name.to_string(),
        bias: scalar(area_weighted_bias(model, obs, weights, dim), "bias")?,
        rmse: scalar(area_weighted_rmse(model, obs, weights, dim), "rmse")?,
        correlation: scalar(area_weighted_corr(model, obs, weights, dim), "correlation")?,
        model_mean: scalar(area_weighted_mean(model, weights, dim), "model_mean")?,
        obs_mean: scalar(area_weighted_mean(obs, weights, dim), "obs_mean")?,
        model_std: scalar(area_weighted_std(model, weights, dim), "model_std")?,
        obs_std: scalar(area_weighted_std(obs, weights, dim), "obs_std")?,
    })
}

/// Render a summary with four decimals; the bias carries an explicit sign.
pub fn format_metrics_summary(metrics: &MetricsSummary, name: &str) -> String {
    let rows = [
        format!("{} Validation Metrics:", name),
        format!("  Bias (model - obs):     {:+.4}", metrics.bias),
        format!("  RMSE:                   {:.4}", metrics.rmse),
        format!("  Correlation:            {:.4}", metrics.correlation),
        format!("  Model mean:             {:.4}", metrics.model_mean),
        format!("  Obs mean:               {:.4}", metrics.obs_mean),
        format!("  Model std:              {:.4}", metrics.model_std),
        format!("  Obs std:                {:.4}", metrics.obs_std),
    ];
    rows.join("\n")
}

/// Print [`format_metrics_summary`] to stdout, preceded by a blank line
pub fn print_metrics_summary(metrics: &MetricsSummary, name: &str) {
    println!("\n{}", format_metrics_summary(metrics, name));
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_metrics_summary(self, &self.name))
    }
}
