//! JSON input for comparing a model field against observations.
//!
//! JSON has no NaN, so missing cells are written as `null`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::field::GriddedField;
use super::reduce::Reduce;
use super::summary::{metrics_summary, MetricsSummary};
use crate::error::Result;

/// Model, observations and optional weights on one grid, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsInput {
    #[serde(default = "default_name")]
    pub name: String,
    pub dims: Vec<String>,
    pub shape: Vec<usize>,
    pub model: Vec<Option<f64>>,
    pub obs: Vec<Option<f64>>,
    /// Unit weights when absent
    #[serde(default)]
    pub weights: Option<Vec<Option<f64>>>,
}

fn default_name() -> String {
    "Model".to_string()
}

fn to_values(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

impl MetricsInput {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn field(&self, values: &[Option<f64>]) -> Result<GriddedField> {
        GriddedField::from_shape_vec(&self.shape, self.dims.iter().cloned(), to_values(values))
    }

    /// Build the model, observation and weight fields
    pub fn fields(&self) -> Result<(GriddedField, GriddedField, GriddedField)> {
        let model = self.field(&self.model)?;
        let obs = self.field(&self.obs)?;
        let weights = match &self.weights {
            Some(w) => self.field(w)?,
            None => model.full_like(1.0),
        };
        Ok((model, obs, weights))
    }

    /// Summarize over every axis
    pub fn summarize(&self) -> Result<MetricsSummary> {
        let (model, obs, weights) = self.fields()?;
        metrics_summary(&model, &obs, &weights, &Reduce::All, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClimplotError;

    #[test]
    fn test_null_is_missing() {
        let input: MetricsInput = serde_json::from_str(
            r#"{
                "name": "SST",
                "dims": ["y", "x"],
                "shape": [2, 2],
                "model": [null, 3.0, 4.0, 5.0],
                "obs": [1.0, 2.0, 3.0, 4.0]
            }"#,
        )
        .unwrap();
        let summary = input.summarize().unwrap();
        assert_eq!(summary.name, "SST");
        assert!((summary.bias - 1.0).abs() < 1e-12);
        assert!((summary.model_mean - 4.0).abs() < 1e-12);
        // obs keeps its own mask for its mean
        assert!((summary.obs_mean - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_length() {
        let input = MetricsInput {
            name: default_name(),
            dims: vec!["x".to_string()],
            shape: vec![3],
            model: vec![Some(1.0), Some(2.0)],
            obs: vec![Some(1.0), Some(2.0), Some(3.0)],
            weights: None,
        };
        assert!(matches!(input.fields(), Err(ClimplotError::ShapeMismatch { .. })));
    }
}
