//! Metrics for one-dimensional series (already spatially reduced).
//!
//! These are the area-weighted statistics with every weight equal to one,
//! routed through the same kernel so NaN handling is identical.

use super::field::GriddedField;
use super::reduce::Reduce;
use super::spatial::{area_weighted_bias, area_weighted_corr, area_weighted_rmse, area_weighted_std};
use crate::error::{ClimplotError, Result};

const TIME: &str = "time";

fn unit_weights(len: usize) -> GriddedField {
    GriddedField::series(TIME, &vec![1.0; len])
}

fn into_scalar(field: GriddedField) -> Result<f64> {
    field.as_scalar().ok_or_else(|| ClimplotError::InvalidDimension {
        message: format!("expected a scalar, got axes {:?}", field.dims()),
    })
}

/// Mean of `model - obs` over positions valid in both
pub fn timeseries_bias(model: &[f64], obs: &[f64]) -> Result<f64> {
    let weights = unit_weights(model.len());
    into_scalar(area_weighted_bias(
        &GriddedField::series(TIME, model),
        &GriddedField::series(TIME, obs),
        &weights,
        &Reduce::All,
    )?)
}

/// Root-mean-square difference over positions valid in both
pub fn timeseries_rmse(model: &[f64], obs: &[f64]) -> Result<f64> {
    let weights = unit_weights(model.len());
    into_scalar(area_weighted_rmse(
        &GriddedField::series(TIME, model),
        &GriddedField::series(TIME, obs),
        &weights,
        &Reduce::All,
    )?)
}

/// Pearson correlation over positions valid in both
pub fn timeseries_corr(x: &[f64], y: &[f64]) -> Result<f64> {
    let weights = unit_weights(x.len());
    into_scalar(area_weighted_corr(
        &GriddedField::series(TIME, x),
        &GriddedField::series(TIME, y),
        &weights,
        &Reduce::All,
    )?)
}

/// Population standard deviation of the non-NaN values
pub fn timeseries_std(data: &[f64]) -> Result<f64> {
    let weights = unit_weights(data.len());
    into_scalar(area_weighted_std(
        &GriddedField::series(TIME, data),
        &weights,
        &Reduce::All,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeseries_bias() {
        let bias = timeseries_bias(&[1.0, 2.0, 3.0, 4.0], &[0.5, 1.5, 2.5, 3.5]).unwrap();
        assert!((bias - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_timeseries_rmse() {
        let rmse = timeseries_rmse(&[1.0, 2.0, 3.0, 4.0], &[0.0, 2.0, 3.0, 5.0]).unwrap();
        assert!((rmse - 0.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_timeseries_corr() {
        let r = timeseries_corr(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_timeseries_std_matches_population_std() {
        let std = timeseries_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_timeseries_nan_handling() {
        let with_gap = timeseries_bias(&[1.0, f64::NAN, 3.0], &[0.0, 5.0, 2.0]).unwrap();
        let without = timeseries_bias(&[1.0, 3.0], &[0.0, 2.0]).unwrap();
        assert_eq!(with_gap, without);

        let r = timeseries_corr(&[1.0, 2.0, f64::NAN, 4.0], &[1.0, 2.0, 100.0, 4.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_timeseries_errors() {
        assert!(matches!(
            timeseries_bias(&[1.0, 2.0], &[1.0]),
            Err(ClimplotError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            timeseries_std(&[f64::NAN, f64::NAN]),
            Err(ClimplotError::EmptyReduction { .. })
        ));
        assert!(matches!(
            timeseries_corr(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(ClimplotError::DegenerateInput { .. })
        ));
        assert!(matches!(
            timeseries_std(&[]),
            Err(ClimplotError::EmptyReduction { .. })
        ));
    }
}
