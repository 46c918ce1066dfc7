//! Area-weighted statistics over gridded fields.
//!
//! Grid cells near the poles are much smaller than equatorial ones, so a
//! plain average over-weights high latitudes. Every function here weights
//! each cell by its area (or any non-negative importance), drops cells that
//! are NaN in any input, and renormalizes the remaining weights.

use super::field::GriddedField;
use super::reduce::{reduce, Reduce};
use crate::error::{ClimplotError, Result};

/// Σ(wᵢ·xᵢ) / Σwᵢ over valid cells
pub fn area_weighted_mean(
    field: &GriddedField,
    weights: &GriddedField,
    dim: &Reduce,
) -> Result<GriddedField> {
    reduce("area_weighted_mean", &[field], weights, dim, |lane| {
        Ok(lane.mean(0))
    })
}

/// Mean of `model - obs`, differenced cell by cell before weighting
pub fn area_weighted_bias(
    model: &GriddedField,
    obs: &GriddedField,
    weights: &GriddedField,
    dim: &Reduce,
) -> Result<GriddedField> {
    reduce("area_weighted_bias", &[model, obs], weights, dim, |lane| {
        let (m, o) = (lane.column(0), lane.column(1));
        Ok(lane.weighted(|i| m[i] - o[i]))
    })
}

/// Root of the weighted mean squared difference
pub fn area_weighted_rmse(
    model: &GriddedField,
    obs: &GriddedField,
    weights: &GriddedField,
    dim: &Reduce,
) -> Result<GriddedField> {
    reduce("area_weighted_rmse", &[model, obs], weights, dim, |lane| {
        let (m, o) = (lane.column(0), lane.column(1));
        Ok(lane.weighted(|i| (m[i] - o[i]).powi(2)).sqrt())
    })
}

/// Weighted population standard deviation about the weighted mean
pub fn area_weighted_std(
    field: &GriddedField,
    weights: &GriddedField,
    dim: &Reduce,
) -> Result<GriddedField> {
    reduce("area_weighted_std", &[field], weights, dim, |lane| {
        Ok(lane.std(0))
    })
}

/// Weighted Pearson (pattern) correlation, in [-1, 1].
///
/// Cells missing in either field are excluded from the covariance and from
/// both standard deviations. A constant field has no defined correlation
/// and yields [`ClimplotError::DegenerateInput`].
pub fn area_weighted_corr(
    x: &GriddedField,
    y: &GriddedField,
    weights: &GriddedField,
    dim: &Reduce,
) -> Result<GriddedField> {
    reduce("area_weighted_corr", &[x, y], weights, dim, |lane| {
        let (std_x, std_y) = (lane.std(0), lane.std(1));
        if std_x == 0.0 || std_y == 0.0 {
            return Err(ClimplotError::DegenerateInput {
                message: format!(
                    "correlation undefined for zero standard deviation (std_x = {}, std_y = {})",
                    std_x, std_y
                ),
            });
        }
        let (mean_x, mean_y) = (lane.mean(0), lane.mean(1));
        let (xs, ys) = (lane.column(0), lane.column(1));
        let covariance = lane.weighted(|i| (xs[i] - mean_x) * (ys[i] - mean_y));
        Ok((covariance / (std_x * std_y)).clamp(-1.0, 1.0))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn grid(values: ndarray::Array2<f64>) -> GriddedField {
        GriddedField::new(values, ["y", "x"]).unwrap()
    }

    fn scalar(result: Result<GriddedField>) -> f64 {
        result.unwrap().as_scalar().unwrap()
    }

    #[test]
    fn test_mean_concrete_scenarios() {
        let field = grid(array![[1.0, 2.0], [3.0, 4.0]]);
        let ones = field.full_like(1.0);
        assert_eq!(scalar(area_weighted_mean(&field, &ones, &Reduce::All)), 2.5);

        let lower = grid(array![[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(scalar(area_weighted_mean(&field, &lower, &Reduce::All)), 3.5);

        let with_nan = grid(array![[f64::NAN, 2.0], [3.0, 4.0]]);
        let mean = scalar(area_weighted_mean(&with_nan, &ones, &Reduce::All));
        assert!((mean - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_unequal_weights() {
        let field = grid(array![[1.0, 2.0], [3.0, 4.0]]);
        let weights = grid(array![[0.5, 0.5], [1.0, 1.0]]);
        let mean = scalar(area_weighted_mean(&field, &weights, &Reduce::All));
        assert!((mean - 8.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_bias_and_rmse() {
        let model = grid(array![[2.0, 3.0], [4.0, 5.0]]);
        let obs = grid(array![[1.0, 2.0], [3.0, 4.0]]);
        let ones = obs.full_like(1.0);
        assert_eq!(scalar(area_weighted_bias(&model, &obs, &ones, &Reduce::All)), 1.0);
        assert_eq!(scalar(area_weighted_rmse(&model, &obs, &ones, &Reduce::All)), 1.0);
    }

    #[test]
    fn test_bias_uses_joint_mask() {
        // difference-first: obs' missing cell removes model's value too
        let model = grid(array![[10.0, 1.0], [1.0, 1.0]]);
        let obs = grid(array![[f64::NAN, 0.0], [0.0, 0.0]]);
        let ones = obs.full_like(1.0);
        let bias = scalar(area_weighted_bias(&model, &obs, &ones, &Reduce::All));
        assert!((bias - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_corr_perfect_and_anti() {
        let x = grid(array![[1.0, 2.0], [3.0, 4.0]]);
        let y = grid(array![[2.0, 4.0], [6.0, 8.0]]);
        let neg = grid(array![[-1.0, -2.0], [-3.0, -4.0]]);
        let weights = grid(array![[0.2, 0.4], [1.0, 3.0]]);
        let r = scalar(area_weighted_corr(&x, &y, &weights, &Reduce::All));
        assert!((r - 1.0).abs() < 1e-12);
        let r = scalar(area_weighted_corr(&x, &neg, &weights, &Reduce::All));
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_corr_degenerate() {
        let flat = grid(array![[1.0, 1.0], [1.0, 1.0]]);
        let x = grid(array![[1.0, 2.0], [3.0, 4.0]]);
        let ones = flat.full_like(1.0);
        assert!(matches!(
            area_weighted_corr(&flat, &flat, &ones, &Reduce::All),
            Err(ClimplotError::DegenerateInput { .. })
        ));
        assert!(matches!(
            area_weighted_corr(&x, &flat, &ones, &Reduce::All),
            Err(ClimplotError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_std() {
        let field = grid(array![[1.0, 3.0], [1.0, 3.0]]);
        let ones = field.full_like(1.0);
        assert_eq!(scalar(area_weighted_std(&field, &ones, &Reduce::All)), 1.0);

        let flat = field.full_like(7.25);
        let weights = grid(array![[0.1, 5.0], [2.0, 0.3]]);
        assert_eq!(scalar(area_weighted_std(&flat, &weights, &Reduce::All)), 0.0);
    }

    #[test]
    fn test_spatial_mean_per_time_step() {
        let field = GriddedField::new(
            array![[[1.0, 2.0], [3.0, 4.0]], [[10.0, 20.0], [30.0, 40.0]]],
            ["time", "y", "x"],
        )
        .unwrap();
        let weights = grid(array![[1.0, 1.0], [1.0, 1.0]]);
        let series = area_weighted_mean(&field, &weights, &Reduce::over(["y", "x"])).unwrap();
        assert_eq!(series.dims(), &["time".to_string()]);
        assert_eq!(series.data().as_slice().unwrap(), &[2.5, 25.0]);
    }

    #[test]
    fn test_mismatched_fields() {
        let model = grid(array![[1.0, 2.0], [3.0, 4.0]]);
        let obs = GriddedField::new(array![1.0, 2.0], ["x"]).unwrap();
        let ones = model.full_like(1.0);
        assert!(matches!(
            area_weighted_bias(&model, &obs, &ones, &Reduce::All),
            Err(ClimplotError::ShapeMismatch { .. })
        ));
    }
}
