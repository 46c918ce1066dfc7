//! Test data generation utilities.
//!
//! This module builds small gridded fields with known patterns, in the
//! shapes climate model output usually has: (time, lat, lon) data with
//! cos(latitude) area weights.

use climplot::GriddedField;
use ndarray::{Array1, Array2, Array3};
use std::path::{Path, PathBuf};

/// Cell-center latitudes from south to north, in degrees
pub fn latitudes(nlat: usize) -> Vec<f64> {
    let step = 180.0 / nlat as f64;
    (0..nlat).map(|i| -90.0 + step * (i as f64 + 0.5)).collect()
}

/// cos(latitude) weights over ("lat",) only
pub fn cos_lat_weights(nlat: usize) -> GriddedField {
    let weights: Array1<f64> = latitudes(nlat)
        .into_iter()
        .map(|lat| lat.to_radians().cos())
        .collect();
    GriddedField::new(weights, ["lat"]).unwrap()
}

/// cos(latitude) weights broadcast over ("lat", "lon")
pub fn cos_lat_weights_2d(nlat: usize, nlon: usize) -> GriddedField {
    let lats = latitudes(nlat);
    let weights = Array2::from_shape_fn((nlat, nlon), |(i, _)| lats[i].to_radians().cos());
    GriddedField::new(weights, ["lat", "lon"]).unwrap()
}

/// A smooth temperature-like pattern on ("lat", "lon"), warm at the equator
pub fn temperature_2d(nlat: usize, nlon: usize) -> GriddedField {
    let lats = latitudes(nlat);
    let data = Array2::from_shape_fn((nlat, nlon), |(i, j)| {
        let lat = lats[i].to_radians();
        let lon = 2.0 * std::f64::consts::PI * j as f64 / nlon as f64;
        288.0 + 30.0 * lat.cos() - 10.0 + 2.0 * lon.sin()
    });
    GriddedField::new(data, ["lat", "lon"]).unwrap()
}

/// The 2-D pattern repeated over `ntime` steps with a warming trend
pub fn temperature_3d(ntime: usize, nlat: usize, nlon: usize) -> GriddedField {
    let base = temperature_2d(nlat, nlon);
    let data = Array3::from_shape_fn((ntime, nlat, nlon), |(t, i, j)| {
        base.data()[[i, j]] + 0.1 * t as f64
    });
    GriddedField::new(data, ["time", "lat", "lon"]).unwrap()
}

/// A deterministic, non-trivial perturbation of `field`
pub fn perturbed(field: &GriddedField, amplitude: f64) -> GriddedField {
    let mut data = field.data().clone();
    for (k, value) in data.iter_mut().enumerate() {
        *value += amplitude * ((k as f64) * 0.7).sin();
    }
    GriddedField::new(data, field.dims().to_vec()).unwrap()
}

/// Copy of `field` with NaN at the given flat (row-major) positions
pub fn with_missing(field: &GriddedField, positions: &[usize]) -> GriddedField {
    let mut data = field.data().clone();
    for (k, value) in data.iter_mut().enumerate() {
        if positions.contains(&k) {
            *value = f64::NAN;
        }
    }
    GriddedField::new(data, field.dims().to_vec()).unwrap()
}

/// Flattened values of a field with the given flat positions removed,
/// as a 1-D field along "cell"
pub fn without_cells(field: &GriddedField, positions: &[usize]) -> GriddedField {
    let values: Vec<f64> = field
        .data()
        .iter()
        .enumerate()
        .filter(|(k, _)| !positions.contains(k))
        .map(|(_, &v)| v)
        .collect();
    GriddedField::series("cell", &values)
}

/// A 2-D field flattened to a 1-D field along "cell"
pub fn flattened(field: &GriddedField) -> GriddedField {
    without_cells(field, &[])
}

/// Write `contents` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
