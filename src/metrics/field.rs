//! Gridded fields with named axes.
//!
//! A [`GriddedField`] pairs an `ndarray` array with one name per axis. NaN
//! marks missing values. Fields are aligned by axis name: a weight field
//! may carry a subset of the data field's axes and is broadcast over the
//! rest.

use ndarray::{Array, Array1, ArrayD, Axis, Dimension, IxDyn};
use std::collections::HashSet;

use crate::error::{ClimplotError, Result};

/// An N-dimensional `f64` array with named axes
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedField {
    data: ArrayD<f64>,
    dims: Vec<String>,
}

impl GriddedField {
    /// Wrap an array, naming its axes in order
    pub fn new<D, I, S>(data: Array<f64, D>, dims: I) -> Result<Self>
    where
        D: Dimension,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let data = data.into_dyn();
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != data.ndim() {
            return Err(ClimplotError::InvalidDimension {
                message: format!(
                    "{} axis names given for a {}-dimensional array",
                    dims.len(),
                    data.ndim()
                ),
            });
        }
        let mut seen = HashSet::new();
        if let Some(repeated) = dims.iter().find(|d| !seen.insert(d.as_str())) {
            return Err(ClimplotError::InvalidDimension {
                message: format!("axis name '{}' is used more than once", repeated),
            });
        }
        Ok(Self { data, dims })
    }

    /// Wrap an array with axes named `dim_0`, `dim_1`, ...
    pub fn from_array<D: Dimension>(data: Array<f64, D>) -> Self {
        let data = data.into_dyn();
        let dims = (0..data.ndim()).map(|i| format!("dim_{}", i)).collect();
        Self { data, dims }
    }

    /// Build from a flat row-major vector
    pub fn from_shape_vec<I, S>(shape: &[usize], dims: I, values: Vec<f64>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let data = ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|e| {
            ClimplotError::ShapeMismatch {
                message: format!("cannot build field of shape {:?}: {}", shape, e),
            }
        })?;
        Self::new(data, dims)
    }

    /// A one-dimensional series along `dim`
    pub fn series(dim: &str, values: &[f64]) -> Self {
        Self {
            data: Array1::from_vec(values.to_vec()).into_dyn(),
            dims: vec![dim.to_string()],
        }
    }

    /// A zero-dimensional field holding one value
    pub fn scalar(value: f64) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(&[]), value),
            dims: Vec::new(),
        }
    }

    /// A field of the same axes and shape filled with `value`
    pub fn full_like(&self, value: f64) -> Self {
        Self {
            data: ArrayD::from_elem(self.data.raw_dim(), value),
            dims: self.dims.clone(),
        }
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Position of the axis called `name`
    pub fn axis_of(&self, name: &str) -> Result<usize> {
        self.dims
            .iter()
            .position(|d| d == name)
            .ok_or_else(|| ClimplotError::InvalidDimension {
                message: format!("no axis named '{}' (axes: {:?})", name, self.dims),
            })
    }

    /// The value of a zero-dimensional field
    pub fn as_scalar(&self) -> Option<f64> {
        if self.data.ndim() == 0 {
            self.data.iter().next().copied()
        } else {
            None
        }
    }

    pub fn into_array(self) -> ArrayD<f64> {
        self.data
    }

    /// Broadcast `other` onto this field's axes and shape.
    ///
    /// `other` may name a subset of this field's axes, in any order; each
    /// shared axis must have the same length.
    pub(crate) fn broadcast_onto(&self, other: &GriddedField, role: &str) -> Result<ArrayD<f64>> {
        let mut positions = Vec::with_capacity(other.ndim());
        for (axis, name) in other.dims.iter().enumerate() {
            let target = self.dims.iter().position(|d| d == name).ok_or_else(|| {
                ClimplotError::ShapeMismatch {
                    message: format!(
                        "{} has axis '{}' which the data field {:?} lacks",
                        role, name, self.dims
                    ),
                }
            })?;
            if other.shape()[axis] != self.shape()[target] {
                return Err(ClimplotError::ShapeMismatch {
                    message: format!(
                        "{} axis '{}' has length {}, data field has {}",
                        role,
                        name,
                        other.shape()[axis],
                        self.shape()[target]
                    ),
                });
            }
            positions.push(target);
        }

        // Reorder other's axes to follow this field's order
        let mut order: Vec<usize> = (0..other.ndim()).collect();
        order.sort_by_key(|&axis| positions[axis]);
        let mut view = other.data.view().permuted_axes(order);

        // Then insert length-1 axes for everything other lacks
        for target in 0..self.ndim() {
            if !positions.contains(&target) {
                view = view.insert_axis(Axis(target));
            }
        }

        let broadcast = view
            .broadcast(self.data.raw_dim())
            .ok_or_else(|| ClimplotError::ShapeMismatch {
                message: format!(
                    "{} of shape {:?} cannot be broadcast to {:?}",
                    role,
                    other.shape(),
                    self.shape()
                ),
            })?;
        Ok(broadcast.to_owned())
    }
}
