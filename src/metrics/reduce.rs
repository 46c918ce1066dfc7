//! The shared masking and renormalization kernel.
//!
//! Every statistic, spatial or time series, goes through [`reduce`]: the
//! inputs are aligned to the first field, laid out as one row per output
//! cell, masked wherever any input or the weight is NaN, and the surviving
//! weights are divided by their own sum.

use ndarray::{Array2, ArrayD, ArrayView1, IxDyn};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::field::GriddedField;
use crate::error::{ClimplotError, Result};

/// Which axes a statistic reduces over
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Reduce {
    /// Every axis; the result is a scalar
    #[default]
    All,
    /// The named axes; the rest are kept
    Dims(Vec<String>),
}

impl Reduce {
    /// Reduce over the named axes
    pub fn over<I, S>(dims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Reduce::Dims(dims.into_iter().map(Into::into).collect())
    }

    /// Axis indices of `field` reduced by this selection, ascending
    fn axes(&self, field: &GriddedField) -> Result<Vec<usize>> {
        match self {
            Reduce::All => Ok((0..field.ndim()).collect()),
            Reduce::Dims(names) => {
                let mut axes = Vec::with_capacity(names.len());
                for name in names {
                    let axis = field.axis_of(name)?;
                    if axes.contains(&axis) {
                        return Err(ClimplotError::InvalidDimension {
                            message: format!("axis '{}' is listed twice", name),
                        });
                    }
                    axes.push(axis);
                }
                axes.sort_unstable();
                Ok(axes)
            }
        }
    }
}

impl From<&str> for Reduce {
    fn from(dim: &str) -> Self {
        Reduce::Dims(vec![dim.to_string()])
    }
}

/// The valid, renormalized samples of one output cell
pub(crate) struct Lane {
    weights: Vec<f64>,
    columns: Vec<Vec<f64>>,
}

impl Lane {
    /// Σ wᵢ·f(i) over the lane
    pub(crate) fn weighted<F: Fn(usize) -> f64>(&self, f: F) -> f64 {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, w)| w * f(i))
            .sum()
    }

    pub(crate) fn column(&self, field: usize) -> &[f64] {
        &self.columns[field]
    }

    pub(crate) fn mean(&self, field: usize) -> f64 {
        let x = self.column(field);
        self.weighted(|i| x[i])
    }

    /// Population standard deviation about the weighted mean; exactly zero
    /// when the lane is constant.
    pub(crate) fn std(&self, field: usize) -> f64 {
        let x = self.column(field);
        if x.windows(2).all(|w| w[0] == w[1]) {
            return 0.0;
        }
        let mean = self.mean(field);
        self.weighted(|i| (x[i] - mean).powi(2)).max(0.0).sqrt()
    }
}

/// Inputs laid out as (output cells × reduced positions)
struct Layout {
    kept_dims: Vec<String>,
    kept_shape: Vec<usize>,
    weights: Array2<f64>,
    fields: Vec<Array2<f64>>,
}

fn to_matrix(data: &ArrayD<f64>, order: &[usize], rows: usize, cols: usize) -> Result<Array2<f64>> {
    data.view()
        .permuted_axes(order.to_vec())
        .as_standard_layout()
        .into_owned()
        .into_shape((rows, cols))
        .map_err(|e| ClimplotError::ShapeMismatch {
            message: format!("cannot lay out data as {}x{}: {}", rows, cols, e),
        })
}

fn layout(fields: &[&GriddedField], weights: &GriddedField, dim: &Reduce) -> Result<Layout> {
    let primary = fields[0];
    let reduced = dim.axes(primary)?;
    let kept: Vec<usize> = (0..primary.ndim()).filter(|a| !reduced.contains(a)).collect();

    let kept_dims: Vec<String> = kept.iter().map(|&a| primary.dims()[a].clone()).collect();
    let kept_shape: Vec<usize> = kept.iter().map(|&a| primary.shape()[a]).collect();
    let rows: usize = kept_shape.iter().product();
    let cols: usize = reduced.iter().map(|&a| primary.shape()[a]).product();

    let order: Vec<usize> = kept.iter().chain(reduced.iter()).copied().collect();

    let mut matrices = Vec::with_capacity(fields.len());
    matrices.push(to_matrix(primary.data(), &order, rows, cols)?);
    for (i, other) in fields.iter().enumerate().skip(1) {
        if other.ndim() != primary.ndim() {
            return Err(ClimplotError::ShapeMismatch {
                message: format!(
                    "field {} has axes {:?}, expected the axes {:?}",
                    i + 1,
                    other.dims(),
                    primary.dims()
                ),
            });
        }
        let aligned = primary.broadcast_onto(other, "second field")?;
        matrices.push(to_matrix(&aligned, &order, rows, cols)?);
    }

    let weights = primary.broadcast_onto(weights, "weights")?;
    let weights = to_matrix(&weights, &order, rows, cols)?;

    Ok(Layout {
        kept_dims,
        kept_shape,
        weights,
        fields: matrices,
    })
}

/// Mask and renormalize one row
fn lane(op: &str, cell: usize, weights: ArrayView1<f64>, fields: &[ArrayView1<f64>]) -> Result<Lane> {
    let mut kept_weights = Vec::with_capacity(weights.len());
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(weights.len()); fields.len()];

    for (j, &w) in weights.iter().enumerate() {
        if w.is_nan() || fields.iter().any(|f| f[j].is_nan()) {
            continue;
        }
        if w < 0.0 {
            return Err(ClimplotError::NonPositiveWeight {
                message: format!("{}: negative weight {} in output cell {}", op, w, cell),
            });
        }
        kept_weights.push(w);
        for (column, f) in columns.iter_mut().zip(fields) {
            column.push(f[j]);
        }
    }

    if kept_weights.is_empty() {
        return Err(ClimplotError::EmptyReduction {
            message: format!("{}: no valid values in output cell {}", op, cell),
        });
    }
    let total: f64 = kept_weights.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return Err(ClimplotError::NonPositiveWeight {
            message: format!(
                "{}: valid weights in output cell {} sum to {}",
                op, cell, total
            ),
        });
    }
    for w in &mut kept_weights {
        *w /= total;
    }

    Ok(Lane {
        weights: kept_weights,
        columns,
    })
}

/// Apply `stat` to every output cell of the aligned inputs.
///
/// Fails as a whole if any cell fails; no partial results are returned.
pub(crate) fn reduce<F>(
    op: &str,
    fields: &[&GriddedField],
    weights: &GriddedField,
    dim: &Reduce,
    stat: F,
) -> Result<GriddedField>
where
    F: Fn(&Lane) -> Result<f64>,
{
    let layout = layout(fields, weights, dim)?;

    let mut values = Vec::with_capacity(layout.weights.nrows());
    for (cell, w) in layout.weights.rows().into_iter().enumerate() {
        let rows: Vec<ArrayView1<f64>> = layout.fields.iter().map(|f| f.row(cell)).collect();
        let lane = lane(op, cell, w, &rows)?;
        values.push(stat(&lane)?);
    }

    debug!(
        operation = op,
        output_cells = values.len(),
        kept_dims = ?layout.kept_dims,
        "Reduced field"
    );

    let data = ArrayD::from_shape_vec(IxDyn(&layout.kept_shape), values).map_err(|e| {
        ClimplotError::ShapeMismatch {
            message: format!("{}: cannot shape result: {}", op, e),
        }
    })?;
    GriddedField::new(data, layout.kept_dims)
}
