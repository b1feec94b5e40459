// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{InfoFlowError, Result};

/// Delay-embedded trajectory of a scalar series.
///
/// Row `i` is the point `(x[i], x[i + tau], ..., x[i + (m-1)tau])`, so the trajectory
/// has `N - (m-1)tau` rows and `m` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedTrajectory {
    points: Array2<f64>,
    delay: usize,
}

impl EmbeddedTrajectory {
    /// Number of points (rows).
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Embedding dimension `m`.
    pub fn dimension(&self) -> usize {
        self.points.ncols()
    }

    pub fn delay(&self) -> usize {
        self.delay
    }

    pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
        self.points.row(i)
    }

    /// All points as a (len x m) view.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }

    /// Projection onto coordinate `j`, or `None` if `j >= m`.
    pub fn coordinate(&self, j: usize) -> Option<Array1<f64>> {
        (j < self.dimension()).then(|| self.points.column(j).to_owned())
    }

    pub fn into_array(self) -> Array2<f64> {
        self.points
    }
}

/// Reconstruct an `emb_dim`-dimensional trajectory from `series` with delay `delay`.
///
/// Fails with [`InfoFlowError::EmbeddingTooLarge`] when `(emb_dim-1)*delay >= N`.
pub fn delay_embed(series: &[f64], emb_dim: usize, delay: usize) -> Result<EmbeddedTrajectory> {
    if emb_dim == 0 {
        return Err(InfoFlowError::invalid_parameter("emb_dim", "must be >= 1"));
    }
    if delay == 0 {
        return Err(InfoFlowError::invalid_parameter("delay", "must be >= 1"));
    }
    let n = series.len();
    let span = (emb_dim - 1)
        .checked_mul(delay)
        .ok_or_else(|| InfoFlowError::invalid_parameter("delay", "embedding span overflows"))?;
    if span >= n {
        return Err(InfoFlowError::EmbeddingTooLarge {
            emb_dim,
            delay,
            len: n,
        });
    }
    let rows = n - span;
    let points = Array2::from_shape_fn((rows, emb_dim), |(i, j)| series[i + j * delay]);
    Ok(EmbeddedTrajectory { points, delay })
}
