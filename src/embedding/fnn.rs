// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::s;
use tracing::debug;

use crate::embedding::delay_embedding::delay_embed;
use crate::error::{InfoFlowError, Result};
use crate::estimators::approaches::common_nd::dataset::nearest_neighbors;

/// False-nearest-neighbour rate for every embedding dimension `1..=max_dim`.
///
/// At dimension `d` the series is embedded with delay `delay`, restricted to the
/// `N - d*delay` points that still have a next coordinate `x[i + d*delay]`, and each
/// point is paired with its Euclidean nearest neighbour `j`. The pair is false when
/// `|x[i + d*delay] - x[j + d*delay]| / dist(i, j) > threshold`. Entry `d - 1` of the
/// result is the fraction of false pairs.
///
/// A zero neighbour distance fails with [`InfoFlowError::DegenerateNeighbor`] instead
/// of producing an infinite ratio.
pub fn false_nearest_neighbors(
    series: &[f64],
    max_dim: usize,
    delay: usize,
    threshold: f64,
) -> Result<Vec<f64>> {
    if max_dim == 0 {
        return Err(InfoFlowError::invalid_parameter("max_dim", "must be >= 1"));
    }
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(InfoFlowError::invalid_parameter(
            "threshold",
            "must be a positive finite number",
        ));
    }
    if let Some(i) = series.iter().position(|v| !v.is_finite()) {
        return Err(InfoFlowError::NonFiniteValue(i));
    }

    let n = series.len();
    let mut rates = Vec::with_capacity(max_dim);
    for d in 1..=max_dim {
        // Points need x[i + d*delay], i.e. the (d+1)-dimensional embedding must exist
        // with at least two points.
        let span = d.saturating_mul(delay);
        if span.saturating_add(2) > n {
            return Err(InfoFlowError::EmbeddingTooLarge {
                emb_dim: d + 1,
                delay,
                len: n,
            });
        }
        let rows = n - span;
        let traj = delay_embed(series, d, delay)?;
        let points = traj.view();
        let points = points.slice(s![..rows, ..]);

        let mut false_count = 0usize;
        for (i, nn) in nearest_neighbors(points).into_iter().enumerate() {
            if nn.distance == 0.0 {
                return Err(InfoFlowError::DegenerateNeighbor {
                    dimension: d,
                    index: i,
                });
            }
            let extension = (series[i + span] - series[nn.index + span]).abs();
            if extension / nn.distance > threshold {
                false_count += 1;
            }
        }
        let rate = false_count as f64 / rows as f64;
        debug!(dimension = d, delay, rate, "false nearest neighbours");
        rates.push(rate);
    }
    Ok(rates)
}

/// First dimension (1-based) whose false-neighbour rate is below `threshold`.
pub fn minimal_embedding_dimension(rates: &[f64], threshold: f64) -> Option<usize> {
    rates.iter().position(|&r| r < threshold).map(|i| i + 1)
}
