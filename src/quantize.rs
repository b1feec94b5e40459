// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Equal-width quantization of real sequences into ordinal symbols.

use ndarray::Array1;

use crate::error::{InfoFlowError, Result};

/// Bin indices produced by [`quantize`]. Every symbol lies in `[0, num_bins)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSequence {
    symbols: Array1<i32>,
    num_bins: usize,
}

impl SymbolSequence {
    /// Wrap existing symbols, checking they are within `[0, num_bins)`.
    pub fn new(symbols: Array1<i32>, num_bins: usize) -> Result<Self> {
        if num_bins < 2 {
            return Err(InfoFlowError::InvalidBinCount(num_bins));
        }
        if let Some(bad) = symbols.iter().find(|&&s| s < 0 || s as usize >= num_bins) {
            return Err(InfoFlowError::invalid_parameter(
                "symbols",
                format!("symbol {bad} outside [0, {num_bins})"),
            ));
        }
        Ok(Self { symbols, num_bins })
    }

    pub fn symbols(&self) -> &Array1<i32> {
        &self.symbols
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// First `len` symbols (or all of them if shorter).
    pub fn truncated(&self, len: usize) -> Self {
        let len = len.min(self.len());
        Self {
            symbols: self.symbols.slice(ndarray::s![..len]).to_owned(),
            num_bins: self.num_bins,
        }
    }

    /// Element-wise mean of several sequences, truncated towards zero to stay a
    /// valid symbol.
    ///
    /// Sequences are aligned on their common prefix. All members must share the same
    /// bin count.
    pub fn average(members: &[&SymbolSequence]) -> Result<Self> {
        let Some(first) = members.first() else {
            return Err(InfoFlowError::EmptyData);
        };
        let num_bins = first.num_bins;
        if let Some(m) = members.iter().find(|m| m.num_bins != num_bins) {
            return Err(InfoFlowError::invalid_parameter(
                "num_bins",
                format!("cannot average {} bins with {num_bins} bins", m.num_bins),
            ));
        }
        let len = members.iter().map(|m| m.len()).min().unwrap_or(0);
        let count = members.len() as i64;
        let symbols = (0..len)
            .map(|i| {
                let sum: i64 = members.iter().map(|m| m.symbols[i] as i64).sum();
                (sum / count) as i32
            })
            .collect();
        Ok(Self { symbols, num_bins })
    }
}

/// `num_bins + 1` equal-width edges spanning `[min, max]`.
///
/// A constant input has no width, so its range is widened to `[v - 0.5, v + 0.5]`.
pub fn bin_edges(min: f64, max: f64, num_bins: usize) -> Vec<f64> {
    let (lo, hi) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    // Divide before subtracting so ranges wider than f64::MAX stay finite.
    let n = num_bins as f64;
    let step = hi / n - lo / n;
    let mut edges: Vec<f64> = (0..num_bins).map(|i| lo + step * i as f64).collect();
    edges.push(hi);
    edges
}

/// Map each value to the index of its equal-width bin over `[min(data), max(data)]`.
///
/// Bins are left-open and right-closed, `(e_i, e_{i+1}]`, except the first which is
/// closed on both ends, so the minimum lands in bin 0 and the maximum in the last bin.
pub fn quantize(data: &[f64], num_bins: usize) -> Result<SymbolSequence> {
    if data.is_empty() {
        return Err(InfoFlowError::EmptyData);
    }
    if num_bins < 2 {
        return Err(InfoFlowError::InvalidBinCount(num_bins));
    }
    if let Some(i) = data.iter().position(|v| !v.is_finite()) {
        return Err(InfoFlowError::NonFiniteValue(i));
    }
    let (min, max) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let edges = bin_edges(min, max, num_bins);
    let upper = &edges[1..];

    let symbols = data
        .iter()
        .map(|&v| upper.partition_point(|&e| e < v).min(num_bins - 1) as i32)
        .collect();
    Ok(SymbolSequence { symbols, num_bins })
}
