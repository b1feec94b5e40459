// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, Axis};
use std::collections::HashMap;

/// Shared dataset for histogram-based entropy estimation over symbol codes.
pub struct DiscreteDataset {
    /// Original integer data (1D)
    pub data: Array1<i32>,
    /// Counts per unique symbol
    pub counts: HashMap<i32, usize>,
    /// Total number of observations
    pub n: usize,
    /// Probability dictionary p(x) for each unique symbol
    pub dist: HashMap<i32, f64>,
}

impl DiscreteDataset {
    /// Build a DiscreteDataset from raw 1D integer data
    pub fn from_data(data: Array1<i32>) -> Self {
        let n = data.len();
        let counts = count_frequencies(&data);
        let n_f = n as f64;
        let dist = counts
            .iter()
            .map(|(val, cnt)| (*val, *cnt as f64 / n_f))
            .collect();
        Self {
            data,
            counts,
            n,
            dist,
        }
    }

    /// Number of distinct symbols observed
    pub fn k(&self) -> usize {
        self.counts.len()
    }

    /// Map each sample to its probability using the cached distribution dictionary
    pub fn map_probs(&self) -> Array1<f64> {
        self.data.mapv(|v| self.dist[&v])
    }
}

/// Count the occurrences of each value in an array.
pub fn count_frequencies(data: &Array1<i32>) -> HashMap<i32, usize> {
    match data.as_slice() {
        Some(slice) => count_frequencies_slice(slice),
        None => count_frequencies_slice(&data.to_vec()),
    }
}

/// Count frequencies from a raw slice of i32 values.
/// Uses a dense vector for small non-negative ranges, otherwise falls back to HashMap.
pub fn count_frequencies_slice(data: &[i32]) -> HashMap<i32, usize> {
    if data.is_empty() {
        return HashMap::new();
    }

    let (min_v, max_v) = data
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    // Joint codes and bin indices are compact and non-negative, so the dense path
    // is the common one.
    const MAX_DENSE_RANGE: i32 = 4096;
    if min_v >= 0 && max_v - min_v <= MAX_DENSE_RANGE {
        let len = (max_v - min_v) as usize + 1;
        let mut dense = vec![0usize; len];
        for &v in data {
            dense[(v - min_v) as usize] += 1;
        }
        return dense
            .iter()
            .enumerate()
            .filter(|&(_, &cnt)| cnt != 0)
            .map(|(i, &cnt)| (min_v + i as i32, cnt))
            .collect();
    }

    let mut frequency_map = HashMap::new();
    for &value in data {
        *frequency_map.entry(value).or_insert(0) += 1;
    }
    frequency_map
}

/// Reduce multiple code arrays (aligned by index) into a single compact joint code space.
///
/// Each position's tuple of codes is mapped to a unique compact i32 ID, assigned in
/// first-occurrence order. All arrays must have the same length; the caller checks this.
pub fn reduce_joint_space_compact(code_arrays: &[Array1<i32>]) -> Array1<i32> {
    let Some(first) = code_arrays.first() else {
        return Array1::zeros(0);
    };
    let len = first.len();
    debug_assert!(code_arrays.iter().all(|a| a.len() == len));

    let mut map: HashMap<Vec<i32>, i32> = HashMap::new();
    let mut out: Vec<i32> = Vec::with_capacity(len);
    for i in 0..len {
        let key: Vec<i32> = code_arrays.iter().map(|arr| arr[i]).collect();
        let next_id = map.len() as i32;
        out.push(*map.entry(key).or_insert(next_id));
    }
    Array1::from(out)
}

/// Reduce a 2D array (samples x dimensions) into a single compact 1D code array.
///
/// An array with zero columns (a history of length zero) reduces to a constant code.
pub fn reduce_array2_compact(data: &Array2<i32>) -> Array1<i32> {
    if data.ncols() == 0 {
        return Array1::zeros(data.nrows());
    }
    let columns: Vec<Array1<i32>> = data.axis_iter(Axis(1)).map(|col| col.to_owned()).collect();
    reduce_joint_space_compact(&columns)
}
