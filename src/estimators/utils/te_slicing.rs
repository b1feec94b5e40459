// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2};

/// Slice source and destination data into future and history components for TE.
///
/// Returns (dest_future, dest_history, src_history).
/// - dest_future: Y_{t} (shape N x 1)
/// - dest_history: Y_{t-k·s}, ..., Y_{t-s} (shape N x dest_hist_len, oldest first)
/// - src_history: X_{t-l·s}, ..., X_{t-s} (shape N x src_hist_len, oldest first)
///
/// where `s` is the step size and `t` runs from `max(k, l)·s` to the end of the
/// destination in steps of `s`. When the histories do not fit, all three arrays have
/// zero rows.
pub fn te_slices<T: Clone + Default>(
    source: &Array1<T>,
    destination: &Array1<T>,
    src_hist_len: usize,
    dest_hist_len: usize,
    step_size: usize,
) -> (Array2<T>, Array2<T>, Array2<T>) {
    let step_size = step_size.max(1);
    let max_delay = src_hist_len.max(dest_hist_len) * step_size;
    let n = destination.len().min(source.len());

    if max_delay >= n {
        return (
            Array2::default((0, 1)),
            Array2::default((0, dest_hist_len)),
            Array2::default((0, src_hist_len)),
        );
    }

    let base_indices: Vec<usize> = (max_delay..n).step_by(step_size).collect();
    let n_samples = base_indices.len();

    let mut dest_future = Array2::default((n_samples, 1));
    let mut dest_history = Array2::default((n_samples, dest_hist_len));
    let mut src_history = Array2::default((n_samples, src_hist_len));

    for (idx, &base_idx) in base_indices.iter().enumerate() {
        dest_future[(idx, 0)] = destination[base_idx].clone();

        for j in 0..dest_hist_len {
            let offset = (j + 1) * step_size;
            dest_history[(idx, dest_hist_len - 1 - j)] = destination[base_idx - offset].clone();
        }

        for j in 0..src_hist_len {
            let offset = (j + 1) * step_size;
            src_history[(idx, src_hist_len - 1 - j)] = source[base_idx - offset].clone();
        }
    }

    (dest_future, dest_history, src_history)
}
