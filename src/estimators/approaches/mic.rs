// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maximal information coefficient (MIC).
//!
//! For every grid of `cols x rows` cells with `cols * rows <= B(n) = n^alpha`, one
//! axis is equipartitioned into `rows` rows and the partition of the other axis into
//! at most `cols` columns that maximises the grid mutual information is found by
//! dynamic programming over clumps of consecutive points. The best mutual information
//! per grid size is normalised by `log2(min(cols, rows))`; MIC is the largest entry of
//! this characteristic matrix, with both axis roles tried.
//!
//! The grid mutual information is `H(Q) - H(Q | P)` where `Q` is the fixed row
//! partition and `P` the column partition. `H(Q | P)` is a sum of per-column terms,
//! which is what makes the column search decomposable.

use crate::error::Result;
use crate::estimators::traits::DependenceScore;
use crate::estimators::utils::{entropy_bits, validate_pair};

/// MIC estimator with the usual `alpha = 0.6` grid budget and clump factor `c = 15`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MicEstimator {
    alpha: f64,
    clump_factor: usize,
}

impl Default for MicEstimator {
    fn default() -> Self {
        Self {
            alpha: 0.6,
            clump_factor: 15,
        }
    }
}

impl MicEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exponent of the grid budget `B(n) = n^alpha`; clamped to (0, 1].
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(f64::EPSILON, 1.0);
        self
    }

    /// Maximum number of superclumps per allowed column, at least 1.
    pub fn with_clump_factor(mut self, c: usize) -> Self {
        self.clump_factor = c.max(1);
        self
    }

    /// Total number of grid cells allowed for `n` samples.
    pub fn grid_budget(&self, n: usize) -> usize {
        ((n as f64).powf(self.alpha).floor() as usize).max(4)
    }

    /// Normalised characteristic matrix: entry `[cols][rows]` holds the best score for
    /// that grid size, 0.0 where the grid is outside the budget.
    pub fn characteristic_matrix(&self, x: &[f64], y: &[f64]) -> Result<Vec<Vec<f64>>> {
        validate_pair(x, y)?;
        let budget = self.grid_budget(x.len());
        let mut m = vec![vec![0.0_f64; budget / 2 + 1]; budget / 2 + 1];

        // Equipartition y into rows, search x columns; then swap roles.
        for (p_axis, q_axis, transpose) in [(x, y, false), (y, x, true)] {
            for rows in 2..=budget / 2 {
                let max_cols = budget / rows;
                if max_cols < 2 {
                    continue;
                }
                let best = self.optimize_axis(p_axis, q_axis, rows, max_cols);
                for (cols, &mi) in best.iter().enumerate().skip(2) {
                    let norm = (cols.min(rows) as f64).log2();
                    let score = (mi / norm).clamp(0.0, 1.0);
                    let (i, j) = if transpose { (rows, cols) } else { (cols, rows) };
                    if score > m[i][j] {
                        m[i][j] = score;
                    }
                }
            }
        }
        Ok(m)
    }

    /// Maximal information coefficient in [0, 1].
    pub fn mic(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        let m = self.characteristic_matrix(x, y)?;
        Ok(m.iter().flatten().copied().fold(0.0, f64::max))
    }

    /// Best grid MI (bits) for each column count `0..=max_cols`, with `q` split into
    /// `rows` equal-frequency rows. Entries are non-decreasing in the column count.
    fn optimize_axis(&self, p: &[f64], q: &[f64], rows: usize, max_cols: usize) -> Vec<f64> {
        let n = p.len();
        let row_of = equipartition(q, rows);
        let n_rows = row_of.iter().copied().max().map_or(1, |r| r + 1);

        let mut row_totals = vec![0usize; n_rows];
        for &r in &row_of {
            row_totals[r] += 1;
        }
        let h_q = entropy_bits(row_totals.iter().copied(), n);

        let clumps = clumps(p, &row_of, n_rows);
        let cells = superclumps(clumps, self.clump_factor * max_cols, n, n_rows);
        let k = cells.len();

        // prefix[t][r]: points of row r in cells [0, t)
        let mut prefix = vec![vec![0usize; n_rows]; k + 1];
        for (t, cell) in cells.iter().enumerate() {
            for r in 0..n_rows {
                prefix[t + 1][r] = prefix[t][r] + cell[r];
            }
        }
        // cost[s][t]: weighted conditional row entropy of one column spanning cells [s, t)
        let mut cost = vec![vec![0.0_f64; k + 1]; k + 1];
        for s in 0..k {
            for t in (s + 1)..=k {
                let total = prefix[t].iter().sum::<usize>() - prefix[s].iter().sum::<usize>();
                let h = entropy_bits((0..n_rows).map(|r| prefix[t][r] - prefix[s][r]), total);
                cost[s][t] = (total as f64 / n as f64) * h;
            }
        }

        let mut best = vec![0.0_f64; max_cols + 1];
        // f[t]: minimal H(Q|P) over cells [0, t) using the current number of columns
        let mut f: Vec<f64> = (0..=k).map(|t| cost[0][t]).collect();
        let mut min_cond = f[k];
        for l in 2..=max_cols {
            if l <= k {
                let mut next = vec![f64::INFINITY; k + 1];
                for t in l..=k {
                    for s in (l - 1)..t {
                        let v = f[s] + cost[s][t];
                        if v < next[t] {
                            next[t] = v;
                        }
                    }
                }
                f = next;
                min_cond = min_cond.min(f[k]);
            }
            best[l] = (h_q - min_cond).max(0.0);
        }
        best
    }
}

impl DependenceScore for MicEstimator {
    fn score(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        self.mic(x, y)
    }

    fn name(&self) -> &'static str {
        "mic"
    }
}

/// Indices of `v` in ascending value order (stable).
fn argsort(v: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..v.len()).collect();
    idx.sort_by(|&a, &b| v[a].total_cmp(&v[b]));
    idx
}

/// Assign every point a row so that rows hold roughly `n / rows` points each.
/// Tied values always share a row, so fewer rows than requested may be produced.
fn equipartition(v: &[f64], rows: usize) -> Vec<usize> {
    let n = v.len();
    let order = argsort(v);
    let mut row_of = vec![0usize; n];

    let mut desired = n as f64 / rows as f64;
    let mut row = 0usize;
    let mut size = 0usize;
    let mut i = 0usize;
    while i < n {
        let mut s = 1;
        while i + s < n && v[order[i + s]] == v[order[i]] {
            s += 1;
        }
        let overshoot = ((size + s) as f64 - desired).abs();
        let shortfall = (size as f64 - desired).abs();
        if size != 0 && overshoot >= shortfall && row + 1 < rows {
            row += 1;
            size = 0;
            desired = (n - i) as f64 / (rows - row) as f64;
        }
        for &idx in &order[i..i + s] {
            row_of[idx] = row;
        }
        size += s;
        i += s;
    }
    row_of
}

/// Row histograms of maximal runs of consecutive (in `p` order) points that share a
/// row. Points with equal `p` always land in the same clump.
fn clumps(p: &[f64], row_of: &[usize], n_rows: usize) -> Vec<Vec<usize>> {
    let order = argsort(p);
    let mut out: Vec<Vec<usize>> = Vec::new();
    // Row shared by every point of the last clump, None if it mixes rows.
    let mut last_row: Option<usize> = None;

    let mut i = 0usize;
    while i < order.len() {
        let mut s = 1;
        while i + s < order.len() && p[order[i + s]] == p[order[i]] {
            s += 1;
        }
        let group = &order[i..i + s];
        let first = row_of[group[0]];
        let pure = group.iter().all(|&idx| row_of[idx] == first).then_some(first);

        let extends_last = matches!((pure, last_row), (Some(r), Some(prev)) if r == prev);
        if let (true, Some(clump)) = (extends_last, out.last_mut()) {
            clump[first] += s;
        } else {
            let mut hist = vec![0usize; n_rows];
            for &idx in group {
                hist[row_of[idx]] += 1;
            }
            out.push(hist);
        }
        last_row = pure;
        i += s;
    }
    out
}

/// Merge clumps into at most `cap` cells of roughly equal point count.
fn superclumps(clumps: Vec<Vec<usize>>, cap: usize, n: usize, n_rows: usize) -> Vec<Vec<usize>> {
    if clumps.len() <= cap {
        return clumps;
    }
    let mut out: Vec<Vec<usize>> = Vec::with_capacity(cap);
    let mut current_label = usize::MAX;
    let mut seen = 0usize;
    for clump in clumps {
        let label = seen * cap / n;
        seen += clump.iter().sum::<usize>();
        if label != current_label {
            out.push(vec![0usize; n_rows]);
            current_label = label;
        }
        if let Some(cell) = out.last_mut() {
            for (acc, c) in cell.iter_mut().zip(clump) {
                *acc += c;
            }
        }
    }
    out
}
