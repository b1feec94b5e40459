// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod te_slicing;

use crate::error::{InfoFlowError, Result};

/// Smallest sample count any pairwise dependence score accepts.
pub const MIN_PAIR_SAMPLES: usize = 4;

/// Shared input checks for pairwise dependence scores.
///
/// Rejects mismatched lengths, fewer than [`MIN_PAIR_SAMPLES`] samples, non-finite
/// values, and constant sequences (no dependence can be measured against a constant).
pub fn validate_pair(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(InfoFlowError::invalid_parameter(
            "series",
            format!("pair lengths differ ({} vs {})", x.len(), y.len()),
        ));
    }
    if x.len() < MIN_PAIR_SAMPLES {
        return Err(InfoFlowError::InsufficientData(format!(
            "{} samples, need at least {MIN_PAIR_SAMPLES}",
            x.len()
        )));
    }
    if let Some(i) = x.iter().chain(y.iter()).position(|v| !v.is_finite()) {
        return Err(InfoFlowError::NonFiniteValue(i % x.len()));
    }
    if is_constant(x) || is_constant(y) {
        return Err(InfoFlowError::InsufficientData(
            "constant sequence carries no dependence".into(),
        ));
    }
    Ok(())
}

fn is_constant(v: &[f64]) -> bool {
    v.iter().all(|&a| a == v[0])
}

/// Shannon entropy in bits of a histogram with the given total.
pub(crate) fn entropy_bits(counts: impl IntoIterator<Item = usize>, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    counts
        .into_iter()
        .filter(|&c| c > 0)
        .map(|c| {
            let p = c as f64 / n;
            -p * p.log2()
        })
        .sum()
}
