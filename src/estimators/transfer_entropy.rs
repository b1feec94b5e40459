// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use crate::error::{InfoFlowError, Result};
use crate::estimators::approaches::discrete::DiscreteTransferEntropy;
use crate::estimators::approaches::discrete::mle::DiscreteEntropy;
use crate::estimators::traits::GlobalValue;
use crate::quantize::SymbolSequence;

/// Factory for transfer entropy estimators.
pub struct TransferEntropy;

impl TransferEntropy {
    /// Create a Maximum-Likelihood (Shannon) discrete transfer entropy estimator
    /// reporting bits.
    pub fn new_discrete_mle(
        source: &Array1<i32>,
        destination: &Array1<i32>,
        src_hist_len: usize,
        dest_hist_len: usize,
        step_size: usize,
    ) -> Result<DiscreteTransferEntropy<DiscreteEntropy>> {
        DiscreteTransferEntropy::try_new(
            source,
            destination,
            src_hist_len,
            dest_hist_len,
            step_size,
            DiscreteEntropy::new_bits,
        )
    }
}

/// Transfer entropy in bits from `source` to `target` with target history `k` and
/// source history `l`.
///
/// `TE = H(Y_next | Y_past^(k)) - H(Y_next | Y_past^(k), X_past^(l))`, estimated from
/// empirical symbol frequencies. Finite-sample estimates can dip marginally below zero;
/// they are returned as-is. A non-finite estimate is reported as an error.
pub fn transfer_entropy(
    source: &SymbolSequence,
    target: &SymbolSequence,
    k: usize,
    l: usize,
) -> Result<f64> {
    let te = TransferEntropy::new_discrete_mle(source.symbols(), target.symbols(), l, k, 1)?
        .global_value();
    if !te.is_finite() {
        return Err(InfoFlowError::TransferEntropyEstimation(format!(
            "estimate is not finite ({te})"
        )));
    }
    Ok(te)
}
