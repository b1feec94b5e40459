// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Discrete estimators module: plug-in Shannon entropy and the conditional mutual
// information / transfer entropy estimators built on top of it.

pub mod discrete_utils;
pub mod mle;

use ndarray::Array1;

use crate::error::{InfoFlowError, Result};
use crate::estimators::approaches::discrete::discrete_utils::{
    reduce_array2_compact, reduce_joint_space_compact,
};
use crate::estimators::traits::{
    ConditionalMutualInformationEstimator, GlobalValue, LocalValues, OptionalLocalValues,
    TransferEntropyEstimator,
};
use crate::estimators::utils::te_slicing::te_slices;

/// Discrete Conditional Mutual Information estimator using the entropy-summation formula.
///
/// I(X; Y | Z) = H(X, Z) + H(Y, Z) - H(X, Y, Z) - H(Z)
pub struct DiscreteConditionalMutualInformation<E> {
    marginal_conds: Vec<E>,
    joint_cond: E,
    cond_only: E,
}

impl<E> DiscreteConditionalMutualInformation<E> {
    pub fn new<F>(series: &[Array1<i32>], cond: &Array1<i32>, constructor: F) -> Self
    where
        F: Fn(Array1<i32>) -> E + Clone,
    {
        // General: I(X1; ...; Xn | Z) = sum H(Xi, Z) - H(X1, ..., Xn, Z) - (n-1)H(Z)
        let marginal_conds = series
            .iter()
            .map(|s| constructor(reduce_joint_space_compact(&[s.clone(), cond.clone()])))
            .collect();

        let mut joint_all_vec = series.to_vec();
        joint_all_vec.push(cond.clone());
        let joint_cond = constructor(reduce_joint_space_compact(&joint_all_vec));

        let cond_only = constructor(cond.clone());

        Self {
            marginal_conds,
            joint_cond,
            cond_only,
        }
    }
}

impl<E: GlobalValue> GlobalValue for DiscreteConditionalMutualInformation<E> {
    fn global_value(&self) -> f64 {
        let n = self.marginal_conds.len() as f64;
        let sum_h_xz: f64 = self.marginal_conds.iter().map(|m| m.global_value()).sum();
        let h_xyz = self.joint_cond.global_value();
        let h_z = self.cond_only.global_value();
        sum_h_xz - h_xyz - (n - 1.0) * h_z
    }
}

impl<E: LocalValues> LocalValues for DiscreteConditionalMutualInformation<E> {
    fn local_values(&self) -> Array1<f64> {
        let n = self.marginal_conds.len() as f64;
        let mut res = Array1::zeros(self.joint_cond.local_values().len());
        for m in &self.marginal_conds {
            res += &m.local_values();
        }
        res -= &self.joint_cond.local_values();
        res -= &((n - 1.0) * self.cond_only.local_values());
        res
    }
}

impl<E: OptionalLocalValues> OptionalLocalValues for DiscreteConditionalMutualInformation<E> {
    fn supports_local(&self) -> bool {
        self.joint_cond.supports_local()
            && self.cond_only.supports_local()
            && self.marginal_conds.iter().all(|m| m.supports_local())
    }

    fn local_values_opt(&self) -> std::result::Result<Array1<f64>, &'static str> {
        if !self.supports_local() {
            return Err("One or more underlying entropy estimators do not support local values.");
        }
        let n = self.marginal_conds.len() as f64;
        let mut res = self.joint_cond.local_values_opt()?.mapv(|v| -v);
        for m in &self.marginal_conds {
            res += &m.local_values_opt()?;
        }
        res -= &((n - 1.0) * self.cond_only.local_values_opt()?);
        Ok(res)
    }
}

impl<E: GlobalValue + OptionalLocalValues> ConditionalMutualInformationEstimator
    for DiscreteConditionalMutualInformation<E>
{
}

/// Discrete Transfer Entropy estimator using the entropy-summation formula (via CMI).
///
/// TE(X -> Y) = I(X_past^(l); Y_next | Y_past^(k))
///            = H(Y_next | Y_past) - H(Y_next | Y_past, X_past)
pub struct DiscreteTransferEntropy<E> {
    inner: DiscreteConditionalMutualInformation<E>,
    n_observations: usize,
}

impl<E> DiscreteTransferEntropy<E> {
    /// Build the symbol-frequency tables for TE from `source` to `destination`.
    ///
    /// Fails with [`InfoFlowError::TransferEntropyEstimation`] when the sequences
    /// differ in length, contain negative symbols, or are too short for the requested
    /// history lengths to leave any observation.
    pub fn try_new<F>(
        source: &Array1<i32>,
        destination: &Array1<i32>,
        src_hist_len: usize,
        dest_hist_len: usize,
        step_size: usize,
        constructor: F,
    ) -> Result<Self>
    where
        F: Fn(Array1<i32>) -> E + Clone,
    {
        if source.len() != destination.len() {
            return Err(InfoFlowError::TransferEntropyEstimation(format!(
                "source has {} symbols but destination has {}",
                source.len(),
                destination.len()
            )));
        }
        if let Some(v) = source.iter().chain(destination.iter()).find(|&&v| v < 0) {
            return Err(InfoFlowError::TransferEntropyEstimation(format!(
                "symbol {v} is negative"
            )));
        }
        if step_size == 0 {
            return Err(InfoFlowError::TransferEntropyEstimation(
                "step size must be >= 1".into(),
            ));
        }

        let (dest_future, dest_history, src_history) =
            te_slices(source, destination, src_hist_len, dest_hist_len, step_size);
        let n_observations = dest_future.nrows();
        if n_observations == 0 {
            return Err(InfoFlowError::TransferEntropyEstimation(format!(
                "history lengths k={dest_hist_len}, l={src_hist_len} leave no observations in {} symbols",
                destination.len()
            )));
        }

        let src_past_codes = reduce_array2_compact(&src_history);
        let dest_past_codes = reduce_array2_compact(&dest_history);
        let dest_future_flat = dest_future.column(0).to_owned();

        let inner = DiscreteConditionalMutualInformation::new(
            &[src_past_codes, dest_future_flat],
            &dest_past_codes,
            constructor,
        );
        Ok(Self {
            inner,
            n_observations,
        })
    }

    /// Number of (future, history) observations the tables were built from.
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }
}

impl<E: GlobalValue> GlobalValue for DiscreteTransferEntropy<E> {
    fn global_value(&self) -> f64 {
        self.inner.global_value()
    }
}

impl<E: LocalValues> LocalValues for DiscreteTransferEntropy<E> {
    fn local_values(&self) -> Array1<f64> {
        self.inner.local_values()
    }
}

impl<E: OptionalLocalValues> OptionalLocalValues for DiscreteTransferEntropy<E> {
    fn supports_local(&self) -> bool {
        self.inner.supports_local()
    }

    fn local_values_opt(&self) -> std::result::Result<Array1<f64>, &'static str> {
        self.inner.local_values_opt()
    }
}

impl<E: GlobalValue + OptionalLocalValues> TransferEntropyEstimator for DiscreteTransferEntropy<E> {}
