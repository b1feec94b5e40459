// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use crate::error::Result;

pub trait GlobalValue {
    /// Compute and return the global value of the measure.
    fn global_value(&self) -> f64;
}

pub trait LocalValues: GlobalValue {
    /// Compute and return the local values of the measure.
    fn local_values(&self) -> Array1<f64>;

    /// Derive global_value as the mean of local values.
    /// Returns 0.0 for an estimator without observations.
    fn global_from_local(&self) -> f64 {
        self.local_values().mean().unwrap_or(0.0)
    }
}

/// Optional interface for estimators that may not support local values.
///
/// Estimators that do support local values should return supports_local() = true
/// and provide local values via `Ok(Array1<f64>)`. Estimators that do not support
/// local values should return supports_local() = false and an Err with a brief reason.
pub trait OptionalLocalValues {
    fn supports_local(&self) -> bool;
    fn local_values_opt(&self) -> std::result::Result<Array1<f64>, &'static str>;
}

/// Pairwise dependence score between two equal-length real sequences.
///
/// This is the seam the delay selector sweeps over. Implementations must be
/// deterministic and `Sync`, since trial delays are scored concurrently.
pub trait DependenceScore: Sync {
    /// Score the dependence of `y` on `x`. Higher means more dependent.
    fn score(&self, x: &[f64], y: &[f64]) -> Result<f64>;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}

/// Marker trait for Conditional Mutual Information estimator instances.
pub trait ConditionalMutualInformationEstimator: GlobalValue + OptionalLocalValues {}

/// Marker trait for Transfer Entropy estimator instances.
pub trait TransferEntropyEstimator: GlobalValue + OptionalLocalValues {}
