// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use crate::estimators::approaches::binned_mi::BinnedMutualInformation;
use crate::estimators::approaches::mic::MicEstimator;
use crate::estimators::traits::DependenceScore;

/// Factory for pairwise mutual-information scores over real sequences.
pub struct MutualInformation;

impl MutualInformation {
    /// Maximal information coefficient estimator (default grid budget `n^0.6`).
    pub fn new_mic() -> MicEstimator {
        MicEstimator::default()
    }

    /// Equal-width histogram mutual information in bits.
    pub fn new_binned(num_bins: usize) -> BinnedMutualInformation {
        BinnedMutualInformation::new(num_bins)
    }

    /// MIC score of two equal-length sequences.
    ///
    /// Fails with [`crate::InfoFlowError::InsufficientData`] on fewer than four samples
    /// or a constant sequence.
    pub fn mic(x: &[f64], y: &[f64]) -> Result<f64> {
        MicEstimator::default().score(x, y)
    }
}
