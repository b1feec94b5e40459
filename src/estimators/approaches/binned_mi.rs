// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use crate::estimators::approaches::discrete::discrete_utils::reduce_joint_space_compact;
use crate::estimators::approaches::discrete::mle::DiscreteEntropy;
use crate::estimators::traits::{DependenceScore, GlobalValue};
use crate::estimators::utils::validate_pair;
use crate::quantize::quantize;

/// Histogram mutual information in bits over equal-width bins.
///
/// Each sequence is quantized on its own range and I(X; Y) = H(X) + H(Y) - H(X, Y)
/// is estimated with plug-in entropies. This is the classic average mutual
/// information used for delay selection; it is much cheaper than MIC but only
/// resolves dependence at the chosen bin width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinnedMutualInformation {
    num_bins: usize,
}

impl Default for BinnedMutualInformation {
    fn default() -> Self {
        Self { num_bins: 16 }
    }
}

impl BinnedMutualInformation {
    pub fn new(num_bins: usize) -> Self {
        Self { num_bins }
    }
}

impl DependenceScore for BinnedMutualInformation {
    fn score(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        validate_pair(x, y)?;
        let qx = quantize(x, self.num_bins)?.symbols().clone();
        let qy = quantize(y, self.num_bins)?.symbols().clone();
        let joint = reduce_joint_space_compact(&[qx.clone(), qy.clone()]);

        let h_x = DiscreteEntropy::new_bits(qx).global_value();
        let h_y = DiscreteEntropy::new_bits(qy).global_value();
        let h_xy = DiscreteEntropy::new_bits(joint).global_value();
        Ok((h_x + h_y - h_xy).max(0.0))
    }

    fn name(&self) -> &'static str {
        "binned_mi"
    }
}
