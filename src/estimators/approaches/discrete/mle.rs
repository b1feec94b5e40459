// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use crate::estimators::approaches::discrete::discrete_utils::DiscreteDataset;
use crate::estimators::traits::{GlobalValue, LocalValues, OptionalLocalValues};

/// Standard Shannon entropy estimator for discrete data using maximum likelihood.
///
/// Computes H = -Σ p_i log_b p_i from empirical probabilities p_i = n_i/N. Local
/// values are -log_b p(x) per sample. The logarithm base defaults to e; transfer
/// entropy is reported in bits by constructing the estimators with base 2.
pub struct DiscreteEntropy {
    dataset: DiscreteDataset,
    base: f64,
}

impl DiscreteEntropy {
    pub fn new(data: Array1<i32>) -> Self {
        let dataset = DiscreteDataset::from_data(data);
        Self {
            dataset,
            base: std::f64::consts::E,
        }
    }

    /// Convenience constructor reporting entropy in bits.
    pub fn new_bits(data: Array1<i32>) -> Self {
        Self::new(data).with_base(2.0)
    }

    /// Set logarithm base (default e)
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Number of distinct symbols in the data.
    pub fn alphabet_size(&self) -> usize {
        self.dataset.k()
    }
}

impl GlobalValue for DiscreteEntropy {
    fn global_value(&self) -> f64 {
        if self.dataset.n == 0 {
            return 0.0;
        }
        let n_f = self.dataset.n as f64;
        let mut h = 0.0_f64;
        for &cnt in self.dataset.counts.values() {
            let p = (cnt as f64) / n_f;
            if p > 0.0 {
                h -= p * p.ln();
            }
        }
        h / self.base.ln()
    }
}

impl LocalValues for DiscreteEntropy {
    fn local_values(&self) -> Array1<f64> {
        let ln_base = self.base.ln();
        self.dataset.map_probs().mapv(|p| -p.ln() / ln_base)
    }
}

impl OptionalLocalValues for DiscreteEntropy {
    fn supports_local(&self) -> bool {
        true
    }

    fn local_values_opt(&self) -> Result<Array1<f64>, &'static str> {
        Ok(self.local_values())
    }
}
