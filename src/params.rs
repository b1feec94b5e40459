// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::{InfoFlowError, Result};

/// How the delay selector turns the mutual-information curve into a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelayCriterion {
    /// Arg-min over the whole trial range (earliest delay wins ties).
    #[default]
    GlobalMinimum,
    /// First trial whose score is lower than both neighbours (Fraser–Swinney).
    /// Falls back to the global minimum when the curve has no interior minimum.
    FirstLocalMinimum,
}

/// Scalar parameters shared by every analysis shape.
///
/// Construct with `AnalysisParams::default()` and adjust with the `with_*` setters.
/// Call [`AnalysisParams::validate`] (the orchestrator does this up front) to reject
/// unusable values before any estimation work starts.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    /// Largest trial delay for the mutual-information sweep.
    pub max_delay: usize,
    /// Stride used to shrink the series before the sweep. Larger values trade
    /// estimation fidelity for runtime.
    pub subsample_factor: usize,
    /// Embedding dimension used before projecting to one coordinate.
    pub emb_dim: usize,
    /// Trajectory coordinate fed to the quantizer.
    pub projection: usize,
    /// Number of equal-width bins for quantization.
    pub num_bins: usize,
    /// Target history length.
    pub k: usize,
    /// Source history length.
    pub l: usize,
    /// Neighbour-ratio threshold for false nearest neighbours.
    pub fnn_threshold: f64,
    pub delay_criterion: DelayCriterion,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            max_delay: 100,
            subsample_factor: 10,
            emb_dim: 2,
            projection: 0,
            num_bins: 1000,
            k: 1,
            l: 1,
            fnn_threshold: 10.0,
            delay_criterion: DelayCriterion::GlobalMinimum,
        }
    }
}

impl AnalysisParams {
    pub fn with_max_delay(mut self, max_delay: usize) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_subsample_factor(mut self, factor: usize) -> Self {
        self.subsample_factor = factor;
        self
    }

    pub fn with_emb_dim(mut self, emb_dim: usize) -> Self {
        self.emb_dim = emb_dim;
        self
    }

    pub fn with_projection(mut self, coordinate: usize) -> Self {
        self.projection = coordinate;
        self
    }

    pub fn with_num_bins(mut self, num_bins: usize) -> Self {
        self.num_bins = num_bins;
        self
    }

    /// Set target (`k`) and source (`l`) history lengths.
    pub fn with_history(mut self, k: usize, l: usize) -> Self {
        self.k = k;
        self.l = l;
        self
    }

    pub fn with_fnn_threshold(mut self, r: f64) -> Self {
        self.fnn_threshold = r;
        self
    }

    pub fn with_delay_criterion(mut self, criterion: DelayCriterion) -> Self {
        self.delay_criterion = criterion;
        self
    }

    /// Reject parameter combinations that can never produce a result.
    pub fn validate(&self) -> Result<()> {
        if self.max_delay == 0 {
            return Err(InfoFlowError::invalid_parameter("max_delay", "must be >= 1"));
        }
        if self.subsample_factor == 0 {
            return Err(InfoFlowError::invalid_parameter(
                "subsample_factor",
                "must be >= 1",
            ));
        }
        if self.emb_dim == 0 {
            return Err(InfoFlowError::invalid_parameter("emb_dim", "must be >= 1"));
        }
        if self.projection >= self.emb_dim {
            return Err(InfoFlowError::invalid_parameter(
                "projection",
                format!(
                    "coordinate {} out of range for emb_dim {}",
                    self.projection, self.emb_dim
                ),
            ));
        }
        if self.num_bins < 2 {
            return Err(InfoFlowError::InvalidBinCount(self.num_bins));
        }
        if !(self.fnn_threshold.is_finite() && self.fnn_threshold > 0.0) {
            return Err(InfoFlowError::invalid_parameter(
                "fnn_threshold",
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}
