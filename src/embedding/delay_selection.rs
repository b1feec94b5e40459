// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::{debug, trace};

use crate::error::{InfoFlowError, Result};
use crate::estimators::approaches::mic::MicEstimator;
use crate::estimators::traits::DependenceScore;
use crate::executor::Executor;
use crate::params::{AnalysisParams, DelayCriterion};

/// Scored trial delays and the delay chosen from them.
#[derive(Debug, Clone, PartialEq)]
pub struct DelaySelection {
    /// Score for trial delay `d` at index `d - 1`; `None` where scoring failed.
    pub scores: Vec<Option<f64>>,
    pub delay: usize,
    pub criterion: DelayCriterion,
}

impl DelaySelection {
    /// Score of trial delay `d` (1-based), if it was scored.
    pub fn score(&self, d: usize) -> Option<f64> {
        d.checked_sub(1)
            .and_then(|i| self.scores.get(i))
            .copied()
            .flatten()
    }

    pub fn max_delay(&self) -> usize {
        self.scores.len()
    }
}

/// Chooses an embedding delay by minimising a dependence score between a series
/// and its lagged copy.
///
/// The series is first subsampled with stride `subsample_factor`; trial delays
/// `1..=max_delay` are then scored on the executor in parallel.
#[derive(Debug, Clone)]
pub struct DelaySelector<S = MicEstimator> {
    scorer: S,
    max_delay: usize,
    subsample_factor: usize,
    criterion: DelayCriterion,
}

impl Default for DelaySelector<MicEstimator> {
    fn default() -> Self {
        Self::new(MicEstimator::default())
    }
}

impl DelaySelector<MicEstimator> {
    /// MIC-based selector configured from analysis parameters.
    pub fn from_params(params: &AnalysisParams) -> Self {
        Self::new(MicEstimator::default())
            .with_max_delay(params.max_delay)
            .with_subsample_factor(params.subsample_factor)
            .with_criterion(params.delay_criterion)
    }
}

impl<S: DependenceScore> DelaySelector<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            max_delay: 100,
            subsample_factor: 10,
            criterion: DelayCriterion::GlobalMinimum,
        }
    }

    pub fn with_max_delay(mut self, max_delay: usize) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_subsample_factor(mut self, factor: usize) -> Self {
        self.subsample_factor = factor;
        self
    }

    pub fn with_criterion(mut self, criterion: DelayCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Score every trial delay on `executor` and pick one according to the criterion.
    ///
    /// Trials whose score fails (e.g. a constant lagged window) are kept as `None` and
    /// skipped by the arg-min; the call only fails if no trial could be scored.
    pub fn select(&self, series: &[f64], executor: &Executor) -> Result<DelaySelection> {
        if self.max_delay == 0 {
            return Err(InfoFlowError::invalid_parameter("max_delay", "must be >= 1"));
        }
        if self.subsample_factor == 0 {
            return Err(InfoFlowError::invalid_parameter(
                "subsample_factor",
                "must be >= 1",
            ));
        }
        if let Some(i) = series.iter().position(|v| !v.is_finite()) {
            return Err(InfoFlowError::NonFiniteValue(i));
        }

        let sub: Vec<f64> = series
            .iter()
            .step_by(self.subsample_factor)
            .copied()
            .collect();
        if self.max_delay >= sub.len() {
            return Err(InfoFlowError::InvalidDelayRange {
                max_delay: self.max_delay,
                subsampled_len: sub.len(),
            });
        }

        let trials: Vec<usize> = (1..=self.max_delay).collect();
        let scores = executor.map(&trials, |&d| {
            let n = sub.len();
            match self.scorer.score(&sub[..n - d], &sub[d..]) {
                Ok(v) => {
                    trace!(delay = d, score = v, "scored trial delay");
                    Some(v)
                }
                Err(e) => {
                    debug!(delay = d, error = %e, "trial delay could not be scored");
                    None
                }
            }
        });

        let delay = pick_delay(&scores, self.criterion).ok_or_else(|| {
            InfoFlowError::InsufficientData(format!(
                "none of {} trial delays could be scored with {}",
                self.max_delay,
                self.scorer.name()
            ))
        })?;
        debug!(
            delay,
            scorer = self.scorer.name(),
            subsampled_len = sub.len(),
            "selected embedding delay"
        );
        Ok(DelaySelection {
            scores,
            delay,
            criterion: self.criterion,
        })
    }
}

/// 1-based delay chosen from the score curve, `None` if no trial was scored.
fn pick_delay(scores: &[Option<f64>], criterion: DelayCriterion) -> Option<usize> {
    let global = scores
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.map(|v| (i, v)))
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, b)) if b <= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i + 1);

    match criterion {
        DelayCriterion::GlobalMinimum => global,
        DelayCriterion::FirstLocalMinimum => scores
            .windows(3)
            .position(|w| match (w[0], w[1], w[2]) {
                (Some(prev), Some(cur), Some(next)) => cur < prev && cur <= next,
                _ => false,
            })
            .map(|i| i + 2)
            .or(global),
    }
}
