// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel-set orchestration of the embedding and transfer-entropy pipeline.
//!
//! Every channel that takes part in a run goes through
//! `delay selection -> embedding -> projection -> quantization` exactly once; pairs
//! and groups are then formed from the cached symbol sequences. Per-channel and
//! per-pair failures are recorded in the result table and never abort the run.
//! Parameter and group-configuration errors are returned before any work starts.

pub mod channels;
pub mod results;

pub use channels::{ChannelGroup, ChannelSet, RegionMap};
pub use results::{TransferEntropyResult, TransferEntropyTable, pair_key};

use std::collections::{HashMap, HashSet};

use ndarray::ArrayView2;
use tracing::{info, info_span, warn};

use crate::embedding::{DelaySelection, DelaySelector, delay_embed, false_nearest_neighbors};
use crate::error::{InfoFlowError, Result};
use crate::estimators::approaches::mic::MicEstimator;
use crate::estimators::traits::DependenceScore;
use crate::estimators::transfer_entropy::transfer_entropy;
use crate::executor::Executor;
use crate::params::AnalysisParams;
use crate::quantize::{SymbolSequence, quantize};

/// Output of the per-channel pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSymbols {
    pub delay: usize,
    pub symbols: SymbolSequence,
}

/// Drives the pipeline over a multichannel buffer (rows = channels, columns = samples).
pub struct InformationFlow<'a, S = MicEstimator> {
    params: AnalysisParams,
    selector: DelaySelector<S>,
    executor: &'a Executor,
}

impl<'a> InformationFlow<'a, MicEstimator> {
    /// MIC-based delay selection with the given parameters. Parameters are validated
    /// here, so a constructed orchestrator only reports numerical failures later.
    pub fn new(params: AnalysisParams, executor: &'a Executor) -> Result<Self> {
        params.validate()?;
        let selector = DelaySelector::from_params(&params);
        Ok(Self {
            params,
            selector,
            executor,
        })
    }
}

impl<'a, S: DependenceScore> InformationFlow<'a, S> {
    /// Swap the dependence score used for delay selection.
    pub fn with_scorer<T: DependenceScore>(self, scorer: T) -> InformationFlow<'a, T> {
        let selector = DelaySelector::new(scorer)
            .with_max_delay(self.params.max_delay)
            .with_subsample_factor(self.params.subsample_factor)
            .with_criterion(self.params.delay_criterion);
        InformationFlow {
            params: self.params,
            selector,
            executor: self.executor,
        }
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Run the per-channel pipeline on one series.
    pub fn channel_symbols(&self, series: &[f64]) -> Result<ChannelSymbols> {
        let selection = self.selector.select(series, self.executor)?;
        let trajectory = delay_embed(series, self.params.emb_dim, selection.delay)?;
        let projected = trajectory
            .coordinate(self.params.projection)
            .ok_or_else(|| InfoFlowError::invalid_parameter("projection", "coordinate out of range"))?
            .to_vec();
        let symbols = quantize(&projected, self.params.num_bins)?;
        Ok(ChannelSymbols {
            delay: selection.delay,
            symbols,
        })
    }

    /// Select a delay for `series` and compute false-neighbour rates for dimensions
    /// `1..=max_dim` with the configured threshold.
    pub fn false_neighbor_rates(
        &self,
        series: &[f64],
        max_dim: usize,
    ) -> Result<(DelaySelection, Vec<f64>)> {
        let selection = self.selector.select(series, self.executor)?;
        let rates =
            false_nearest_neighbors(series, max_dim, selection.delay, self.params.fnn_threshold)?;
        Ok((selection, rates))
    }

    /// Per-channel pipeline for the given rows, run in parallel on the executor.
    ///
    /// Configuration errors surfaced by a channel are returned immediately; numerical
    /// failures stay in the per-channel slot.
    pub fn prepare_channels(
        &self,
        data: ArrayView2<'_, f64>,
        set: &ChannelSet,
        rows: &[usize],
    ) -> Result<Vec<Result<ChannelSymbols>>> {
        check_shape(data, set)?;
        let prepared = self.executor.map(rows, |&row| {
            let series = data.row(row).to_vec();
            self.channel_symbols(&series)
        });

        for (&row, outcome) in rows.iter().zip(&prepared) {
            let name = set.name(row).unwrap_or("?");
            match outcome {
                Ok(ch) => info!(channel = name, delay = ch.delay, "channel prepared"),
                Err(e) if e.is_configuration() => return Err(e.clone()),
                Err(e) => warn!(channel = name, error = %e, "channel pipeline failed"),
            }
        }
        Ok(prepared)
    }

    /// Transfer entropy for every ordered pair of distinct channels.
    pub fn all_pairs(&self, data: ArrayView2<'_, f64>, set: &ChannelSet) -> Result<TransferEntropyTable> {
        let _span = info_span!("all_pairs", channels = set.len()).entered();
        check_shape(data, set)?;
        check_pair_keys(set.names())?;
        let rows: Vec<usize> = (0..set.len()).collect();
        let prepared = self.prepare_channels(data, set, &rows)?;

        let named: Vec<(String, Result<SymbolSequence>)> = rows
            .iter()
            .zip(prepared)
            .map(|(&row, outcome)| {
                let name = set.names()[row].clone();
                let symbols = outcome
                    .map(|ch| ch.symbols)
                    .map_err(|e| channel_failed(&name, &e));
                (name, symbols)
            })
            .collect();
        Ok(self.pairwise(&named))
    }

    /// Transfer entropy in both directions between two channel groups, each
    /// represented by the element-wise average of its members' symbol sequences.
    pub fn hemispheric(
        &self,
        data: ArrayView2<'_, f64>,
        set: &ChannelSet,
        left: &ChannelGroup,
        right: &ChannelGroup,
    ) -> Result<TransferEntropyTable> {
        let regions: RegionMap = [left.clone(), right.clone()].into_iter().collect();
        let _span = info_span!("hemispheric", left = %left.name, right = %right.name).entered();
        self.grouped(data, set, &regions)
    }

    /// Transfer entropy for every ordered pair of distinct groups in `regions`.
    pub fn regional(
        &self,
        data: ArrayView2<'_, f64>,
        set: &ChannelSet,
        regions: &RegionMap,
    ) -> Result<TransferEntropyTable> {
        let _span = info_span!("regional", groups = regions.len()).entered();
        self.grouped(data, set, regions)
    }

    fn grouped(
        &self,
        data: ArrayView2<'_, f64>,
        set: &ChannelSet,
        regions: &RegionMap,
    ) -> Result<TransferEntropyTable> {
        let resolved = regions.resolve(set)?;
        if resolved.len() < 2 {
            return Err(InfoFlowError::InvalidGroup(format!(
                "need at least two groups, got {}",
                resolved.len()
            )));
        }
        let group_names: Vec<String> = resolved.iter().map(|(name, _)| name.clone()).collect();
        check_pair_keys(&group_names)?;

        // Each channel is prepared once, however many groups it belongs to.
        let mut rows: Vec<usize> = resolved.iter().flat_map(|(_, r)| r.iter().copied()).collect();
        rows.sort_unstable();
        rows.dedup();
        let prepared: HashMap<usize, Result<ChannelSymbols>> = rows
            .iter()
            .copied()
            .zip(self.prepare_channels(data, set, &rows)?)
            .collect();

        let named: Vec<(String, Result<SymbolSequence>)> = resolved
            .iter()
            .map(|(group, members)| {
                let symbols = members
                    .iter()
                    .map(|&row| {
                        prepared[&row]
                            .as_ref()
                            .map(|ch| &ch.symbols)
                            .map_err(|e| channel_failed(&set.names()[row], e))
                    })
                    .collect::<Result<Vec<&SymbolSequence>>>()
                    .and_then(|seqs| SymbolSequence::average(&seqs));
                if let Err(e) = &symbols {
                    warn!(group = %group, error = %e, "group has no representative sequence");
                }
                (group.clone(), symbols)
            })
            .collect();
        Ok(self.pairwise(&named))
    }

    /// TE for every ordered pair of distinct named sequences, on the executor.
    fn pairwise(&self, named: &[(String, Result<SymbolSequence>)]) -> TransferEntropyTable {
        let pairs: Vec<(usize, usize)> = (0..named.len())
            .flat_map(|i| (0..named.len()).filter(move |&j| j != i).map(move |j| (i, j)))
            .collect();

        let results = self.executor.map(&pairs, |&(i, j)| {
            let (source, src) = &named[i];
            let (target, tgt) = &named[j];
            let value = match (src, tgt) {
                (Err(e), _) | (_, Err(e)) => Err(e.clone()),
                (Ok(src), Ok(tgt)) => {
                    let len = src.len().min(tgt.len());
                    transfer_entropy(&src.truncated(len), &tgt.truncated(len), self.params.k, self.params.l)
                }
            };
            TransferEntropyResult {
                source: source.clone(),
                target: target.clone(),
                value,
            }
        });

        let table: TransferEntropyTable = results.into_iter().collect();
        for failed in table.failures() {
            if let Some(e) = failed.error() {
                warn!(pair = %failed.key(), error = %e, "transfer entropy missing");
            }
        }
        info!(
            pairs = table.len(),
            failed = table.failures().count(),
            "transfer entropy table complete"
        );
        table
    }
}

fn check_shape(data: ArrayView2<'_, f64>, set: &ChannelSet) -> Result<()> {
    if data.nrows() != set.len() {
        return Err(InfoFlowError::invalid_parameter(
            "data",
            format!(
                "{} rows but {} channel names",
                data.nrows(),
                set.len()
            ),
        ));
    }
    Ok(())
}

/// Reject name sets where two distinct ordered pairs share one `"{src}_to_{tgt}"` key,
/// e.g. `("A_to_B", "C")` and `("A", "B_to_C")`.
fn check_pair_keys(names: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(names.len() * names.len());
    for (i, source) in names.iter().enumerate() {
        for (j, target) in names.iter().enumerate() {
            if i == j {
                continue;
            }
            let key = pair_key(source, target);
            if !seen.insert(key.clone()) {
                return Err(InfoFlowError::InvalidGroup(format!(
                    "result key '{key}' is produced by more than one ordered pair"
                )));
            }
        }
    }
    Ok(())
}

fn channel_failed(channel: &str, cause: &InfoFlowError) -> InfoFlowError {
    match cause {
        InfoFlowError::ChannelFailed { .. } => cause.clone(),
        other => InfoFlowError::ChannelFailed {
            channel: channel.to_string(),
            reason: other.to_string(),
        },
    }
}
