// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # infoflow
//!
//! Nonlinear time-series embedding and directional information-flow estimation for
//! multichannel recordings.
//!
//! ## Quick Start
//!
//! ```rust
//! use infoflow::{AnalysisParams, ChannelSet, Executor, InformationFlow};
//! use ndarray::Array2;
//!
//! let data = Array2::from_shape_fn((2, 600), |(c, t)| ((t + 7 * c) as f64 * 0.13).sin());
//! let channels = ChannelSet::new(["C3", "C4"])?;
//! let params = AnalysisParams::default()
//!     .with_max_delay(10)
//!     .with_subsample_factor(2)
//!     .with_num_bins(8);
//!
//! let executor = Executor::new(None)?;
//! let flow = InformationFlow::new(params, &executor)?;
//! let table = flow.all_pairs(data.view(), &channels)?;
//! assert_eq!(table.len(), 2);
//! # Ok::<(), infoflow::InfoFlowError>(())
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Delay selection (min. mutual information over trial delays) | [`embedding::delay_selection`] |
//! | Delay (Takens) embedding | [`embedding::delay_embedding`] |
//! | False-nearest-neighbour dimension diagnostic | [`embedding::fnn`] |
//! | Equal-width quantization | [`quantize`] |
//! | Discrete transfer entropy | [`estimators::transfer_entropy`] |
//! | All-pairs / hemispheric / regional orchestration | [`orchestrator`] |
//!
//! ## Architecture
//!
//! 1. **Public API Layer**: `InformationFlow`, factory types (`MutualInformation`, `TransferEntropy`)
//! 2. **Estimation Approaches**: MIC and histogram mutual information, plug-in discrete
//!    entropy, conditional mutual information and transfer entropy
//! 3. **Core Infrastructure**: shared traits, KD-tree point sets, TE observation slicing
//! 4. **Execution**: an owned `Executor` worker pool for the delay sweep and per-channel work
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod embedding;
pub mod error;
pub mod estimators;
pub mod executor;
pub mod orchestrator;
pub mod params;
pub mod quantize;

pub use error::{InfoFlowError, Result};
pub use executor::Executor;
pub use orchestrator::{
    ChannelGroup, ChannelSet, InformationFlow, RegionMap, TransferEntropyResult,
    TransferEntropyTable,
};
pub use params::{AnalysisParams, DelayCriterion};
pub use quantize::{SymbolSequence, quantize};
