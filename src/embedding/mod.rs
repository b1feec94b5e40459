// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phase-space reconstruction: delay selection, delay embedding and the
//! false-nearest-neighbour dimension diagnostic.

pub mod delay_embedding;
pub mod delay_selection;
pub mod fnn;

pub use delay_embedding::{EmbeddedTrajectory, delay_embed};
pub use delay_selection::{DelaySelection, DelaySelector};
pub use fnn::{false_nearest_neighbors, minimal_embedding_dimension};

use crate::error::Result;
use crate::estimators::traits::DependenceScore;
use crate::executor::Executor;

/// A reconstructed phase space: the chosen delay and the trajectory embedded with it.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSpace {
    pub selection: DelaySelection,
    pub trajectory: EmbeddedTrajectory,
}

/// Select a delay for `series` and embed it in `emb_dim` dimensions.
///
/// This is the 2-D / 3-D phase-space portrait pipeline; rendering the trajectory is
/// left to the caller.
pub fn reconstruct_phase_space<S: DependenceScore>(
    series: &[f64],
    emb_dim: usize,
    selector: &DelaySelector<S>,
    executor: &Executor,
) -> Result<PhaseSpace> {
    let selection = selector.select(series, executor)?;
    let trajectory = delay_embed(series, emb_dim, selection.delay)?;
    Ok(PhaseSpace {
        selection,
        trajectory,
    })
}
