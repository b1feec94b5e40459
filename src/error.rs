// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the embedding and information-flow engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, InfoFlowError>;

/// Errors raised by the estimators, the embedding stages and the orchestrator.
///
/// The type is `Clone` so failures can be stored next to successful values in
/// result tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InfoFlowError {
    /// Sequence too short or degenerate for the requested statistic
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Requested max delay does not fit the (subsampled) series
    #[error("Invalid delay range: max_delay {max_delay} must be below subsampled length {subsampled_len}")]
    InvalidDelayRange {
        max_delay: usize,
        subsampled_len: usize,
    },

    /// Embedding parameters leave no trajectory points
    #[error("Embedding too large: (m-1)*tau = ({emb_dim}-1)*{delay} >= series length {len}")]
    EmbeddingTooLarge {
        emb_dim: usize,
        delay: usize,
        len: usize,
    },

    /// Zero-distance nearest neighbour in the FNN test
    #[error("Degenerate neighbour at dimension {dimension}: point {index} has a zero-distance neighbour")]
    DegenerateNeighbor { dimension: usize, index: usize },

    /// Quantizer called with no data
    #[error("Cannot quantize empty data")]
    EmptyData,

    /// Quantizer called with fewer than two bins
    #[error("Invalid bin count {0}: at least 2 bins are required")]
    InvalidBinCount(usize),

    /// Symbol-table estimation of transfer entropy failed
    #[error("Transfer entropy estimation failed: {0}")]
    TransferEntropyEstimation(String),

    /// A scalar parameter is out of range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// NaN or infinity in an input series
    #[error("Non-finite value at index {0}")]
    NonFiniteValue(usize),

    /// A group references a channel that is not in the channel set
    #[error("Group '{group}' references unknown channel '{channel}'")]
    UnknownChannel { group: String, channel: String },

    /// A group definition is unusable (empty, duplicated, too few groups)
    #[error("Invalid group definition: {0}")]
    InvalidGroup(String),

    /// A pair could not be estimated because a participating channel failed
    #[error("Channel '{channel}' failed: {reason}")]
    ChannelFailed { channel: String, reason: String },
}

impl InfoFlowError {
    /// Check if this error is a fatal misconfiguration rather than a numerical
    /// failure that the orchestrator contains per channel or per pair.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            InfoFlowError::InvalidParameter { .. }
                | InfoFlowError::InvalidBinCount(_)
                | InfoFlowError::UnknownChannel { .. }
                | InfoFlowError::InvalidGroup(_)
        )
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        InfoFlowError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
