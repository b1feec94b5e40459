// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use crate::error::{InfoFlowError, Result};

/// Transfer entropy from one channel or group to another, or the reason it is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferEntropyResult {
    pub source: String,
    pub target: String,
    /// Bits of information flow, or the failure that prevented estimation.
    pub value: Result<f64>,
}

impl TransferEntropyResult {
    /// The `"{source}_to_{target}"` key used in result tables.
    pub fn key(&self) -> String {
        pair_key(&self.source, &self.target)
    }

    pub fn is_ok(&self) -> bool {
        self.value.is_ok()
    }

    /// The estimate, `None` if estimation failed.
    pub fn bits(&self) -> Option<f64> {
        self.value.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&InfoFlowError> {
        self.value.as_ref().err()
    }
}

pub fn pair_key(source: &str, target: &str) -> String {
    format!("{source}_to_{target}")
}

/// Results of one orchestration run keyed by `"{source}_to_{target}"`.
///
/// Every requested pair has an entry; failed pairs carry their error so that
/// "no information flow" (a value near zero) and "estimation failed" stay distinct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferEntropyTable {
    entries: BTreeMap<String, TransferEntropyResult>,
}

impl TransferEntropyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, result: TransferEntropyResult) {
        self.entries.insert(result.key(), result);
    }

    pub fn get(&self, key: &str) -> Option<&TransferEntropyResult> {
        self.entries.get(key)
    }

    /// Result for the ordered pair `(source, target)`.
    pub fn pair(&self, source: &str, target: &str) -> Option<&TransferEntropyResult> {
        self.entries.get(&pair_key(source, target))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransferEntropyResult> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose estimation failed.
    pub fn failures(&self) -> impl Iterator<Item = &TransferEntropyResult> {
        self.entries.values().filter(|r| !r.is_ok())
    }

    /// Flatten into `key -> value` form.
    pub fn into_map(self) -> BTreeMap<String, Result<f64>> {
        self.entries
            .into_iter()
            .map(|(k, r)| (k, r.value))
            .collect()
    }
}

impl FromIterator<TransferEntropyResult> for TransferEntropyTable {
    fn from_iter<T: IntoIterator<Item = TransferEntropyResult>>(iter: T) -> Self {
        let mut table = Self::new();
        for r in iter {
            table.insert(r);
        }
        table
    }
}
