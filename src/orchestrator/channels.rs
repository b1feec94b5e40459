// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{HashMap, HashSet};

use crate::error::{InfoFlowError, Result};

/// Channel names in row order of the data buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ChannelSet {
    /// Build a channel set; row `i` of the data buffer belongs to the `i`-th name.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(InfoFlowError::InvalidGroup(format!(
                    "channel '{name}' listed twice"
                )));
            }
        }
        Ok(Self { names, index })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A named, ordered set of channel names (a hemisphere, a region, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelGroup {
    pub name: String,
    pub channels: Vec<String>,
}

impl ChannelGroup {
    pub fn new<S: Into<String>>(name: impl Into<String>, channels: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            channels: channels.into_iter().map(Into::into).collect(),
        }
    }

    /// Row indices of the member channels.
    ///
    /// Fails with [`InfoFlowError::UnknownChannel`] for a name missing from `set` and
    /// with [`InfoFlowError::InvalidGroup`] for an empty group.
    pub fn resolve(&self, set: &ChannelSet) -> Result<Vec<usize>> {
        if self.channels.is_empty() {
            return Err(InfoFlowError::InvalidGroup(format!(
                "group '{}' has no channels",
                self.name
            )));
        }
        self.channels
            .iter()
            .map(|ch| {
                set.index_of(ch).ok_or_else(|| InfoFlowError::UnknownChannel {
                    group: self.name.clone(),
                    channel: ch.clone(),
                })
            })
            .collect()
    }
}

/// Ordered collection of named channel groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMap {
    groups: Vec<ChannelGroup>,
}

impl RegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        channels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.groups.push(ChannelGroup::new(name, channels));
        self
    }

    pub fn push(&mut self, group: ChannelGroup) {
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[ChannelGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Resolve every group against `set`, rejecting duplicate group names.
    pub fn resolve(&self, set: &ChannelSet) -> Result<Vec<(String, Vec<usize>)>> {
        let mut seen = HashSet::new();
        self.groups
            .iter()
            .map(|g| {
                if !seen.insert(g.name.as_str()) {
                    return Err(InfoFlowError::InvalidGroup(format!(
                        "group '{}' defined twice",
                        g.name
                    )));
                }
                Ok((g.name.clone(), g.resolve(set)?))
            })
            .collect()
    }
}

impl FromIterator<ChannelGroup> for RegionMap {
    fn from_iter<T: IntoIterator<Item = ChannelGroup>>(iter: T) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}
