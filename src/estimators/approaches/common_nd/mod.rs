// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Common N-D point sets with KD-tree neighbour queries (used by false nearest neighbours)

pub mod dataset;
