// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use ndarray::ArrayView2;
use std::num::NonZeroUsize;

/// Nearest other point of a query point: its row index and Euclidean distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

/// Shared N-D dataset container with KD-tree for fast neighbor queries.
pub struct NdDataset<const K: usize> {
    pub points: Vec<[f64; K]>,
    pub n: usize,
    pub tree: ImmutableKdTree<f64, K>,
}

impl<const K: usize> NdDataset<K> {
    pub fn from_points(points: Vec<[f64; K]>) -> Self {
        let n = points.len();
        let tree = ImmutableKdTree::new_from_slice(&points);
        Self { points, n, tree }
    }

    pub fn from_view(data: ArrayView2<'_, f64>) -> Self {
        assert!(data.ncols() == K, "data.ncols() must equal K");
        Self::from_points(Self::to_points(data))
    }

    fn to_points(data: ArrayView2<'_, f64>) -> Vec<[f64; K]> {
        data.rows()
            .into_iter()
            .map(|row| {
                let mut p = [0.0; K];
                for (dst, &src) in p.iter_mut().zip(row.iter()) {
                    *dst = src;
                }
                p
            })
            .collect()
    }

    /// Euclidean nearest neighbour of every point, self excluded.
    ///
    /// If a point has an exact duplicate the duplicate may be reported instead of
    /// the point itself; either way the reported distance is zero.
    pub fn nearest_neighbors_euclidean(&self) -> Vec<Neighbor> {
        if self.n < 2 {
            return Vec::new();
        }
        let two = NonZeroUsize::MIN.saturating_add(1);
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let neigh = self.tree.nearest_n::<SquaredEuclidean>(p, two);
                let other = neigh
                    .iter()
                    .find(|nn| nn.item as usize != i)
                    .unwrap_or(&neigh[neigh.len() - 1]);
                Neighbor {
                    index: other.item as usize,
                    distance: other.distance.sqrt(),
                }
            })
            .collect()
    }
}

/// O(N^2) Euclidean nearest neighbours for dimensions without a KD-tree instantiation.
fn nearest_neighbors_brute(data: ArrayView2<'_, f64>) -> Vec<Neighbor> {
    let n = data.nrows();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let xi = data.row(i);
            let mut best = Neighbor {
                index: usize::MAX,
                distance: f64::INFINITY,
            };
            for j in (0..n).filter(|&j| j != i) {
                let d2: f64 = xi
                    .iter()
                    .zip(data.row(j).iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                if d2 < best.distance {
                    best = Neighbor {
                        index: j,
                        distance: d2,
                    };
                }
            }
            best.distance = best.distance.sqrt();
            best
        })
        .collect()
}

macro_rules! dispatch_nearest {
    ($data:expr, $($k:literal),+) => {
        match $data.ncols() {
            $($k => NdDataset::<$k>::from_view($data).nearest_neighbors_euclidean(),)+
            _ => nearest_neighbors_brute($data),
        }
    };
}

/// Euclidean nearest neighbour of every row of `data` (rows = points), self excluded.
///
/// Dimensions up to 12 go through a KD-tree; higher dimensions use a brute-force scan.
pub fn nearest_neighbors(data: ArrayView2<'_, f64>) -> Vec<Neighbor> {
    dispatch_nearest!(data, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12)
}
