// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owned worker pool for the parallel regions of the engine.
//!
//! The pool is created by the caller and passed by reference into the delay selector
//! and the orchestrator. Work submitted through [`Executor::map`] is fork-join: the
//! call blocks until every task has returned and results come back in input order,
//! regardless of completion order. Dropping the executor signals its worker threads to
//! shut down, including on early-return and unwinding paths.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{InfoFlowError, Result};

pub struct Executor {
    pool: ThreadPool,
}

impl Executor {
    /// Build a pool with `threads` workers, or one per available hardware thread
    /// when `None`.
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let mut builder =
            ThreadPoolBuilder::new().thread_name(|i| format!("infoflow-worker-{i}"));
        if let Some(n) = threads {
            if n == 0 {
                return Err(InfoFlowError::invalid_parameter(
                    "threads",
                    "worker pool needs at least one thread",
                ));
            }
            builder = builder.num_threads(n);
        }
        let pool = builder
            .build()
            .map_err(|e| InfoFlowError::invalid_parameter("threads", e.to_string()))?;
        Ok(Self { pool })
    }

    /// Single-threaded executor, useful for deterministic debugging.
    pub fn sequential() -> Result<Self> {
        Self::new(Some(1))
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Apply `f` to every item on the pool and collect results in input order.
    pub fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        self.pool.install(|| items.par_iter().map(|item| f(item)).collect())
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("threads", &self.num_threads())
            .finish()
    }
}
