// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! K-Core Decomposition Algorithm.
//!
//! Assigns every node its core number: the largest `k` such that the node
//! survives in the subgraph obtained by repeatedly deleting nodes of degree
//! below `k`. Two strategies compute the same core numbers:
//!
//! - **ParK** (Dasari, Desh, Zubair, 2014): levels are peeled in increasing
//!   order; within a level, frontier nodes are removed in parallel sublevels
//!   with atomic degree decrements.
//! - **Bucket queue**: sequential peeling with one bucket per degree. Slower,
//!   but it yields a deterministic removal order.
//!
//! Directed graphs are decomposed on their undirected view. Self-loops are
//! rejected.

use crate::algo::algorithms::{Algorithm, Centrality};
use crate::algo::projection::Adjacency;
use crate::algo::{Cover, GraphProjection, Partition};
use crate::error::{AlgoError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tracing::{debug, info, instrument};

pub struct KCore;

/// Peeling strategy, fixed once from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KCoreStrategy {
    /// Parallel level-synchronous peeling.
    ParK,
    /// Sequential bucket priority queue.
    BucketQueue,
}

impl KCoreStrategy {
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, KCoreStrategy::ParK)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KCoreConfig {
    /// Scale scores into [0, 1] by the maximum core number.
    pub normalized: bool,
    /// Use the sequential bucket queue even when ParK is possible.
    pub enforce_bucket_queue_algorithm: bool,
    /// Record nodes in removal order; implies the bucket queue.
    pub store_node_order: bool,
}

impl KCoreConfig {
    pub fn strategy(&self) -> KCoreStrategy {
        if self.store_node_order || self.enforce_bucket_queue_algorithm {
            KCoreStrategy::BucketQueue
        } else {
            KCoreStrategy::ParK
        }
    }

    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.strategy().is_parallel()
    }
}

#[derive(Debug, Clone)]
pub struct KCoreResult {
    /// Core number per slot, `None` for removed slots
    core_numbers: Vec<Option<u32>>,
    scores: Vec<f64>,
    max_core: u32,
    node_order: Option<Vec<u32>>,
    external_ids: Vec<u64>,
    strategy: KCoreStrategy,
    normalized: bool,
}

impl KCoreResult {
    #[inline]
    pub fn core_number(&self, node: u32) -> Option<u32> {
        self.core_numbers.get(node as usize).copied().flatten()
    }

    #[inline]
    pub fn core_numbers(&self) -> &[Option<u32>] {
        &self.core_numbers
    }

    #[inline]
    pub fn max_core_number(&self) -> u32 {
        self.max_core
    }

    /// K-cores as a nested cover: subset `k` holds nodes with core `>= k`.
    pub fn cover(&self) -> Cover {
        Cover::nested_from_levels(&self.core_numbers)
    }

    /// K-shells: nodes grouped by exact core number.
    pub fn partition(&self) -> Partition {
        Partition::from_labels(self.core_numbers.clone())
    }

    /// Nodes in removal order, i.e. by non-decreasing core number.
    pub fn node_order(&self) -> Result<&[u32]> {
        self.node_order
            .as_deref()
            .ok_or(AlgoError::NodeOrderNotStored)
    }

    /// Nodes of the `k`-core.
    pub fn k_core(&self, k: u32) -> Vec<u32> {
        self.core_numbers
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c.is_some_and(|c| c >= k))
            .map(|(u, _)| u as u32)
            .collect()
    }

    /// (external id, core number) for every live node.
    pub fn core_numbers_by_id(&self) -> Vec<(u64, u32)> {
        self.core_numbers
            .iter()
            .zip(&self.external_ids)
            .filter_map(|(c, &id)| c.map(|c| (id, c)))
            .collect()
    }

    #[inline]
    pub fn strategy(&self) -> KCoreStrategy {
        self.strategy
    }

    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.strategy.is_parallel()
    }
}

impl Centrality for KCoreResult {
    fn raw_scores(&self) -> &[f64] {
        &self.scores
    }

    fn maximum(&self) -> f64 {
        self.max_core as f64
    }

    fn is_normalized(&self) -> bool {
        self.normalized
    }
}

impl Algorithm for KCore {
    type Config = KCoreConfig;
    type Result = KCoreResult;

    fn name() -> &'static str {
        "kCore"
    }

    #[instrument(skip(graph), fields(nodes = graph.node_count()))]
    fn run(graph: &GraphProjection, config: Self::Config) -> Result<Self::Result> {
        if let Some(u) = graph.first_self_loop() {
            return Err(AlgoError::SelfLoop {
                node: graph.to_external(u),
            });
        }

        let strategy = config.strategy();
        let adj = graph.undirected_adjacency();
        info!(?strategy, "running core decomposition");

        let (cores, node_order) = match strategy {
            KCoreStrategy::ParK => (peel_park(graph, &adj), None),
            KCoreStrategy::BucketQueue => {
                peel_bucket_queue(graph, &adj, config.store_node_order)
            }
        };

        let n = graph.upper_node_id_bound();
        let core_numbers: Vec<Option<u32>> = (0..n as u32)
            .map(|u| graph.has_node(u).then(|| cores[u as usize]))
            .collect();
        let max_core = core_numbers.iter().flatten().max().copied().unwrap_or(0);
        let scores = core_numbers
            .iter()
            .map(|c| c.map_or(0.0, f64::from))
            .collect();
        let external_ids = (0..n as u32).map(|u| graph.to_external(u)).collect();

        info!(max_core, "core decomposition finished");

        Ok(KCoreResult {
            core_numbers,
            scores,
            max_core,
            node_order,
            external_ids,
            strategy,
            normalized: config.normalized,
        })
    }
}

/// Sequential peeling over one bucket per degree.
///
/// Buckets are lazy: a node moved to a lower bucket leaves a stale entry
/// behind, recognised by `key[v] != level` when popped.
fn peel_bucket_queue(
    graph: &GraphProjection,
    adj: &Adjacency<'_>,
    store_order: bool,
) -> (Vec<u32>, Option<Vec<u32>>) {
    let n = graph.upper_node_id_bound();
    let mut degrees: Vec<u32> = (0..n as u32).map(|u| adj.degree(u)).collect();
    let max_degree = graph
        .nodes()
        .iter()
        .map(|&u| degrees[u as usize])
        .max()
        .unwrap_or(0) as usize;

    let mut buckets: Vec<Vec<u32>> = vec![Vec::new(); max_degree + 1];
    for &u in graph.nodes() {
        buckets[degrees[u as usize] as usize].push(u);
    }
    let mut key = degrees.clone();

    let mut processed = vec![false; n];
    let mut cores = vec![0u32; n];
    let mut order = store_order.then(|| Vec::with_capacity(graph.node_count()));
    let mut remaining = graph.node_count();
    let mut level = 0usize;

    while remaining > 0 {
        let Some(v) = buckets[level].pop() else {
            level += 1;
            continue;
        };
        let vi = v as usize;
        if processed[vi] || key[vi] as usize != level {
            continue;
        }

        processed[vi] = true;
        remaining -= 1;
        cores[vi] = level as u32;
        if let Some(order) = order.as_mut() {
            order.push(v);
        }

        for &w in adj.neighbors(v) {
            let wi = w as usize;
            if processed[wi] {
                continue;
            }
            degrees[wi] -= 1;
            // A neighbor never drops below the level being peeled.
            let target = degrees[wi].max(level as u32);
            if target < key[wi] {
                key[wi] = target;
                buckets[target as usize].push(w);
            }
        }
    }

    (cores, order)
}

/// Parallel level-synchronous peeling (ParK).
fn peel_park(graph: &GraphProjection, adj: &Adjacency<'_>) -> Vec<u32> {
    let n = graph.upper_node_id_bound();
    let degrees: Vec<AtomicU32> = (0..n as u32)
        .map(|u| AtomicU32::new(adj.degree(u)))
        .collect();
    let active: Vec<AtomicBool> = (0..n as u32)
        .map(|u| AtomicBool::new(graph.has_node(u)))
        .collect();
    let cores: Vec<AtomicU32> = (0..n).map(|_| AtomicU32::new(0)).collect();

    let mut remaining = graph.node_count();
    let mut level = min_active_degree(graph, &degrees, &active).unwrap_or(0);

    while remaining > 0 {
        let mut curr = scan(graph, level, &degrees, &active);
        let mut sublevels = 0usize;
        while !curr.is_empty() {
            remaining -= curr.len();
            curr = process_sublevel(adj, level, &curr, &degrees, &active, &cores);
            sublevels += 1;
        }
        debug!(level, sublevels, remaining, "level peeled");

        // Every active node now has degree > level; skip empty levels.
        match min_active_degree(graph, &degrees, &active) {
            Some(next) => level = next,
            None => break,
        }
    }

    cores.into_iter().map(AtomicU32::into_inner).collect()
}

/// Active nodes whose remaining degree equals `level`.
fn scan(
    graph: &GraphProjection,
    level: u32,
    degrees: &[AtomicU32],
    active: &[AtomicBool],
) -> Vec<u32> {
    graph
        .nodes()
        .par_iter()
        .copied()
        .filter(|&u| {
            active[u as usize].load(Ordering::Relaxed)
                && degrees[u as usize].load(Ordering::Relaxed) == level
        })
        .collect()
}

/// Remove the frontier `curr` at `level` and return the next frontier.
///
/// A neighbor's degree is only decremented while it is above `level`, and
/// only the decrement from `level + 1` to `level` enqueues it, so concurrent
/// frontier nodes sharing a neighbor enqueue it exactly once.
fn process_sublevel(
    adj: &Adjacency<'_>,
    level: u32,
    curr: &[u32],
    degrees: &[AtomicU32],
    active: &[AtomicBool],
    cores: &[AtomicU32],
) -> Vec<u32> {
    curr.par_iter().for_each(|&v| {
        cores[v as usize].store(level, Ordering::Relaxed);
        active[v as usize].store(false, Ordering::Relaxed);
    });

    curr.par_iter()
        .flat_map_iter(|&v| {
            adj.neighbors(v).iter().copied().filter(move |&w| {
                let wi = w as usize;
                if !active[wi].load(Ordering::Relaxed) {
                    return false;
                }
                let prev = degrees[wi].fetch_update(Ordering::AcqRel, Ordering::Acquire, |d| {
                    (d > level).then(|| d - 1)
                });
                prev == Ok(level + 1)
            })
        })
        .collect()
}

fn min_active_degree(
    graph: &GraphProjection,
    degrees: &[AtomicU32],
    active: &[AtomicBool],
) -> Option<u32> {
    graph
        .nodes()
        .par_iter()
        .filter(|&&u| active[u as usize].load(Ordering::Relaxed))
        .map(|&u| degrees[u as usize].load(Ordering::Relaxed))
        .min()
}
