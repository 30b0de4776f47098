// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Core algorithm traits and common utilities.

use crate::algo::GraphProjection;
use crate::error::Result;

/// Core trait for all graph algorithms.
pub trait Algorithm: Send + Sync {
    /// Algorithm parameters.
    type Config: Default + Clone + Send + 'static;
    /// Result type.
    type Result: Send + 'static;

    /// Algorithm identifier.
    fn name() -> &'static str;

    /// Execute algorithm on a projection.
    fn run(graph: &GraphProjection, config: Self::Config) -> Result<Self::Result>;
}

/// Per-node scores produced by a centrality algorithm.
///
/// Scores are indexed by slot; removed slots score 0.
pub trait Centrality {
    /// Unscaled scores as computed.
    fn raw_scores(&self) -> &[f64];

    /// Theoretical maximum score on the analysed graph.
    fn maximum(&self) -> f64;

    /// Whether `scores` are scaled by `maximum`.
    fn is_normalized(&self) -> bool {
        false
    }

    /// Scores divided by `maximum`; all zero when the maximum is zero.
    fn normalized_scores(&self) -> Vec<f64> {
        let max = self.maximum();
        if max > 0.0 {
            self.raw_scores().iter().map(|s| s / max).collect()
        } else {
            vec![0.0; self.raw_scores().len()]
        }
    }

    /// Scores in the configured scale.
    fn scores(&self) -> Vec<f64> {
        if self.is_normalized() {
            self.normalized_scores()
        } else {
            self.raw_scores().to_vec()
        }
    }

    /// Score of a single node in the configured scale.
    fn score(&self, node: u32) -> f64 {
        let raw = self.raw_scores().get(node as usize).copied().unwrap_or(0.0);
        if !self.is_normalized() {
            return raw;
        }
        let max = self.maximum();
        if max > 0.0 { raw / max } else { 0.0 }
    }

    /// (node, score) pairs by descending score, ties broken by slot.
    fn ranking(&self) -> Vec<(u32, f64)> {
        let mut ranking: Vec<(u32, f64)> = self
            .scores()
            .into_iter()
            .enumerate()
            .map(|(u, s)| (u as u32, s))
            .collect();
        ranking.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranking
    }
}

mod shortest_paths;
pub use shortest_paths::{Bfs, Dijkstra, ShortestPaths};

pub mod diameter;

mod kcore;
pub use kcore::{KCore, KCoreConfig, KCoreResult, KCoreStrategy};

mod approx_betweenness;
pub use approx_betweenness::{
    ApproxBetweenness, ApproxBetweennessConfig, ApproxBetweennessResult, sample_count,
};
