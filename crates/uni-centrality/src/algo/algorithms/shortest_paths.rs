// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Single-source shortest paths with path counting.
//!
//! Both searches record, for every node reached from the source, its distance,
//! the number of distinct shortest paths (saturating at `u64::MAX`) and its
//! predecessors on those paths. Together these encode the shortest-path DAG
//! rooted at the source.

use crate::algo::GraphProjection;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

/// Shortest-path DAG from a fixed source.
pub trait ShortestPaths {
    fn source(&self) -> u32;

    /// Compute the DAG. Calling it again recomputes from scratch.
    fn run(&mut self);

    /// Distance from the source, `f64::INFINITY` if unreachable.
    fn distance(&self, node: u32) -> f64;

    /// Number of shortest paths from the source; 0 if unreachable.
    fn number_of_paths(&self, node: u32) -> u64;

    /// Immediate predecessors of `node` on shortest paths from the source.
    fn predecessors(&self, node: u32) -> &[u32];
}

#[derive(Debug, Default)]
struct PathDag {
    dist: Vec<f64>,
    sigma: Vec<u64>,
    preds: Vec<Vec<u32>>,
}

impl PathDag {
    fn reset(&mut self, n: usize, source: u32) {
        self.dist.clear();
        self.dist.resize(n, f64::INFINITY);
        self.sigma.clear();
        self.sigma.resize(n, 0);
        self.preds.clear();
        self.preds.resize_with(n, Vec::new);

        self.dist[source as usize] = 0.0;
        self.sigma[source as usize] = 1;
    }

    /// Record that `v` is reached through `u` at `new_dist`.
    fn relax(&mut self, u: u32, v: u32, new_dist: f64) -> bool {
        let (ui, vi) = (u as usize, v as usize);
        if new_dist < self.dist[vi] {
            self.dist[vi] = new_dist;
            self.sigma[vi] = self.sigma[ui];
            self.preds[vi].clear();
            self.preds[vi].push(u);
            true
        } else {
            if new_dist == self.dist[vi] {
                self.sigma[vi] = self.sigma[vi].saturating_add(self.sigma[ui]);
                self.preds[vi].push(u);
            }
            false
        }
    }
}

/// Breadth-first search for unweighted graphs.
pub struct Bfs<'a> {
    graph: &'a GraphProjection,
    source: u32,
    dag: PathDag,
}

impl<'a> Bfs<'a> {
    pub fn new(graph: &'a GraphProjection, source: u32) -> Self {
        Self {
            graph,
            source,
            dag: PathDag::default(),
        }
    }
}

impl ShortestPaths for Bfs<'_> {
    fn source(&self) -> u32 {
        self.source
    }

    fn run(&mut self) {
        let n = self.graph.upper_node_id_bound();
        self.dag.reset(n, self.source);

        let mut q = VecDeque::with_capacity(n);
        q.push_back(self.source);

        while let Some(v) = q.pop_front() {
            let next = self.dag.dist[v as usize] + 1.0;
            for &w in self.graph.neighbors(v) {
                if self.dag.relax(v, w, next) {
                    q.push_back(w);
                }
            }
        }
    }

    fn distance(&self, node: u32) -> f64 {
        self.dag.dist.get(node as usize).copied().unwrap_or(f64::INFINITY)
    }

    fn number_of_paths(&self, node: u32) -> u64 {
        self.dag.sigma.get(node as usize).copied().unwrap_or(0)
    }

    fn predecessors(&self, node: u32) -> &[u32] {
        self.dag.preds.get(node as usize).map_or(&[], Vec::as_slice)
    }
}

/// Dijkstra's algorithm for graphs with positive edge weights.
pub struct Dijkstra<'a> {
    graph: &'a GraphProjection,
    source: u32,
    dag: PathDag,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a GraphProjection, source: u32) -> Self {
        Self {
            graph,
            source,
            dag: PathDag::default(),
        }
    }
}

impl ShortestPaths for Dijkstra<'_> {
    fn source(&self) -> u32 {
        self.source
    }

    fn run(&mut self) {
        let n = self.graph.upper_node_id_bound();
        self.dag.reset(n, self.source);

        // Non-negative f64 bit patterns order like the values themselves.
        let mut heap = BinaryHeap::new();
        heap.push(Reverse((0.0f64.to_bits(), self.source)));

        while let Some(Reverse((d_bits, u))) = heap.pop() {
            let d = f64::from_bits(d_bits);
            if d > self.dag.dist[u as usize] {
                continue;
            }

            for (v, weight) in self.graph.weighted_neighbors(u) {
                let new_dist = d + weight;
                if self.dag.relax(u, v, new_dist) {
                    heap.push(Reverse((new_dist.to_bits(), v)));
                }
            }
        }
    }

    fn distance(&self, node: u32) -> f64 {
        self.dag.dist.get(node as usize).copied().unwrap_or(f64::INFINITY)
    }

    fn number_of_paths(&self, node: u32) -> u64 {
        self.dag.sigma.get(node as usize).copied().unwrap_or(0)
    }

    fn predecessors(&self, node: u32) -> &[u32] {
        self.dag.preds.get(node as usize).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_utils::{build_test_graph, build_weighted_test_graph};

    #[test]
    fn test_bfs_counts_paths_in_diamond() {
        // 0 - 1 - 3, 0 - 2 - 3
        let graph = build_test_graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let mut bfs = Bfs::new(&graph, 0);
        bfs.run();

        assert_eq!(bfs.distance(3), 2.0);
        assert_eq!(bfs.number_of_paths(3), 2);
        let mut preds = bfs.predecessors(3).to_vec();
        preds.sort_unstable();
        assert_eq!(preds, vec![1, 2]);
        assert_eq!(bfs.number_of_paths(0), 1);
        assert!(bfs.predecessors(0).is_empty());
    }

    #[test]
    fn test_bfs_unreachable() {
        let graph = build_test_graph(3, &[(0, 1)]);
        let mut bfs = Bfs::new(&graph, 0);
        bfs.run();

        assert_eq!(bfs.number_of_paths(2), 0);
        assert_eq!(bfs.distance(2), f64::INFINITY);
        assert!(bfs.predecessors(2).is_empty());
    }

    #[test]
    fn test_dijkstra_prefers_lighter_route() {
        // 0 -1- 1 -1- 2 and a heavy shortcut 0 -5- 2
        let graph = build_weighted_test_graph(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 5.0)]);
        let mut sssp = Dijkstra::new(&graph, 0);
        sssp.run();

        assert_eq!(sssp.source(), 0);
        assert_eq!(sssp.distance(2), 2.0);
        assert_eq!(sssp.number_of_paths(2), 1);
        assert_eq!(sssp.predecessors(2), &[1]);
    }

    #[test]
    fn test_dijkstra_counts_tied_routes() {
        // Two routes of weight 3 from 0 to 3.
        let graph = build_weighted_test_graph(
            4,
            &[(0, 1, 1.0), (1, 3, 2.0), (0, 2, 2.0), (2, 3, 1.0)],
        );
        let mut sssp = Dijkstra::new(&graph, 0);
        sssp.run();

        assert_eq!(sssp.distance(3), 3.0);
        assert_eq!(sssp.number_of_paths(3), 2);
        assert_eq!(sssp.predecessors(3).len(), 2);
    }
}
