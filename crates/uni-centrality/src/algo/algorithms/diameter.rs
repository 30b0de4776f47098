// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Vertex Diameter Estimation.
//!
//! The vertex diameter is the number of nodes on the longest shortest path.
//! Both estimators return an upper-bound style estimate used to size
//! sampling budgets, never an exact value:
//!
//! - Pedantic: one BFS per connected component (unweighted undirected
//!   graphs), or the size of the largest weakly connected component
//!   (weighted or directed graphs). Complexity: O(V + E).
//! - Sampled: BFS from a fixed number of random sources, taking the
//!   largest bound found. Weighted or directed graphs fall back to the
//!   reached component size as above. Complexity: O(samples * (V + E)).
//!
//! Edge direction is ignored in both cases.

use crate::algo::GraphProjection;
use crate::algo::projection::Adjacency;
use rand::Rng;
use rayon::prelude::*;
use std::collections::VecDeque;
use tracing::debug;

/// Exhaustive estimate over every component of the graph.
///
/// Returns 0 for an empty graph and 1 for a graph without edges.
pub fn estimated_vertex_diameter_pedantic(graph: &GraphProjection) -> f64 {
    let adj = graph.undirected_adjacency();
    let mut visited = vec![false; graph.upper_node_id_bound()];
    let mut vd = 0usize;
    let mut components = 0usize;

    for &u in graph.nodes() {
        if visited[u as usize] {
            continue;
        }
        components += 1;
        let sweep = sweep_from(&adj, u, &mut visited);
        vd = vd.max(sweep.bound_for(graph));
    }

    debug!(components, vd, "pedantic vertex diameter estimate");
    vd as f64
}

/// Estimate from `samples` random BFS sources.
///
/// Cheaper than the pedantic estimate on graphs with many components; the
/// largest component is hit with high probability since sources are drawn
/// uniformly over nodes.
pub fn estimated_vertex_diameter<R: Rng + ?Sized>(
    graph: &GraphProjection,
    samples: usize,
    rng: &mut R,
) -> f64 {
    if graph.node_count() == 0 || samples == 0 {
        return 0.0;
    }

    let sources: Vec<u32> = (0..samples)
        .filter_map(|_| graph.random_node(rng))
        .collect();
    let adj = graph.undirected_adjacency();
    let n = graph.upper_node_id_bound();

    let vd = sources
        .par_iter()
        .map(|&s| {
            let mut visited = vec![false; n];
            sweep_from(&adj, s, &mut visited).bound_for(graph)
        })
        .max()
        .unwrap_or(0);

    debug!(samples, vd, "sampled vertex diameter estimate");
    vd as f64
}

/// Outcome of one BFS sweep.
#[derive(Debug, Clone, Copy, Default)]
struct Sweep {
    /// Largest and second largest hop distance among reached nodes
    max_dist: usize,
    second_dist: usize,
    reached: usize,
}

impl Sweep {
    /// Any two reached nodes are at most `max_dist + second_dist` hops apart,
    /// i.e. a path of that many edges plus one node.
    fn vertex_bound(&self) -> usize {
        self.max_dist + self.second_dist + 1
    }

    /// Hop counts along weighted or directed shortest paths can exceed the
    /// undirected BFS depth but never the component size.
    fn bound_for(&self, graph: &GraphProjection) -> usize {
        if graph.is_weighted() || graph.is_directed() {
            self.reached
        } else {
            self.vertex_bound()
        }
    }
}

fn sweep_from(adj: &Adjacency<'_>, source: u32, visited: &mut [bool]) -> Sweep {
    let mut sweep = Sweep::default();
    let mut q = VecDeque::new();
    visited[source as usize] = true;
    q.push_back((source, 0usize));

    while let Some((v, dist)) = q.pop_front() {
        sweep.reached += 1;
        if dist > sweep.max_dist {
            sweep.second_dist = sweep.max_dist;
            sweep.max_dist = dist;
        } else if dist > sweep.second_dist {
            sweep.second_dist = dist;
        }

        for &w in adj.neighbors(v) {
            if !visited[w as usize] {
                visited[w as usize] = true;
                q.push_back((w, dist + 1));
            }
        }
    }

    sweep
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_utils::{
        build_directed_test_graph, build_test_graph, build_weighted_test_graph,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_path_bound_from_first_node() {
        // 0-1-2-3: sweep from 0 sees distances 3 and 2 -> bound 6 nodes,
        // true vertex diameter is 4.
        let graph = build_test_graph(4, &[(0, 1), (1, 2), (2, 3)]);
        let vd = estimated_vertex_diameter_pedantic(&graph);
        assert!(vd >= 4.0);
        assert_eq!(vd, 6.0);
    }

    #[test]
    fn test_takes_max_over_components() {
        // Components: {0,1} and {2,3,4,5} as a path
        let graph = build_test_graph(6, &[(0, 1), (2, 3), (3, 4), (4, 5)]);
        let vd = estimated_vertex_diameter_pedantic(&graph);
        assert!(vd >= 4.0);
    }

    #[test]
    fn test_edgeless_and_empty() {
        let graph = build_test_graph(3, &[]);
        assert_eq!(estimated_vertex_diameter_pedantic(&graph), 1.0);

        let empty = build_test_graph(0, &[]);
        assert_eq!(estimated_vertex_diameter_pedantic(&empty), 0.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(estimated_vertex_diameter(&empty, 5, &mut rng), 0.0);
    }

    #[test]
    fn test_weighted_uses_component_size() {
        let graph = build_weighted_test_graph(4, &[(0, 1, 2.0), (1, 2, 0.5)]);
        assert_eq!(estimated_vertex_diameter_pedantic(&graph), 3.0);
    }

    #[test]
    fn test_sampled_weighted_uses_component_size() {
        // K4 whose light edges form the path 0-1-2-3: every shortest path
        // from 0 to 3 visits all four nodes, while each BFS sweep only sees
        // depth 1.
        let graph = build_weighted_test_graph(
            4,
            &[
                (0, 1, 1.0),
                (1, 2, 1.0),
                (2, 3, 1.0),
                (0, 2, 10.0),
                (0, 3, 10.0),
                (1, 3, 10.0),
            ],
        );
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(estimated_vertex_diameter(&graph, 6, &mut rng), 4.0);
    }

    #[test]
    fn test_sampled_directed_uses_component_size() {
        // Only 0 -> 1 -> 2 -> 3 reaches 3 from 0; the undirected view is K4.
        let graph = build_directed_test_graph(
            4,
            &[(0, 1), (1, 2), (2, 3), (2, 0), (3, 0), (3, 1)],
        );
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(estimated_vertex_diameter(&graph, 3, &mut rng), 4.0);
        assert_eq!(estimated_vertex_diameter_pedantic(&graph), 4.0);
    }

    #[test]
    fn test_sampled_bounds_true_diameter() {
        let edges: Vec<(u64, u64)> = (0..9).map(|i| (i, i + 1)).collect();
        let graph = build_test_graph(10, &edges);
        let mut rng = StdRng::seed_from_u64(7);
        let vd = estimated_vertex_diameter(&graph, 4, &mut rng);
        // Every source yields a bound of at least the true vertex diameter.
        assert!(vd >= 10.0);
        assert!(vd <= 19.0);
    }
}
