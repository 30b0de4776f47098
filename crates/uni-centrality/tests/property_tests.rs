// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Property-based tests for core decomposition and sampled betweenness.
//!
//! Uses proptest to verify invariants across randomly generated graphs.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uni_centrality::{
    Algorithm, ApproxBetweenness, ApproxBetweennessConfig, Centrality, GraphProjection, KCore,
    KCoreConfig, ProjectionBuilder,
};

// -----------------------------------------------------------------------------
// Graph Strategies
// -----------------------------------------------------------------------------

/// Random simple undirected graph: node count plus loop-free edge list.
fn graph_strategy(max_nodes: u64) -> impl Strategy<Value = (u64, Vec<(u64, u64)>)> {
    (1..=max_nodes).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..(n as usize * 3))
            .prop_map(|edges| edges.into_iter().filter(|(u, v)| u != v).collect::<Vec<_>>());
        (Just(n), edges)
    })
}

fn build(n: u64, edges: &[(u64, u64)], directed: bool) -> GraphProjection {
    let mut builder = if directed {
        ProjectionBuilder::directed()
    } else {
        ProjectionBuilder::undirected()
    };
    for id in 0..n {
        builder.add_node(id);
    }
    for &(u, v) in edges {
        builder.add_edge(u, v);
    }
    builder.build().expect("generated graph is valid")
}

fn bucket_queue() -> KCoreConfig {
    KCoreConfig {
        enforce_bucket_queue_algorithm: true,
        ..Default::default()
    }
}

// -----------------------------------------------------------------------------
// Core Decomposition
// -----------------------------------------------------------------------------

proptest! {
    /// ParK and the bucket queue must agree on every node.
    #[test]
    fn strategies_agree((n, edges) in graph_strategy(40), directed in any::<bool>()) {
        let graph = build(n, &edges, directed);
        let park = KCore::run(&graph, KCoreConfig::default()).unwrap();
        let bucket = KCore::run(&graph, bucket_queue()).unwrap();

        prop_assert!(park.is_parallel());
        prop_assert!(!bucket.is_parallel());
        prop_assert_eq!(park.core_numbers(), bucket.core_numbers());
        prop_assert_eq!(park.max_core_number(), bucket.max_core_number());
    }

    /// 0 <= core(v) <= degree(v) <= max degree.
    #[test]
    fn core_bounded_by_degree((n, edges) in graph_strategy(40)) {
        let graph = build(n, &edges, false);
        let result = KCore::run(&graph, KCoreConfig::default()).unwrap();
        let max_degree = graph.nodes().iter().map(|&u| graph.degree(u)).max().unwrap_or(0);

        for &u in graph.nodes() {
            let core = result.core_number(u).unwrap();
            prop_assert!(core <= graph.degree(u));
            prop_assert!(core <= max_degree);
        }
    }

    /// Every node of the k-core keeps at least k neighbors inside it.
    #[test]
    fn k_core_has_min_degree_k((n, edges) in graph_strategy(30)) {
        let graph = build(n, &edges, false);
        let result = KCore::run(&graph, KCoreConfig::default()).unwrap();

        for k in 0..=result.max_core_number() {
            let members = result.k_core(k);
            for &u in &members {
                let inside = graph
                    .neighbors(u)
                    .iter()
                    .filter(|w| members.binary_search(w).is_ok())
                    .count() as u32;
                prop_assert!(inside >= k);
            }
        }
    }

    /// cover(k2) is contained in cover(k1) for k1 < k2.
    #[test]
    fn cover_is_nested((n, edges) in graph_strategy(30)) {
        let graph = build(n, &edges, false);
        let cover = KCore::run(&graph, KCoreConfig::default()).unwrap().cover();

        for k in 1..cover.number_of_subsets() as u32 {
            for &u in cover.members(k) {
                prop_assert!(cover.contains(k - 1, u));
            }
        }
    }

    /// The partition agrees with the core numbers.
    #[test]
    fn partition_matches_core_numbers((n, edges) in graph_strategy(30)) {
        let graph = build(n, &edges, false);
        let result = KCore::run(&graph, KCoreConfig::default()).unwrap();
        let shells = result.partition();

        for &u in graph.nodes() {
            prop_assert_eq!(shells.subset_of(u), result.core_number(u));
        }
        let total: usize = shells.subset_sizes().iter().sum();
        prop_assert_eq!(total, graph.node_count());
    }

    /// Stored order is a permutation of the nodes sorted by core number.
    #[test]
    fn node_order_is_monotone((n, edges) in graph_strategy(30)) {
        let graph = build(n, &edges, false);
        let config = KCoreConfig { store_node_order: true, ..Default::default() };
        let result = KCore::run(&graph, config).unwrap();
        let order = result.node_order().unwrap();

        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        prop_assert_eq!(sorted.as_slice(), graph.nodes());

        let cores: Vec<u32> = order.iter().map(|&u| result.core_number(u).unwrap()).collect();
        prop_assert!(cores.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Normalized scores stay within [0, 1] and hit 1 at the top core.
    #[test]
    fn normalized_scores_in_unit_interval((n, edges) in graph_strategy(30)) {
        let graph = build(n, &edges, false);
        let config = KCoreConfig { normalized: true, ..Default::default() };
        let result = KCore::run(&graph, config).unwrap();
        let scores = result.scores();

        prop_assert!(scores.iter().all(|&s| (0.0..=1.0).contains(&s)));
        if result.max_core_number() > 0 {
            prop_assert!(scores.iter().any(|&s| s == 1.0));
        }
    }
}

/// Thousands of nodes keep many frontier nodes decrementing shared
/// neighbors at once.
#[test]
fn strategies_agree_on_large_graphs() {
    for (seed, directed) in [(1u64, false), (2, true), (3, false)] {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = 3000u64;
        let mut builder = if directed {
            ProjectionBuilder::directed()
        } else {
            ProjectionBuilder::undirected()
        };
        for id in 0..n {
            builder.add_node(id);
        }
        // Dense core among the first 200 nodes plus a sparse periphery.
        for _ in 0..4000 {
            let (u, v) = (rng.gen_range(0..200), rng.gen_range(0..200));
            if u != v {
                builder.add_edge(u, v);
            }
        }
        for _ in 0..9000 {
            let (u, v) = (rng.gen_range(0..n), rng.gen_range(0..n));
            if u != v {
                builder.add_edge(u, v);
            }
        }
        for id in (0..n).step_by(97) {
            builder.remove_node(id).unwrap();
        }
        let graph = builder.build().unwrap();

        let park = KCore::run(&graph, KCoreConfig::default()).unwrap();
        let bucket = KCore::run(&graph, bucket_queue()).unwrap();
        assert!(park.is_parallel());
        assert!(park.max_core_number() > 5);
        assert_eq!(park.core_numbers(), bucket.core_numbers());
        assert_eq!(park.core_number(0), None);
    }
}

// -----------------------------------------------------------------------------
// Sampled Betweenness
// -----------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Each sample credits at most vd - 2 interior nodes, each by 1/r.
    #[test]
    fn total_score_bounded_by_path_length((n, edges) in graph_strategy(20), seed in any::<u64>()) {
        let graph = build(n, &edges, false);
        let config = ApproxBetweennessConfig {
            epsilon: 0.2,
            delta: 0.1,
            diameter_samples: 0,
            seed: Some(seed),
        };
        let result = ApproxBetweenness::run(&graph, config).unwrap();

        let total: f64 = result.raw_scores().iter().sum();
        let max_interior = (n as f64 - 2.0).max(0.0);
        prop_assert!(total <= max_interior + 1e-9);
        prop_assert!(result.raw_scores().iter().all(|&s| s >= 0.0 && s <= 1.0 + 1e-9));
    }
}
