// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use crate::algo::projection::{GraphProjection, ProjectionBuilder};

/// Undirected graph on ids `0..n`; slot `i` is id `i`.
pub fn build_test_graph(n: u64, edges: &[(u64, u64)]) -> GraphProjection {
    let mut builder = ProjectionBuilder::undirected();
    for id in 0..n {
        builder.add_node(id);
    }
    for &(src, dst) in edges {
        builder.add_edge(src, dst);
    }
    builder.build().expect("test graph should build")
}

pub fn build_directed_test_graph(n: u64, edges: &[(u64, u64)]) -> GraphProjection {
    let mut builder = ProjectionBuilder::directed();
    for id in 0..n {
        builder.add_node(id);
    }
    for &(src, dst) in edges {
        builder.add_edge(src, dst);
    }
    builder.build().expect("test graph should build")
}

pub fn build_weighted_test_graph(n: u64, edges: &[(u64, u64, f64)]) -> GraphProjection {
    let mut builder = ProjectionBuilder::undirected().weighted(true);
    for id in 0..n {
        builder.add_node(id);
    }
    for &(src, dst, w) in edges {
        builder.add_weighted_edge(src, dst, w);
    }
    builder.build().expect("test graph should build")
}
