// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Graph Projection - Dense CSR representation for algorithm execution.
//!
//! A `GraphProjection` is a materialized, algorithm-optimized view of a graph.
//! It provides:
//! - Dense node indexing (0..V) for efficient array-based state
//! - CSR format for cache-friendly neighbor iteration
//! - Reverse edges for directed graphs
//! - Optional edge weights for weighted algorithms
//!
//! Slots of removed nodes stay allocated, so `upper_node_id_bound()` can be
//! larger than `node_count()`. Removed slots have no edges and are skipped by
//! `nodes()`.

use crate::algo::IdMap;
use crate::error::{AlgoError, Result};
use rand::Rng;
use std::borrow::Cow;

/// Edge list for CSR construction: (source_slot, destination_slot, weight) triples.
type WeightedEdgeList = Vec<(u32, u32, f64)>;

/// Configuration for building a graph projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionConfig {
    /// Whether edges are directed
    pub directed: bool,
    /// Whether edge weights are kept (unweighted edges count as 1.0)
    pub weighted: bool,
}

/// Dense CSR representation optimized for algorithm execution.
#[derive(Debug)]
pub struct GraphProjection {
    /// Number of slots, including removed ones
    pub(crate) vertex_count: usize,
    pub(crate) directed: bool,

    /// Outbound edges: CSR format. Undirected edges appear in both directions.
    pub(crate) out_offsets: Vec<u32>, // [V+1] node slot -> edge start
    pub(crate) out_neighbors: Vec<u32>, // [E] neighbor slots, sorted per node

    /// Inbound edges: CSR format (directed projections only)
    pub(crate) in_offsets: Vec<u32>, // [V+1]
    pub(crate) in_neighbors: Vec<u32>, // [E]

    /// Optional edge weights, parallel to `out_neighbors`
    pub(crate) out_weights: Option<Vec<f64>>,

    /// Slot liveness and the ascending list of live slots
    pub(crate) present: Vec<bool>,
    pub(crate) nodes: Vec<u32>,

    /// Identity mapping
    pub(crate) id_map: IdMap,
}

impl GraphProjection {
    /// Exclusive upper bound on node slots.
    #[inline]
    pub fn upper_node_id_bound(&self) -> usize {
        self.vertex_count
    }

    /// Number of live nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn has_node(&self, slot: u32) -> bool {
        self.present.get(slot as usize).copied().unwrap_or(false)
    }

    /// Live node slots in ascending order.
    #[inline]
    pub fn nodes(&self) -> &[u32] {
        &self.nodes
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    pub fn is_weighted(&self) -> bool {
        self.out_weights.is_some()
    }

    /// Outbound neighbors of a node (by slot). For undirected projections
    /// these are all neighbors.
    #[inline]
    pub fn neighbors(&self, slot: u32) -> &[u32] {
        let start = self.out_offsets[slot as usize] as usize;
        let end = self.out_offsets[slot as usize + 1] as usize;
        &self.out_neighbors[start..end]
    }

    /// Outbound degree of a node.
    #[inline]
    pub fn degree(&self, slot: u32) -> u32 {
        self.out_offsets[slot as usize + 1] - self.out_offsets[slot as usize]
    }

    /// Inbound neighbors of a node. Same as `neighbors` when undirected.
    #[inline]
    pub fn in_neighbors(&self, slot: u32) -> &[u32] {
        if !self.directed {
            return self.neighbors(slot);
        }
        let start = self.in_offsets[slot as usize] as usize;
        let end = self.in_offsets[slot as usize + 1] as usize;
        &self.in_neighbors[start..end]
    }

    /// Weights of the outbound edges, parallel to `neighbors(slot)`.
    #[inline]
    pub fn out_weights(&self, slot: u32) -> Option<&[f64]> {
        let start = self.out_offsets[slot as usize] as usize;
        let end = self.out_offsets[slot as usize + 1] as usize;
        self.out_weights.as_ref().map(|w| &w[start..end])
    }

    /// Outbound neighbors paired with their edge weight (1.0 when unweighted).
    pub fn weighted_neighbors(&self, slot: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let weights = self.out_weights(slot);
        self.neighbors(slot)
            .iter()
            .enumerate()
            .map(move |(i, &v)| (v, weights.map_or(1.0, |w| w[i])))
    }

    /// Weight of edge `src -> dst`, or `None` if there is no such edge.
    pub fn weight(&self, src: u32, dst: u32) -> Option<f64> {
        let idx = self.neighbors(src).binary_search(&dst).ok()?;
        Some(self.out_weights(src).map_or(1.0, |w| w[idx]))
    }

    /// Number of nodes carrying an edge to themselves.
    pub fn number_of_self_loops(&self) -> usize {
        self.nodes
            .iter()
            .filter(|&&u| self.neighbors(u).binary_search(&u).is_ok())
            .count()
    }

    /// First node (in slot order) with a self-loop.
    pub fn first_self_loop(&self) -> Option<u32> {
        self.nodes
            .iter()
            .copied()
            .find(|&u| self.neighbors(u).binary_search(&u).is_ok())
    }

    /// Neighborhoods with edge direction ignored.
    ///
    /// Borrows the outbound CSR for undirected projections; directed ones get
    /// the deduplicated union of in- and out-neighbors.
    pub fn undirected_adjacency(&self) -> Adjacency<'_> {
        if !self.directed {
            return Adjacency {
                offsets: Cow::Borrowed(&self.out_offsets),
                neighbors: Cow::Borrowed(&self.out_neighbors),
            };
        }

        let mut offsets = Vec::with_capacity(self.vertex_count + 1);
        let mut neighbors = Vec::with_capacity(self.out_neighbors.len() * 2);
        offsets.push(0u32);
        for u in 0..self.vertex_count as u32 {
            let start = neighbors.len();
            neighbors.extend_from_slice(self.neighbors(u));
            neighbors.extend_from_slice(self.in_neighbors(u));
            neighbors[start..].sort_unstable();
            let mut unique = start;
            for i in start..neighbors.len() {
                if i == start || neighbors[i] != neighbors[unique - 1] {
                    neighbors[unique] = neighbors[i];
                    unique += 1;
                }
            }
            neighbors.truncate(unique);
            offsets.push(neighbors.len() as u32);
        }

        Adjacency {
            offsets: Cow::Owned(offsets),
            neighbors: Cow::Owned(neighbors),
        }
    }

    /// Uniformly random live node, `None` on an empty projection.
    pub fn random_node<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<u32> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(self.nodes[rng.gen_range(0..self.nodes.len())])
    }

    /// Map slot back to the caller's id.
    #[inline]
    pub fn to_external(&self, slot: u32) -> u64 {
        self.id_map.to_external_unchecked(slot)
    }

    /// Map a caller id to its slot.
    #[inline]
    pub fn to_slot(&self, id: u64) -> Option<u32> {
        self.id_map.to_slot(id).filter(|&s| self.has_node(s))
    }
}

/// CSR neighborhoods, either borrowed from a projection or freshly merged.
#[derive(Debug, Clone)]
pub struct Adjacency<'a> {
    offsets: Cow<'a, [u32]>,
    neighbors: Cow<'a, [u32]>,
}

impl Adjacency<'_> {
    #[inline]
    pub fn neighbors(&self, slot: u32) -> &[u32] {
        let start = self.offsets[slot as usize] as usize;
        let end = self.offsets[slot as usize + 1] as usize;
        &self.neighbors[start..end]
    }

    #[inline]
    pub fn degree(&self, slot: u32) -> u32 {
        self.offsets[slot as usize + 1] - self.offsets[slot as usize]
    }
}

/// Builder for constructing a `GraphProjection` from caller node ids.
#[derive(Debug, Default)]
pub struct ProjectionBuilder {
    config: ProjectionConfig,
    id_map: IdMap,
    edges: WeightedEdgeList,
    removed: Vec<u32>,
}

impl ProjectionBuilder {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn undirected() -> Self {
        Self::default()
    }

    pub fn directed() -> Self {
        Self::new(ProjectionConfig {
            directed: true,
            weighted: false,
        })
    }

    /// Keep edge weights in the projection.
    pub fn weighted(mut self, enabled: bool) -> Self {
        self.config.weighted = enabled;
        self
    }

    /// Register a node, which may stay isolated.
    pub fn add_node(&mut self, id: u64) -> &mut Self {
        self.id_map.insert(id);
        self
    }

    /// Add an edge of weight 1.0, registering both endpoints.
    pub fn add_edge(&mut self, src: u64, dst: u64) -> &mut Self {
        self.add_weighted_edge(src, dst, 1.0)
    }

    pub fn add_weighted_edge(&mut self, src: u64, dst: u64, weight: f64) -> &mut Self {
        let u = self.id_map.insert(src);
        let v = self.id_map.insert(dst);
        self.edges.push((u, v, weight));
        self
    }

    /// Remove a registered node together with its edges. The slot stays
    /// allocated but is no longer live.
    pub fn remove_node(&mut self, id: u64) -> Result<&mut Self> {
        let slot = self
            .id_map
            .to_slot(id)
            .ok_or(AlgoError::NodeNotFound { id })?;
        self.removed.push(slot);
        Ok(self)
    }

    /// Build the projection.
    pub fn build(self) -> Result<GraphProjection> {
        let vertex_count = self.id_map.len();

        let mut present = vec![true; vertex_count];
        for &slot in &self.removed {
            present[slot as usize] = false;
        }

        let mut out_edges = Vec::with_capacity(self.edges.len() * 2);
        for &(u, v, w) in &self.edges {
            if !present[u as usize] || !present[v as usize] {
                continue;
            }
            if self.config.weighted && !(w.is_finite() && w > 0.0) {
                return Err(AlgoError::InvalidWeight {
                    src: self.id_map.to_external_unchecked(u),
                    dst: self.id_map.to_external_unchecked(v),
                    weight: w,
                });
            }
            out_edges.push((u, v, w));
            if !self.config.directed && u != v {
                out_edges.push((v, u, w));
            }
        }
        dedup_edges(&mut out_edges);

        let (in_offsets, in_neighbors) = if self.config.directed {
            let mut in_edges: WeightedEdgeList =
                out_edges.iter().map(|&(u, v, w)| (v, u, w)).collect();
            dedup_edges(&mut in_edges);
            let (offsets, neighbors, _) = build_csr(vertex_count, &in_edges, false);
            (offsets, neighbors)
        } else {
            (vec![0; vertex_count + 1], Vec::new())
        };

        let (out_offsets, out_neighbors, out_weights) =
            build_csr(vertex_count, &out_edges, self.config.weighted);

        let nodes = (0..vertex_count as u32)
            .filter(|&u| present[u as usize])
            .collect();

        Ok(GraphProjection {
            vertex_count,
            directed: self.config.directed,
            out_offsets,
            out_neighbors,
            in_offsets,
            in_neighbors,
            out_weights,
            present,
            nodes,
            id_map: self.id_map,
        })
    }
}

/// Sort by (src, dst, weight) and collapse parallel edges, keeping the lightest.
fn dedup_edges(edges: &mut WeightedEdgeList) {
    edges.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)).then(a.2.total_cmp(&b.2)));
    edges.dedup_by(|later, kept| later.0 == kept.0 && later.1 == kept.1);
}

/// Build CSR from edge list.
fn build_csr(
    vertex_count: usize,
    edges: &[(u32, u32, f64)],
    include_weights: bool,
) -> (Vec<u32>, Vec<u32>, Option<Vec<f64>>) {
    if vertex_count == 0 {
        return (vec![0], Vec::new(), include_weights.then(Vec::new));
    }

    // Count degrees
    let mut degrees = vec![0u32; vertex_count];
    for &(src, _, _) in edges {
        degrees[src as usize] += 1;
    }

    // Build offsets (prefix sum)
    let mut offsets = vec![0u32; vertex_count + 1];
    for i in 0..vertex_count {
        offsets[i + 1] = offsets[i] + degrees[i];
    }

    // Fill neighbors
    let mut neighbors = vec![0u32; edges.len()];
    let mut weights = if include_weights {
        Some(vec![0.0; edges.len()])
    } else {
        None
    };
    let mut current = offsets.clone();

    for &(src, dst, w) in edges {
        let idx = current[src as usize] as usize;
        neighbors[idx] = dst;
        if let Some(ws) = &mut weights {
            ws[idx] = w;
        }
        current[src as usize] += 1;
    }

    (offsets, neighbors, weights)
}
