// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Centrality Algorithm Engine
//!
//! Node-level centrality measures computed on an immutable `GraphProjection`.
//!
//! # Architecture
//!
//! - **KCore**: exact core decomposition. Runs the parallel ParK peeling by
//!   default, or a sequential bucket priority queue when a deterministic node
//!   order is requested.
//!
//! - **ApproxBetweenness**: sampled betweenness. Draws random node pairs,
//!   walks one shortest path backwards per pair and accumulates scores in
//!   per-worker buffers.
//!
//! # Example
//!
//! ```ignore
//! use uni_centrality::{Algorithm, Centrality, KCore, ProjectionBuilder};
//!
//! let mut builder = ProjectionBuilder::undirected();
//! builder.add_edge(1, 2).add_edge(2, 3).add_edge(3, 1);
//! let projection = builder.build()?;
//!
//! let result = KCore::run(&projection, Default::default())?;
//! assert_eq!(result.max_core_number(), 2);
//! ```

mod id_map;
pub mod projection;
pub mod structures;

pub mod algorithms;

pub use id_map::IdMap;
pub use projection::{GraphProjection, ProjectionBuilder};
pub use structures::{Cover, Partition};

#[cfg(test)]
pub mod test_utils;
