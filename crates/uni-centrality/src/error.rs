// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AlgoError {
    /// Core decomposition is undefined on graphs with self-loops.
    #[error("Graph contains a self-loop at node {node}; core decomposition requires a simple graph")]
    SelfLoop { node: u64 },

    #[error("Node order was not stored; enable `store_node_order` before running")]
    NodeOrderNotStored,

    #[error("Invalid value {value} for parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Edge weights must be finite and strictly positive.
    #[error("Invalid weight {weight} on edge {src} -> {dst}")]
    InvalidWeight { src: u64, dst: u64, weight: f64 },

    #[error("Node {id} not found in projection")]
    NodeNotFound { id: u64 },
}

pub type Result<T> = std::result::Result<T, AlgoError>;
