// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod algo;
pub mod error;

pub use algo::algorithms::{
    Algorithm, ApproxBetweenness, ApproxBetweennessConfig, ApproxBetweennessResult, Centrality,
    KCore, KCoreConfig, KCoreResult, KCoreStrategy,
};
pub use algo::projection::{GraphProjection, ProjectionBuilder};
pub use algo::structures::{Cover, Partition};
pub use error::{AlgoError, Result};
