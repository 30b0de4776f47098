// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Approximate Betweenness Centrality (Riondato & Kornaropoulos, 2014).
//!
//! Samples `r` random node pairs and, for each reachable pair, one shortest
//! path chosen uniformly among all shortest paths. Every interior node of a
//! sampled path gains `1/r`. With probability at least `1 - delta`, every
//! estimate is within `epsilon` of the node's normalized betweenness.
//!
//! `r` follows from a VC-dimension bound on the vertex diameter, so only an
//! estimate of the diameter is needed.

use crate::algo::GraphProjection;
use crate::algo::algorithms::diameter::{
    estimated_vertex_diameter, estimated_vertex_diameter_pedantic,
};
use crate::algo::algorithms::{Algorithm, Bfs, Centrality, Dijkstra, ShortestPaths};
use crate::error::{AlgoError, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Universal positive constant of the sample bound.
const SAMPLE_BOUND_CONSTANT: f64 = 0.5;

/// Smallest vertex diameter for which `ln(vd - 2)` is defined.
const MIN_VERTEX_DIAMETER: f64 = 3.0;

pub struct ApproxBetweenness;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApproxBetweennessConfig {
    /// Maximum additive error of each score, in (0, 1).
    pub epsilon: f64,
    /// Probability of exceeding `epsilon`, in (0, 1).
    pub delta: f64,
    /// 0 estimates the diameter exhaustively; otherwise BFS from this many
    /// random sources.
    pub diameter_samples: usize,
    /// Seed for reproducible runs; random when `None`.
    pub seed: Option<u64>,
}

impl Default for ApproxBetweennessConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            delta: 0.1,
            diameter_samples: 0,
            seed: None,
        }
    }
}

impl ApproxBetweennessConfig {
    pub fn validate(&self) -> Result<()> {
        check_open_unit("epsilon", self.epsilon)?;
        check_open_unit("delta", self.delta)
    }
}

fn check_open_unit(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(AlgoError::InvalidParameter {
            name,
            value,
            reason: "must lie strictly between 0 and 1",
        })
    }
}

#[derive(Debug, Clone)]
pub struct ApproxBetweennessResult {
    scores: Vec<f64>,
    samples: u64,
    vertex_diameter: f64,
}

impl ApproxBetweennessResult {
    /// Number of path samples drawn.
    #[inline]
    pub fn number_of_samples(&self) -> u64 {
        self.samples
    }

    /// Vertex diameter estimate the sample count was derived from.
    #[inline]
    pub fn estimated_vertex_diameter(&self) -> f64 {
        self.vertex_diameter
    }
}

impl Centrality for ApproxBetweennessResult {
    fn raw_scores(&self) -> &[f64] {
        &self.scores
    }

    /// A node gains at most `1/r` per sample.
    fn maximum(&self) -> f64 {
        1.0
    }
}

/// Number of samples for accuracy `epsilon` with confidence `1 - delta`.
///
/// `r = ceil(c / epsilon^2 * (floor(ln(vd - 2)) + 1 + ln(1 / delta)))` with
/// `c = 0.5`. Diameters below 3 are clamped to 3.
pub fn sample_count(epsilon: f64, delta: f64, vertex_diameter: f64) -> u64 {
    let vd = vertex_diameter.max(MIN_VERTEX_DIAMETER);
    let bound = (SAMPLE_BOUND_CONSTANT / (epsilon * epsilon))
        * ((vd - 2.0).ln().floor() + 1.0 + (1.0 / delta).ln());
    bound.ceil() as u64
}

impl Algorithm for ApproxBetweenness {
    type Config = ApproxBetweennessConfig;
    type Result = ApproxBetweennessResult;

    fn name() -> &'static str {
        "approxBetweenness"
    }

    #[instrument(skip(graph), fields(nodes = graph.node_count()))]
    fn run(graph: &GraphProjection, config: Self::Config) -> Result<Self::Result> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let vertex_diameter = if config.diameter_samples == 0 {
            info!("estimating vertex diameter pedantically");
            estimated_vertex_diameter_pedantic(graph)
        } else {
            info!("estimating vertex diameter roughly");
            estimated_vertex_diameter(graph, config.diameter_samples, &mut rng)
        };

        let samples = sample_count(config.epsilon, config.delta, vertex_diameter);
        info!(vertex_diameter, samples, "taking path samples");

        let n = graph.upper_node_id_bound();
        if graph.node_count() < 2 {
            return Ok(ApproxBetweennessResult {
                scores: vec![0.0; n],
                samples,
                vertex_diameter,
            });
        }

        let increment = 1.0 / samples as f64;

        // Each fold accumulator is private to one worker; buffers are summed
        // once all samples are done.
        let scores = (0..samples)
            .into_par_iter()
            .fold(
                || vec![0.0; n],
                |mut acc, i| {
                    let mut rng = StdRng::seed_from_u64(sample_seed(seed, i));
                    draw_sample(graph, &mut rng, increment, &mut acc);
                    acc
                },
            )
            .reduce(
                || vec![0.0; n],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b.iter()) {
                        *x += y;
                    }
                    a
                },
            );

        debug!("thread-local scores merged");

        Ok(ApproxBetweennessResult {
            scores,
            samples,
            vertex_diameter,
        })
    }
}

/// Per-sample seed: output `sample + 1` of a SplitMix64 stream started at `seed`.
#[inline]
fn sample_seed(seed: u64, sample: u64) -> u64 {
    let mut z = seed.wrapping_add(sample.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Draw one node pair and credit the interior of one shortest path between them.
fn draw_sample<R: Rng>(graph: &GraphProjection, rng: &mut R, increment: f64, acc: &mut [f64]) {
    let Some(u) = graph.random_node(rng) else {
        return;
    };
    let v = loop {
        match graph.random_node(rng) {
            Some(v) if v != u => break v,
            Some(_) => continue,
            None => return,
        }
    };

    if graph.is_weighted() {
        let mut sssp = Dijkstra::new(graph, u);
        sssp.run();
        accumulate_path(&sssp, v, rng, increment, acc);
    } else {
        let mut sssp = Bfs::new(graph, u);
        sssp.run();
        accumulate_path(&sssp, v, rng, increment, acc);
    }
}

/// Walk from `target` back to the source along the shortest-path DAG and add
/// `increment` to every interior node. Returns the number of nodes credited.
///
/// At node `t` the predecessor `z` is chosen with probability
/// `paths(z) / paths(t)`, which selects a uniformly random shortest path.
pub(crate) fn accumulate_path<S: ShortestPaths, R: Rng>(
    sssp: &S,
    target: u32,
    rng: &mut R,
    increment: f64,
    acc: &mut [f64],
) -> usize {
    let source = sssp.source();
    if sssp.number_of_paths(target) == 0 {
        return 0;
    }

    let mut credited = 0;
    let mut t = target;
    while t != source {
        let Some(z) = choose_predecessor(sssp, t, rng) else {
            break;
        };
        if z != source {
            acc[z as usize] += increment;
            credited += 1;
        }
        t = z;
    }
    credited
}

fn choose_predecessor<S: ShortestPaths, R: Rng>(sssp: &S, t: u32, rng: &mut R) -> Option<u32> {
    let preds = sssp.predecessors(t);
    match preds {
        [] => None,
        [z] => Some(*z),
        _ => {
            let weights = preds.iter().map(|&z| sssp.number_of_paths(z) as f64);
            let dist = WeightedIndex::new(weights).ok()?;
            Some(preds[dist.sample(rng)])
        }
    }
}
