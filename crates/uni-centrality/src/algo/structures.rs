// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Node groupings derived from per-node labels.

use std::ops::RangeInclusive;

/// Disjoint assignment of nodes to subsets.
///
/// Slots without a label (removed nodes) belong to no subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    labels: Vec<Option<u32>>,
    upper_subset_bound: u32,
}

impl Partition {
    pub fn from_labels(labels: Vec<Option<u32>>) -> Self {
        let upper_subset_bound = labels.iter().flatten().max().map_or(0, |&l| l + 1);
        Self {
            labels,
            upper_subset_bound,
        }
    }

    #[inline]
    pub fn subset_of(&self, node: u32) -> Option<u32> {
        self.labels.get(node as usize).copied().flatten()
    }

    /// Nodes carrying `subset` in ascending slot order.
    pub fn members(&self, subset: u32) -> Vec<u32> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == Some(subset))
            .map(|(u, _)| u as u32)
            .collect()
    }

    /// Exclusive upper bound on subset ids in use.
    #[inline]
    pub fn upper_subset_bound(&self) -> u32 {
        self.upper_subset_bound
    }

    /// Number of non-empty subsets.
    pub fn number_of_subsets(&self) -> usize {
        self.subset_sizes().iter().filter(|&&s| s > 0).count()
    }

    /// Size of every subset id below `upper_subset_bound()`.
    pub fn subset_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.upper_subset_bound as usize];
        for &l in self.labels.iter().flatten() {
            sizes[l as usize] += 1;
        }
        sizes
    }

    #[inline]
    pub fn number_of_elements(&self) -> usize {
        self.labels.len()
    }
}

/// Possibly overlapping subsets of nodes.
///
/// Core covers are nested: subset `k` holds every node of core number `>= k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    subsets: Vec<Vec<u32>>,
    number_of_elements: usize,
}

impl Cover {
    /// Nested cover from per-node levels: node `u` joins subsets `0..=level(u)`.
    pub fn nested_from_levels(levels: &[Option<u32>]) -> Self {
        let max_level = levels.iter().flatten().max().copied();
        let mut subsets = vec![Vec::new(); max_level.map_or(0, |m| m as usize + 1)];
        for (u, level) in levels.iter().enumerate() {
            if let Some(level) = *level {
                for subset in subsets.iter_mut().take(level as usize + 1) {
                    subset.push(u as u32);
                }
            }
        }
        Self {
            subsets,
            number_of_elements: levels.len(),
        }
    }

    /// Members of subset `id`, empty if the subset does not exist.
    pub fn members(&self, id: u32) -> &[u32] {
        self.subsets.get(id as usize).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, id: u32, node: u32) -> bool {
        self.members(id).binary_search(&node).is_ok()
    }

    /// Subsets that contain `node`; contiguous because the cover is nested.
    pub fn subsets_of(&self, node: u32) -> Option<RangeInclusive<u32>> {
        let top = (0..self.subsets.len() as u32)
            .rev()
            .find(|&k| self.contains(k, node))?;
        Some(0..=top)
    }

    #[inline]
    pub fn number_of_subsets(&self) -> usize {
        self.subsets.len()
    }

    #[inline]
    pub fn number_of_elements(&self) -> usize {
        self.number_of_elements
    }
}
