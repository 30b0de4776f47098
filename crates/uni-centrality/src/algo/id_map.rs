// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Identity mapping between caller node ids and dense algorithm slots.
//!
//! Peeling and sampling keep their state in flat arrays indexed by slot
//! (0..V). Callers name nodes with arbitrary `u64` ids. This module provides
//! the bidirectional mapping between the two.

use fxhash::FxHashMap;

/// Bidirectional mapping between external node ids and dense slots.
///
/// Slots are handed out in insertion order.
///
/// # Example
///
/// ```ignore
/// let mut id_map = IdMap::new();
/// id_map.insert(100);  // slot 0
/// id_map.insert(7);    // slot 1
///
/// assert_eq!(id_map.to_slot(7), Some(1));
/// assert_eq!(id_map.to_external(0), Some(100));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdMap {
    /// Dense slot -> external id
    slot_to_id: Vec<u64>,
    /// External id -> dense slot
    id_to_slot: FxHashMap<u64, u32>,
}

impl IdMap {
    /// Create an empty ID map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an ID map with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slot_to_id: Vec::with_capacity(capacity),
            id_to_slot: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert an id and return its slot.
    ///
    /// If the id already exists, returns the existing slot.
    pub fn insert(&mut self, id: u64) -> u32 {
        if let Some(&slot) = self.id_to_slot.get(&id) {
            return slot;
        }

        let slot = self.slot_to_id.len() as u32;
        self.slot_to_id.push(id);
        self.id_to_slot.insert(id, slot);
        slot
    }

    #[inline]
    pub fn to_slot(&self, id: u64) -> Option<u32> {
        self.id_to_slot.get(&id).copied()
    }

    #[inline]
    pub fn to_external(&self, slot: u32) -> Option<u64> {
        self.slot_to_id.get(slot as usize).copied()
    }

    /// Get the external id for a slot (panics if out of bounds).
    #[inline]
    pub fn to_external_unchecked(&self, slot: u32) -> u64 {
        self.slot_to_id[slot as usize]
    }

    /// Number of mapped nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.slot_to_id.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot_to_id.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.id_to_slot.contains_key(&id)
    }

    /// Iterate over all (slot, id) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.slot_to_id
            .iter()
            .enumerate()
            .map(|(slot, &id)| (slot as u32, id))
    }
}

impl FromIterator<u64> for IdMap {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, upper) = iter.size_hint();
        let mut map = Self::with_capacity(upper.unwrap_or(lower));

        for id in iter {
            map.insert(id);
        }

        map
    }
}
