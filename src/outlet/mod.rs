// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet layout of a unit: how many outlets it has and what they are called.
//!
//! The layout is re-read on every poll cycle and frozen into an
//! [`OutletMap`]. Control commands are encoded against a map, never against
//! live device text, so a command always targets the layout the caller last
//! saw.

mod count;
mod names;

pub use count::{DEFAULT_OUTLET_COUNT, LOOP_START, resolve_outlet_count};
pub use names::{
    NAMES_PER_ROW, OutletNames, ROW_COUNT, default_name, format_name, outlet_index,
    resolve_outlet_names,
};

use crate::types::OutletIndex;

/// Frozen outlet layout from one poll cycle.
///
/// Only the first `outlet_count` name slots are active. The generation
/// number increases each time the owning device stores a new map.
///
/// # Examples
///
/// ```
/// use serverlink_pdu::outlet::{OutletMap, OutletNames};
///
/// let map = OutletMap::new(8, OutletNames::defaults());
/// assert_eq!(map.find("C: Outlet 3").unwrap().value(), 2);
/// // Slot 9 exists on the naming page but not on an 8-outlet unit
/// assert!(map.find("J: Outlet 10").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletMap {
    generation: u64,
    outlet_count: usize,
    names: OutletNames,
}

impl OutletMap {
    /// Creates a map for `outlet_count` outlets, clamped to 24.
    #[must_use]
    pub fn new(outlet_count: usize, names: OutletNames) -> Self {
        Self {
            generation: 0,
            outlet_count: outlet_count.min(OutletIndex::MAX),
            names,
        }
    }

    /// Returns the map with a generation number attached.
    #[must_use]
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Returns the generation number.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the number of active outlets.
    #[must_use]
    pub fn outlet_count(&self) -> usize {
        self.outlet_count
    }

    /// Returns the name of an active outlet.
    #[must_use]
    pub fn name(&self, index: OutletIndex) -> Option<&str> {
        (index.value() < self.outlet_count).then(|| self.names.get(index))
    }

    /// Iterates over the active outlets in index order.
    pub fn outlets(&self) -> impl Iterator<Item = (OutletIndex, &str)> {
        self.names.iter().take(self.outlet_count)
    }

    /// Finds the active outlet with exactly this name.
    ///
    /// Names carry their panel letter, so two active outlets never share a
    /// name; the scan still stops at the lowest matching index.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<OutletIndex> {
        self.outlets()
            .find(|(_, candidate)| *candidate == name)
            .map(|(index, _)| index)
    }
}

impl Default for OutletMap {
    fn default() -> Self {
        Self::new(DEFAULT_OUTLET_COUNT, OutletNames::defaults())
    }
}
