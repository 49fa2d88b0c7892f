// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Positional outlet bitmask used by the switching endpoints.

use std::fmt;

use crate::types::OutletIndex;

/// Fixed-width string of `0`/`1`, one character per outlet.
///
/// Character `i` addresses the outlet at index `i`. The width always equals
/// the outlet count of the unit the mask is sent to.
///
/// # Examples
///
/// ```
/// use serverlink_pdu::types::{Bitmask, OutletIndex};
///
/// let mask = Bitmask::single(8, OutletIndex::new(6).unwrap());
/// assert_eq!(mask.to_string(), "00000010");
///
/// assert_eq!(Bitmask::all(4).to_string(), "1111");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitmask(Vec<bool>);

impl Bitmask {
    /// Creates a mask with every bit cleared.
    #[must_use]
    pub fn none(width: usize) -> Self {
        Self(vec![false; width])
    }

    /// Creates a mask with every bit set.
    #[must_use]
    pub fn all(width: usize) -> Self {
        Self(vec![true; width])
    }

    /// Creates a mask with only `index` set.
    ///
    /// An index outside the width yields an all-clear mask.
    #[must_use]
    pub fn single(width: usize, index: OutletIndex) -> Self {
        let mut mask = Self::none(width);
        if let Some(bit) = mask.0.get_mut(index.value()) {
            *bit = true;
        }
        mask
    }

    /// Returns the width of the mask.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the mask has zero width.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|bit| **bit).count()
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.count_ones() == 0
    }

    /// Returns whether the bit at `index` is set.
    #[must_use]
    pub fn is_set(&self, index: OutletIndex) -> bool {
        self.0.get(index.value()).copied().unwrap_or(false)
    }
}

impl fmt::Display for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> OutletIndex {
        OutletIndex::new(i).unwrap()
    }

    #[test]
    fn single_sets_exactly_one_bit() {
        for i in 0..8 {
            let mask = Bitmask::single(8, idx(i));
            assert_eq!(mask.len(), 8);
            assert_eq!(mask.count_ones(), 1);
            assert!(mask.is_set(idx(i)));
        }
    }

    #[test]
    fn single_outside_width_is_clear() {
        let mask = Bitmask::single(8, idx(12));
        assert!(mask.is_clear());
        assert_eq!(mask.to_string(), "00000000");
    }

    #[test]
    fn all_and_none() {
        assert_eq!(Bitmask::all(8).to_string(), "11111111");
        assert_eq!(Bitmask::none(16).to_string(), "0".repeat(16));
        assert!(Bitmask::none(0).is_empty());
    }
}
