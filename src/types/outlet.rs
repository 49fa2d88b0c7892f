// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet addressing and power state.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValueError;

/// Represents the power state of a single outlet.
///
/// The PDU reports each outlet as a numeric code. `0` is off; any other code
/// is treated as on, including the codes above `1` the unit emits while an
/// outlet is switching.
///
/// # Examples
///
/// ```
/// use serverlink_pdu::types::OutletState;
///
/// assert_eq!(OutletState::from_code(0), OutletState::Off);
/// assert_eq!(OutletState::from_code(1), OutletState::On);
/// assert_eq!(OutletState::from_code(2), OutletState::On);
///
/// assert_eq!("true".parse::<OutletState>().unwrap(), OutletState::On);
/// assert_eq!(OutletState::Off.as_control_value(), "0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutletState {
    /// Outlet is off.
    Off,
    /// Outlet is on.
    On,
}

impl OutletState {
    /// Maps a raw device code to a state.
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        if code == 0 { Self::Off } else { Self::On }
    }

    /// Returns the display string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns the value carried by a switch control (`"1"` or `"0"`).
    #[must_use]
    pub const fn as_control_value(&self) -> &'static str {
        match self {
            Self::Off => "0",
            Self::On => "1",
        }
    }
}

impl fmt::Display for OutletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutletState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" | "false" => Ok(Self::Off),
            "1" | "true" => Ok(Self::On),
            _ => Err(ValueError::InvalidControlValue(s.to_string())),
        }
    }
}

impl From<bool> for OutletState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

/// Zero-based position of an outlet on the unit.
///
/// The unit labels its sockets with letters, so the index also carries the
/// panel letter (`A` for index 0) and the one-based outlet number.
///
/// # Examples
///
/// ```
/// use serverlink_pdu::types::OutletIndex;
///
/// let g = OutletIndex::new(6).unwrap();
/// assert_eq!(g.letter(), 'G');
/// assert_eq!(g.number(), 7);
///
/// assert!(OutletIndex::new(24).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OutletIndex(usize);

impl OutletIndex {
    /// Number of outlet slots the naming page can describe (8 rows of 3).
    pub const MAX: usize = 24;

    /// Creates a new outlet index.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `index` is not below [`Self::MAX`].
    pub fn new(index: usize) -> Result<Self, ValueError> {
        if index >= Self::MAX {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: Self::MAX - 1,
                actual: index,
            });
        }
        Ok(Self(index))
    }

    /// Returns the zero-based index.
    #[must_use]
    pub const fn value(&self) -> usize {
        self.0
    }

    /// Returns the one-based outlet number.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.0 + 1
    }

    /// Returns the panel letter of the outlet.
    #[must_use]
    pub fn letter(&self) -> char {
        // Safe: index is below 24, so the offset fits in u8
        #[allow(clippy::cast_possible_truncation)]
        let offset = self.0 as u8;
        char::from(b'A' + offset)
    }

    /// Iterates over every index below `count`, clamped to [`Self::MAX`].
    pub fn range(count: usize) -> impl Iterator<Item = Self> {
        (0..count.min(Self::MAX)).map(Self)
    }
}

impl fmt::Display for OutletIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
