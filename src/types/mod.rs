// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for PDU outlets.
//!
//! - [`OutletIndex`]: zero-based outlet position with its panel letter
//! - [`OutletState`]: on/off state decoded from device codes or control values
//! - [`Bitmask`]: positional `0`/`1` string sent to the switching endpoints

mod bitmask;
mod outlet;

pub use bitmask::Bitmask;
pub use outlet::{OutletIndex, OutletState};
