// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scraping of the PDU's HTML and XML pages.
//!
//! | Page | Parsed into | Missing data |
//! |------|-------------|--------------|
//! | `/system.htm` | [`SystemInfo`] | empty strings |
//! | `/status.xml` | [`StatusBlock`] | error |
//! | `/outlet.htm` | [`OUTLET_LOOP_BOUND`] capture | `None` |
//! | `/Getname.xml` | [`NAME_ROWS`] captures | `None` per row |

mod extract;
mod status;
mod system;

pub use extract::{
    FIRMWARE_VERSION, FieldDescriptor, MAC_ADDRESS, NAME_ROWS, OUTLET_LOOP_BOUND, STATUS_BLOCK,
};
pub use status::StatusBlock;
pub use system::SystemInfo;
