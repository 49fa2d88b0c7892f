// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serverlink PDU - monitor and switch Serverlink networked power
//! distribution units.
//!
//! The unit has no machine API. Everything is scraped from its embedded web
//! pages and XML documents, and outlets are switched with positional bitmask
//! commands.
//!
//! # Supported Features
//!
//! - **Outlet layout**: outlet count (up to 24) and per-outlet display names
//! - **System info**: firmware version, MAC address, total current draw
//! - **Outlet state**: on/off per outlet, with raw device codes kept
//! - **Control**: switch single outlets, or all outlets at once
//!
//! # Quick Start
//!
//! ```no_run
//! use serverlink_pdu::{ControlRequest, Pdu};
//!
//! #[tokio::main]
//! async fn main() -> serverlink_pdu::Result<()> {
//!     let pdu = Pdu::http("192.168.1.100")
//!         .with_credentials("snmp", "1234")
//!         .build()
//!         .await?;
//!
//!     let report = pdu.poll().await?;
//!     for (key, value) in &report.statistics {
//!         println!("{key} = {value}");
//!     }
//!
//!     pdu.apply_control(&ControlRequest::off("Outlets#G: Amp")).await?;
//!     pdu.control_property("Outlets#_All On", "1").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Degraded Reads
//!
//! Outlet count and outlet names fall back to defaults when the device
//! pages cannot be read; such results come back as
//! [`Resolution::Defaulted`] with a reason. A failed request or an unusable
//! status block aborts the poll cycle instead.

pub mod control;
mod device;
pub mod error;
pub mod outlet;
pub mod parse;
pub mod protocol;
mod resolution;
pub mod snapshot;
pub mod types;

pub use control::{ControlCommand, ControlRequest};
#[cfg(feature = "http")]
pub use device::HttpPduBuilder;
pub use device::Pdu;
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use outlet::OutletMap;
#[cfg(feature = "http")]
pub use protocol::HttpConfig;
pub use protocol::Transport;
pub use resolution::Resolution;
pub use snapshot::{Report, SystemSnapshot};
pub use types::{Bitmask, OutletIndex, OutletState};
