// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport used to reach the PDU's embedded web server.
//!
//! The parsing and encoding code never talks to the network directly. It
//! asks a [`Transport`] for page bodies and hands it command paths, which
//! keeps every cycle testable with canned page text.
//!
//! [`HttpClient`] is the production implementation, built from an
//! [`HttpConfig`].

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{Credentials, HttpClient, HttpConfig};

use crate::error::ProtocolError;

/// Paths served by the PDU.
pub mod paths {
    /// Control page whose script loop bound encodes the outlet count.
    pub const OUTLET_PAGE: &str = "/outlet.htm";
    /// System page with firmware version and MAC address.
    pub const SYSTEM_PAGE: &str = "/system.htm";
    /// XML document with the per-row outlet name groups.
    pub const NAMES_XML: &str = "/Getname.xml";
    /// XML document with the `<pot0>` status block.
    pub const STATUS_XML: &str = "/status.xml";
    /// Switches on every outlet whose bit is set.
    pub const ON_CGI: &str = "/ons.cgi";
    /// Switches off every outlet whose bit is set.
    pub const OFF_CGI: &str = "/offs.cgi";
}

/// Trait for transports that can exchange page text with the PDU.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Fetches a page with a GET request and returns its body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the device rejects it.
    async fn fetch(&self, path: &str) -> Result<String, ProtocolError>;

    /// Submits a POST request and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the device rejects it.
    async fn submit(&self, path: &str, body: &str) -> Result<String, ProtocolError>;
}
