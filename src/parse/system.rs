// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System page parsing.

use serde::Serialize;

use super::extract::{FIRMWARE_VERSION, MAC_ADDRESS};

/// Identity fields scraped from `/system.htm`.
///
/// Both fields are empty strings when the page does not contain them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    /// Firmware version string, e.g. `s4.82-091012-1cb08s`.
    pub firmware_version: String,
    /// MAC address in colon notation.
    pub mac_address: String,
}

impl SystemInfo {
    /// Scrapes the system page.
    #[must_use]
    pub fn parse(page: &str) -> Self {
        let info = Self {
            firmware_version: FIRMWARE_VERSION.extract(page),
            mac_address: MAC_ADDRESS.extract(page),
        };
        if info.firmware_version.is_empty() {
            tracing::debug!("Firmware version not found on system page");
        }
        if info.mac_address.is_empty() {
            tracing::debug!("MAC address not found on system page");
        }
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_both_fields() {
        let page = r#"<tr><td><font>Firmware Version</font></td><td><font color="blue">v1.2-3</font></td></tr>
<tr><td><font>MAC Address</font></td><td><font>00:06:18:75:c9:ca</font></td></tr>"#;
        let info = SystemInfo::parse(page);
        assert_eq!(info.firmware_version, "v1.2-3");
        assert_eq!(info.mac_address, "00:06:18:75:c9:ca");
    }

    #[test]
    fn missing_fields_are_empty() {
        let info = SystemInfo::parse("<html>login required</html>");
        assert_eq!(info, SystemInfo::default());
    }
}
