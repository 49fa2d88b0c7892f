// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field descriptors for scraping values out of PDU pages.
//!
//! The unit's pages are hand-written HTML and loosely formed XML, so each
//! value is located by a label pattern followed by a lazy gap and a single
//! capture group. A miss is not an error: callers get `None` (or an empty
//! string through [`FieldDescriptor::extract`]) and decide whether the
//! absence matters.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// A named pattern with one capture group and a post-processing step.
///
/// # Examples
///
/// ```
/// use serverlink_pdu::parse::MAC_ADDRESS;
///
/// let page = "<td><font>MAC Address</font></td>\n<td><font>00:06:18:75:C9:CA</font></td>";
/// assert_eq!(MAC_ADDRESS.find(page).as_deref(), Some("00:06:18:75:C9:CA"));
/// assert_eq!(MAC_ADDRESS.extract("no mac here"), "");
/// ```
pub struct FieldDescriptor {
    name: &'static str,
    pattern: &'static str,
    post: fn(&str) -> String,
    compiled: OnceLock<Regex>,
}

impl FieldDescriptor {
    /// Creates a descriptor. The pattern must contain one capture group.
    #[must_use]
    pub const fn new(name: &'static str, pattern: &'static str, post: fn(&str) -> String) -> Self {
        Self {
            name,
            pattern,
            post,
            compiled: OnceLock::new(),
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    fn regex(&self) -> &Regex {
        self.compiled.get_or_init(|| {
            // Patterns are literals in this module and covered by tests
            Regex::new(self.pattern).expect("field pattern must compile")
        })
    }

    /// Returns the post-processed first capture, or `None` if nothing matched.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<String> {
        let captured = self.regex().captures(text)?.get(1)?;
        Some((self.post)(captured.as_str()))
    }

    /// Returns the post-processed first capture, or an empty string.
    #[must_use]
    pub fn extract(&self, text: &str) -> String {
        self.find(text).unwrap_or_default()
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

fn trimmed(raw: &str) -> String {
    raw.trim().to_string()
}

fn verbatim(raw: &str) -> String {
    raw.to_string()
}

/// Firmware version from `/system.htm`.
///
/// The gap after the label only crosses text and `td`/`font` tags, so an
/// empty value cell never picks up the next row.
pub static FIRMWARE_VERSION: FieldDescriptor = FieldDescriptor::new(
    "FirmwareVersion",
    r"Firmware\s+Version(?:[^<]|</?(?i:td|font)\b[^>]*>)*?\s*([\w.\-]+)\s*</font>",
    trimmed,
);

/// MAC address from `/system.htm`, six colon-separated hex octets.
pub static MAC_ADDRESS: FieldDescriptor = FieldDescriptor::new(
    "MacAddress",
    r"MAC\s+Address[\s\S]*?((?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2})",
    verbatim,
);

/// Comma-separated numeric block from `/status.xml`.
pub static STATUS_BLOCK: FieldDescriptor =
    FieldDescriptor::new("pot0", r"<pot0>([^<]*)</pot0>", trimmed);

/// Upper bound of the outlet control loop in `/outlet.htm`.
pub static OUTLET_LOOP_BOUND: FieldDescriptor = FieldDescriptor::new(
    "OutletLoopBound",
    r"for\s*\(\s*i\s*=\s*10\s*;\s*i\s*<\s*(\d+)\s*;\s*i\s*\+\+\s*\)",
    verbatim,
);

/// Outlet name groups from `/Getname.xml`, one tag per physical row.
pub static NAME_ROWS: [FieldDescriptor; 8] = [
    FieldDescriptor::new("na0", r"<na0>([^<]+)</na0>", verbatim),
    FieldDescriptor::new("na1", r"<na1>([^<]+)</na1>", verbatim),
    FieldDescriptor::new("na2", r"<na2>([^<]+)</na2>", verbatim),
    FieldDescriptor::new("na3", r"<na3>([^<]+)</na3>", verbatim),
    FieldDescriptor::new("na4", r"<na4>([^<]+)</na4>", verbatim),
    FieldDescriptor::new("na5", r"<na5>([^<]+)</na5>", verbatim),
    FieldDescriptor::new("na6", r"<na6>([^<]+)</na6>", verbatim),
    FieldDescriptor::new("na7", r"<na7>([^<]+)</na7>", verbatim),
];
