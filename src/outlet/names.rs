// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet name resolution from `/Getname.xml`.
//!
//! The naming document has one tag per physical row (`<na0>` to `<na7>`),
//! each holding three comma-separated names. The unit numbers its outlets
//! down the columns, so the name in column `k` of row `i` belongs to outlet
//! `i + k * 8`, not to outlet `i * 3 + k`.

use crate::parse::NAME_ROWS;
use crate::resolution::Resolution;
use crate::types::OutletIndex;

/// Number of rows on the naming page.
pub const ROW_COUNT: usize = 8;

/// Number of names in each row.
pub const NAMES_PER_ROW: usize = 3;

/// Maps a (row, column) position on the naming page to an outlet index.
///
/// Returns `None` for positions outside the 8 x 3 page.
///
/// # Examples
///
/// ```
/// use serverlink_pdu::outlet::outlet_index;
///
/// assert_eq!(outlet_index(0, 0).unwrap().value(), 0);
/// assert_eq!(outlet_index(6, 0).unwrap().value(), 6);
/// assert_eq!(outlet_index(1, 1).unwrap().value(), 9);
/// assert_eq!(outlet_index(7, 2).unwrap().value(), 23);
/// assert!(outlet_index(0, 3).is_none());
/// ```
#[must_use]
pub fn outlet_index(row: usize, column: usize) -> Option<OutletIndex> {
    if row >= ROW_COUNT || column >= NAMES_PER_ROW {
        return None;
    }
    OutletIndex::new(row + column * ROW_COUNT).ok()
}

/// Returns the name used when the device gave no usable name.
///
/// ```
/// use serverlink_pdu::outlet::default_name;
/// use serverlink_pdu::types::OutletIndex;
///
/// assert_eq!(default_name(OutletIndex::new(2).unwrap()), "C: Outlet 3");
/// ```
#[must_use]
pub fn default_name(index: OutletIndex) -> String {
    format!("{}: Outlet {}", index.letter(), index.number())
}

/// Formats a raw device name for display.
///
/// Each word is capitalized and the panel letter is prepended, so names
/// sort in panel order. A blank name falls back to [`default_name`].
///
/// ```
/// use serverlink_pdu::outlet::format_name;
/// use serverlink_pdu::types::OutletIndex;
///
/// let g = OutletIndex::new(6).unwrap();
/// assert_eq!(format_name("  AMP ", g), "G: Amp");
/// assert_eq!(format_name("uc  FLEX", OutletIndex::new(0).unwrap()), "A: Uc Flex");
/// assert_eq!(format_name("", g), "G: Outlet 7");
/// ```
#[must_use]
pub fn format_name(raw: &str, index: OutletIndex) -> String {
    let words: Vec<String> = raw.split_whitespace().map(capitalize).collect();
    if words.is_empty() {
        return default_name(index);
    }
    format!("{}: {}", index.letter(), words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Display names for every outlet slot the naming page can describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletNames {
    names: Vec<String>,
}

impl OutletNames {
    /// Creates the default name set.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            names: OutletIndex::range(OutletIndex::MAX).map(default_name).collect(),
        }
    }

    /// Returns the name of an outlet.
    #[must_use]
    pub fn get(&self, index: OutletIndex) -> &str {
        &self.names[index.value()]
    }

    /// Iterates over all slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (OutletIndex, &str)> {
        OutletIndex::range(OutletIndex::MAX).zip(self.names.iter().map(String::as_str))
    }

    fn set(&mut self, index: OutletIndex, name: String) {
        self.names[index.value()] = name;
    }
}

impl Default for OutletNames {
    fn default() -> Self {
        Self::defaults()
    }
}

fn split_row(raw: Option<String>) -> Result<Vec<String>, String> {
    let raw = raw.ok_or_else(|| "tag missing".to_string())?;
    let parts: Vec<String> = raw.split(',').map(str::to_string).collect();
    if parts.len() < NAMES_PER_ROW {
        return Err(format!(
            "expected {NAMES_PER_ROW} names, found {}",
            parts.len()
        ));
    }
    if let Some(column) = parts
        .iter()
        .take(NAMES_PER_ROW)
        .position(|part| part.trim().is_empty())
    {
        return Err(format!("name {} is blank", column + 1));
    }
    Ok(parts)
}

/// Resolves outlet names from the naming document.
///
/// A row that is missing, holds fewer than three names, or has a blank name
/// among its first three leaves its three outlets on their default names; the other rows are unaffected. The
/// result is [`Resolution::Defaulted`] when any row fell back.
#[must_use]
pub fn resolve_outlet_names(document: &str) -> Resolution<OutletNames> {
    let mut names = OutletNames::defaults();
    let mut failures = Vec::new();

    for (row, descriptor) in NAME_ROWS.iter().enumerate() {
        match split_row(descriptor.find(document)) {
            Ok(parts) => {
                for (column, raw) in parts.iter().take(NAMES_PER_ROW).enumerate() {
                    if let Some(index) = outlet_index(row, column) {
                        names.set(index, format_name(raw, index));
                    }
                }
            }
            Err(reason) => {
                tracing::debug!(row, reason = %reason, "Using default names for row");
                failures.push(format!("{}: {reason}", descriptor.name()));
            }
        }
    }

    if failures.is_empty() {
        Resolution::Resolved(names)
    } else {
        Resolution::Defaulted {
            value: names,
            reason: failures.join("; "),
        }
    }
}
