// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet count detection from `/outlet.htm`.
//!
//! The control page draws one button per outlet in a script loop starting at
//! element 10 (`for (i=10; i<18; i++)`), so the loop bound minus 10 is the
//! number of outlets on the unit.

use crate::parse::OUTLET_LOOP_BOUND;
use crate::resolution::Resolution;
use crate::types::OutletIndex;

/// Outlet count used when the control page cannot be read.
pub const DEFAULT_OUTLET_COUNT: usize = 8;

/// First element index of the outlet loop on the control page.
pub const LOOP_START: usize = 10;

/// Resolves the outlet count from the control page.
///
/// Never fails: a missing loop, an unparsable bound, or a count outside
/// `1..=24` yields [`DEFAULT_OUTLET_COUNT`] as a defaulted resolution.
///
/// # Examples
///
/// ```
/// use serverlink_pdu::outlet::resolve_outlet_count;
///
/// let page = "<script>for (i=10; i<26; i++) { row(i); }</script>";
/// assert_eq!(*resolve_outlet_count(page).value(), 16);
///
/// let broken = resolve_outlet_count("<html>404</html>");
/// assert!(broken.is_defaulted());
/// assert_eq!(*broken.value(), 8);
/// ```
#[must_use]
pub fn resolve_outlet_count(page: &str) -> Resolution<usize> {
    match parse_count(page) {
        Ok(count) => Resolution::Resolved(count),
        Err(reason) => {
            tracing::warn!(
                reason = %reason,
                default = DEFAULT_OUTLET_COUNT,
                "Could not read outlet count from control page, using default"
            );
            Resolution::Defaulted {
                value: DEFAULT_OUTLET_COUNT,
                reason,
            }
        }
    }
}

fn parse_count(page: &str) -> Result<usize, String> {
    let bound = OUTLET_LOOP_BOUND
        .find(page)
        .ok_or_else(|| "outlet loop not found".to_string())?;

    let bound: usize = bound
        .parse()
        .map_err(|e| format!("loop bound {bound:?} is not an integer: {e}"))?;

    let count = bound.saturating_sub(LOOP_START);
    if count == 0 || count > OutletIndex::MAX {
        return Err(format!(
            "loop bound {bound} gives {count} outlets, outside 1..={}",
            OutletIndex::MAX
        ));
    }
    Ok(count)
}
