// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outcome of a resolution step that may fall back to a policy value.
//!
//! Steps that cannot continue return `Err(Error)`. Steps that can continue
//! with a safe default return [`Resolution::Defaulted`], so callers can tell
//! a degraded-but-usable cycle from a clean one.

use std::fmt;

/// Value produced by a resolution step, with the reason if it was defaulted.
///
/// # Examples
///
/// ```
/// use serverlink_pdu::Resolution;
///
/// let clean = Resolution::Resolved(16);
/// assert!(!clean.is_defaulted());
///
/// let fallback = Resolution::Defaulted { value: 8, reason: "loop not found".into() };
/// assert_eq!(fallback.reason(), Some("loop not found"));
/// assert_eq!(fallback.into_value(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// The value was read from the device.
    Resolved(T),
    /// The device text could not be used and a default was substituted.
    Defaulted {
        /// The substituted value.
        value: T,
        /// Why the device text was rejected.
        reason: String,
    },
}

impl<T> Resolution<T> {
    /// Returns a reference to the value, defaulted or not.
    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Resolved(value) | Self::Defaulted { value, .. } => value,
        }
    }

    /// Consumes the resolution and returns the value.
    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            Self::Resolved(value) | Self::Defaulted { value, .. } => value,
        }
    }

    /// Returns `true` if a default was substituted.
    #[must_use]
    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }

    /// Returns the fallback reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Resolved(_) => None,
            Self::Defaulted { reason, .. } => Some(reason),
        }
    }

    /// Maps the contained value, keeping the fallback reason.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::Resolved(value) => Resolution::Resolved(f(value)),
            Self::Defaulted { value, reason } => Resolution::Defaulted {
                value: f(value),
                reason,
            },
        }
    }
}

impl<T: fmt::Display> fmt::Display for Resolution<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(value) => write!(f, "{value}"),
            Self::Defaulted { value, reason } => write!(f, "{value} (defaulted: {reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_reason() {
        let res = Resolution::Defaulted {
            value: 8_u32,
            reason: "no loop".to_string(),
        }
        .map(|v| v * 2);
        assert_eq!(res.value(), &16);
        assert_eq!(res.reason(), Some("no loop"));
    }

    #[test]
    fn display() {
        assert_eq!(Resolution::Resolved(4).to_string(), "4");
        let res = Resolution::Defaulted {
            value: 8,
            reason: "bad".to_string(),
        };
        assert_eq!(res.to_string(), "8 (defaulted: bad)");
    }
}
