// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet switching commands.
//!
//! The PDU switches outlets through two endpoints that each take a positional
//! bitmask, one character per outlet:
//!
//! | Endpoint | Effect |
//! |----------|--------|
//! | `/ons.cgi?led=<bits>` | switch on every outlet whose bit is `1` |
//! | `/offs.cgi?led=<bits>` | switch off every outlet whose bit is `1` |
//!
//! A [`ControlRequest`] names its target the way the report does (the
//! outlet's display name or one of the reserved `_All On` / `_All Off`
//! buttons) and is encoded against an [`OutletMap`].
//!
//! # Examples
//!
//! ```
//! use serverlink_pdu::control::{ControlCommand, ControlRequest};
//! use serverlink_pdu::outlet::{OutletMap, resolve_outlet_names};
//!
//! let names = resolve_outlet_names(
//!     "<na6>amp,b,c</na6>",
//! ).into_value();
//! let map = OutletMap::new(8, names);
//!
//! let cmd = ControlCommand::encode(&ControlRequest::off("G: Amp"), &map).unwrap();
//! assert_eq!(cmd.path(), "/offs.cgi?led=00000010");
//!
//! let all = ControlCommand::encode(&ControlRequest::all_on(), &map).unwrap();
//! assert_eq!(all.path(), "/ons.cgi?led=11111111");
//!
//! assert!(ControlCommand::encode(&ControlRequest::on("NoSuchOutlet"), &map).is_none());
//! ```

use std::fmt;

use crate::outlet::OutletMap;
use crate::protocol::paths;
use crate::snapshot::OUTLETS_GROUP;
use crate::types::{Bitmask, OutletIndex, OutletState};

/// Reserved label of the button that switches every outlet on.
pub const ALL_ON: &str = "_All On";

/// Reserved label of the button that switches every outlet off.
pub const ALL_OFF: &str = "_All Off";

/// A request to change outlet power.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlRequest {
    target: String,
    desired: OutletState,
}

impl ControlRequest {
    /// Creates a request for the outlet or button named `target`.
    ///
    /// The label may carry the `Outlets#` group prefix used in reports.
    #[must_use]
    pub fn new(target: impl Into<String>, desired: OutletState) -> Self {
        Self {
            target: target.into(),
            desired,
        }
    }

    /// Creates a request to switch an outlet on.
    #[must_use]
    pub fn on(target: impl Into<String>) -> Self {
        Self::new(target, OutletState::On)
    }

    /// Creates a request to switch an outlet off.
    #[must_use]
    pub fn off(target: impl Into<String>) -> Self {
        Self::new(target, OutletState::Off)
    }

    /// Creates a request for the `_All On` button.
    #[must_use]
    pub fn all_on() -> Self {
        Self::new(ALL_ON, OutletState::On)
    }

    /// Creates a request for the `_All Off` button.
    #[must_use]
    pub fn all_off() -> Self {
        Self::new(ALL_OFF, OutletState::Off)
    }

    /// Returns the target label as given.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the desired state.
    #[must_use]
    pub fn desired(&self) -> OutletState {
        self.desired
    }

    /// Returns the target label without the group prefix.
    #[must_use]
    pub fn label(&self) -> &str {
        strip_group(&self.target)
    }
}

/// Strips a leading `Outlets#` group prefix from a control name.
///
/// ```
/// use serverlink_pdu::control::strip_group;
///
/// assert_eq!(strip_group("Outlets#G: Amp"), "G: Amp");
/// assert_eq!(strip_group("G: Amp"), "G: Amp");
/// ```
#[must_use]
pub fn strip_group(name: &str) -> &str {
    name.strip_prefix(OUTLETS_GROUP)
        .and_then(|rest| rest.strip_prefix('#'))
        .unwrap_or(name)
}

/// What a request label resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlTarget {
    /// The `_All On` button.
    AllOn,
    /// The `_All Off` button.
    AllOff,
    /// A single outlet.
    Outlet(OutletIndex),
}

impl ControlTarget {
    /// Resolves a label against an outlet map.
    ///
    /// Returns `None` for labels that name neither a reserved button nor an
    /// active outlet.
    #[must_use]
    pub fn resolve(label: &str, map: &OutletMap) -> Option<Self> {
        match label {
            ALL_ON => Some(Self::AllOn),
            ALL_OFF => Some(Self::AllOff),
            name => map.find(name).map(Self::Outlet),
        }
    }
}

/// Switching endpoint on the PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/ons.cgi`
    On,
    /// `/offs.cgi`
    Off,
}

impl Endpoint {
    /// Returns the endpoint path.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::On => paths::ON_CGI,
            Self::Off => paths::OFF_CGI,
        }
    }
}

impl From<OutletState> for Endpoint {
    fn from(state: OutletState) -> Self {
        match state {
            OutletState::On => Self::On,
            OutletState::Off => Self::Off,
        }
    }
}

/// An encoded switching command, ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlCommand {
    endpoint: Endpoint,
    bitmask: Bitmask,
}

impl ControlCommand {
    /// Encodes a request against an outlet map.
    ///
    /// The reserved buttons set every bit and ignore the desired state. A
    /// single outlet sets its own bit and picks the endpoint from the desired
    /// state. Returns `None` when the label does not resolve or no bit ends
    /// up set, so a typo can never turn into a command that touches every
    /// outlet.
    #[must_use]
    pub fn encode(request: &ControlRequest, map: &OutletMap) -> Option<Self> {
        let width = map.outlet_count();
        let (endpoint, bitmask) = match ControlTarget::resolve(request.label(), map)? {
            ControlTarget::AllOn => (Endpoint::On, Bitmask::all(width)),
            ControlTarget::AllOff => (Endpoint::Off, Bitmask::all(width)),
            ControlTarget::Outlet(index) => {
                (Endpoint::from(request.desired()), Bitmask::single(width, index))
            }
        };

        if bitmask.is_clear() {
            return None;
        }

        Some(Self { endpoint, bitmask })
    }

    /// Returns the endpoint.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Returns the bitmask.
    #[must_use]
    pub fn bitmask(&self) -> &Bitmask {
        &self.bitmask
    }

    /// Returns the request path including the bitmask query.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}?led={}", self.endpoint.path(), self.bitmask)
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outlet::{OutletNames, resolve_outlet_names};

    const NAMES_XML: &str = "<na0>uc flex,a,b</na0><na1>scaler,a,b</na1>\
<na2>am300,a,b</na2><na3>dsp,a,b</na3><na4>camera,a,b</na4>\
<na5>pir,a,b</na5><na6>amp,a,b</na6><na7>pc,a,b</na7>";

    fn map(count: usize) -> OutletMap {
        OutletMap::new(count, resolve_outlet_names(NAMES_XML).into_value())
    }

    #[test]
    fn single_outlet_off() {
        let cmd = ControlCommand::encode(&ControlRequest::off("G: Amp"), &map(8)).unwrap();
        assert_eq!(cmd.endpoint(), Endpoint::Off);
        assert_eq!(cmd.bitmask().to_string(), "00000010");
        assert_eq!(cmd.path(), "/offs.cgi?led=00000010");
    }

    #[test]
    fn single_outlet_on_with_group_prefix() {
        let cmd = ControlCommand::encode(&ControlRequest::on("Outlets#A: Uc Flex"), &map(8))
            .unwrap();
        assert_eq!(cmd.path(), "/ons.cgi?led=10000000");
    }

    #[test]
    fn all_on_ignores_names_and_state() {
        let request = ControlRequest::new(ALL_ON, OutletState::Off);
        let cmd = ControlCommand::encode(&request, &map(8)).unwrap();
        assert_eq!(cmd.path(), "/ons.cgi?led=11111111");

        let cmd = ControlCommand::encode(&ControlRequest::all_on(), &OutletMap::default()).unwrap();
        assert_eq!(cmd.path(), "/ons.cgi?led=11111111");
    }

    #[test]
    fn all_off_width_follows_count() {
        let cmd =
            ControlCommand::encode(&ControlRequest::new("Outlets#_All Off", OutletState::On), &map(16))
                .unwrap();
        assert_eq!(cmd.endpoint(), Endpoint::Off);
        assert_eq!(cmd.bitmask().to_string(), "1".repeat(16));
    }

    #[test]
    fn bitmask_width_matches_count() {
        for count in [4, 8, 16, 24] {
            let map = OutletMap::new(count, OutletNames::defaults());
            for (index, name) in map.outlets() {
                let cmd = ControlCommand::encode(&ControlRequest::on(name), &map).unwrap();
                assert_eq!(cmd.bitmask().len(), count);
                assert_eq!(cmd.bitmask().count_ones(), 1);
                assert!(cmd.bitmask().is_set(index));
            }
        }
    }

    #[test]
    fn unknown_label_encodes_nothing() {
        assert!(ControlCommand::encode(&ControlRequest::off("NoSuchOutlet"), &map(8)).is_none());
        // Inactive slot on an 8-outlet unit
        assert!(ControlCommand::encode(&ControlRequest::off("I: A"), &map(8)).is_none());
        // Prefix must be followed by the separator
        assert!(ControlCommand::encode(&ControlRequest::off("OutletsG: Amp"), &map(8)).is_none());
    }

    #[test]
    fn encoding_is_idempotent() {
        let request = ControlRequest::on("D: Dsp");
        let map = map(8);
        let first = ControlCommand::encode(&request, &map);
        let second = ControlCommand::encode(&request, &map);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_map_encodes_nothing() {
        let map = OutletMap::new(0, OutletNames::defaults());
        assert!(ControlCommand::encode(&ControlRequest::all_on(), &map).is_none());
        assert!(ControlCommand::encode(&ControlRequest::all_off(), &map).is_none());
    }

    #[test]
    fn encoded_commands_always_set_a_bit() {
        let map = map(8);
        let requests = [
            ControlRequest::all_on(),
            ControlRequest::all_off(),
            ControlRequest::on("A: Uc Flex"),
            ControlRequest::off("H: Pc"),
        ];
        for request in &requests {
            let cmd = ControlCommand::encode(request, &map).unwrap();
            assert!(!cmd.bitmask().is_clear(), "{}", request.target());
        }
    }

    #[test]
    fn target_resolution() {
        let map = map(8);
        assert_eq!(ControlTarget::resolve(ALL_ON, &map), Some(ControlTarget::AllOn));
        assert_eq!(ControlTarget::resolve(ALL_OFF, &map), Some(ControlTarget::AllOff));
        assert_eq!(
            ControlTarget::resolve("H: Pc", &map),
            Some(ControlTarget::Outlet(OutletIndex::new(7).unwrap()))
        );
        assert_eq!(ControlTarget::resolve("_all on", &map), None);
    }
}
