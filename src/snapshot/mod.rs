// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-time view of a PDU.
//!
//! A [`SystemSnapshot`] is assembled once per poll cycle from the outlet map,
//! the system page, and the status block. It either covers every active
//! outlet or is not built at all. The flat [`Report`] handed to monitoring
//! consumers is derived from it.

mod report;

pub use report::{Control, ControlKind, OUTLETS_GROUP, Report, SYSTEM_GROUP};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ParseError;
use crate::outlet::OutletMap;
use crate::parse::{StatusBlock, SystemInfo};
use crate::types::{OutletIndex, OutletState};

/// State of one outlet in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutletStatus {
    /// Outlet position.
    pub index: OutletIndex,
    /// Display name, e.g. `G: Amp`.
    pub name: String,
    /// Decoded power state.
    pub state: OutletState,
    /// Code as reported by the device.
    pub code: u32,
}

/// Everything read from the unit in one poll cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSnapshot {
    /// Firmware version, empty if the system page did not show it.
    pub firmware_version: String,
    /// MAC address, empty if the system page did not show it.
    pub mac_address: String,
    /// Total current draw as the device reported it.
    pub current_draw: String,
    /// Total current draw in amps.
    pub current_draw_amps: f64,
    /// Number of outlets on the unit.
    pub outlet_count: usize,
    /// Active outlets in index order.
    pub outlets: Vec<OutletStatus>,
    /// Generation of the outlet map the snapshot was built from.
    pub map_generation: u64,
    /// When the snapshot was assembled.
    pub captured_at: DateTime<Utc>,
}

impl SystemSnapshot {
    /// Assembles a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the status block does not hold a numeric
    /// current draw and an integer code for every active outlet.
    ///
    /// # Examples
    ///
    /// ```
    /// use serverlink_pdu::outlet::OutletMap;
    /// use serverlink_pdu::parse::{StatusBlock, SystemInfo};
    /// use serverlink_pdu::snapshot::SystemSnapshot;
    /// use serverlink_pdu::types::OutletState;
    ///
    /// let status = StatusBlock::parse("<pot0>0,0,2.5,0,0,0,0,0,0,0,1,0,2,0</pot0>").unwrap();
    /// let snapshot =
    ///     SystemSnapshot::build(SystemInfo::default(), &OutletMap::new(4, Default::default()), &status)
    ///         .unwrap();
    ///
    /// assert_eq!(snapshot.outlets.len(), 4);
    /// assert_eq!(snapshot.outlets[2].state, OutletState::On);
    /// assert_eq!(snapshot.outlets[2].code, 2);
    /// ```
    pub fn build(
        info: SystemInfo,
        map: &OutletMap,
        status: &StatusBlock,
    ) -> Result<Self, ParseError> {
        status.ensure_outlets(map.outlet_count())?;
        let current_draw_amps = status.current_draw()?;
        let current_draw = status.current_draw_raw()?.to_string();

        let outlets = map
            .outlets()
            .map(|(index, name)| {
                let code = status.outlet_code(index)?;
                Ok(OutletStatus {
                    index,
                    name: name.to_string(),
                    state: OutletState::from_code(code),
                    code,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        Ok(Self {
            firmware_version: info.firmware_version,
            mac_address: info.mac_address,
            current_draw,
            current_draw_amps,
            outlet_count: map.outlet_count(),
            outlets,
            map_generation: map.generation(),
            captured_at: Utc::now(),
        })
    }

    /// Returns the outlet with this display name.
    #[must_use]
    pub fn outlet(&self, name: &str) -> Option<&OutletStatus> {
        self.outlets.iter().find(|outlet| outlet.name == name)
    }

    /// Flattens the snapshot into statistics and controls.
    #[must_use]
    pub fn report(&self) -> Report {
        Report::from_snapshot(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outlet::{OutletNames, resolve_outlet_names};

    fn status(codes: &[&str]) -> StatusBlock {
        let mut values = vec!["0", "0", "1.4", "0", "0", "0", "0", "0", "0", "0"];
        values.extend_from_slice(codes);
        StatusBlock::parse(&format!("<pot0>{}</pot0>", values.join(","))).unwrap()
    }

    fn info() -> SystemInfo {
        SystemInfo {
            firmware_version: "s4.82-091012-1cb08s".to_string(),
            mac_address: "00:06:18:75:C9:CA".to_string(),
        }
    }

    #[test]
    fn one_entry_per_outlet() {
        let map = OutletMap::new(8, OutletNames::defaults()).with_generation(3);
        let snapshot =
            SystemSnapshot::build(info(), &map, &status(&["0", "1", "2", "3", "0", "1", "0", "9"]))
                .unwrap();

        assert_eq!(snapshot.outlet_count, 8);
        assert_eq!(snapshot.outlets.len(), 8);
        assert_eq!(snapshot.map_generation, 3);
        assert_eq!(snapshot.current_draw, "1.4");
        assert!((snapshot.current_draw_amps - 1.4).abs() < f64::EPSILON);

        let states: Vec<OutletState> = snapshot.outlets.iter().map(|o| o.state).collect();
        use OutletState::{Off, On};
        assert_eq!(states, vec![Off, On, On, On, Off, On, Off, On]);
        assert_eq!(snapshot.outlets[7].code, 9);
    }

    #[test]
    fn extra_values_are_ignored() {
        let map = OutletMap::new(2, OutletNames::defaults());
        let snapshot =
            SystemSnapshot::build(info(), &map, &status(&["1", "0", "1", "1"])).unwrap();
        assert_eq!(snapshot.outlets.len(), 2);
    }

    #[test]
    fn short_block_is_fatal() {
        let map = OutletMap::new(8, OutletNames::defaults());
        let result = SystemSnapshot::build(info(), &map, &status(&["1", "1", "1"]));
        assert!(matches!(result, Err(ParseError::UnexpectedFormat(_))));
    }

    #[test]
    fn bad_code_is_fatal() {
        let map = OutletMap::new(2, OutletNames::defaults());
        let result = SystemSnapshot::build(info(), &map, &status(&["1", "on"]));
        assert!(matches!(result, Err(ParseError::InvalidValue { .. })));
    }

    #[test]
    fn bad_current_draw_is_fatal() {
        let block = StatusBlock::parse("<pot0>0,0,,0,0,0,0,0,0,0,1</pot0>").unwrap();
        let map = OutletMap::new(1, OutletNames::defaults());
        let result = SystemSnapshot::build(info(), &map, &block);
        assert!(matches!(result, Err(ParseError::InvalidValue { .. })));
    }

    #[test]
    fn lookup_by_name() {
        let names = resolve_outlet_names("<na6>amp,x,y</na6>").into_value();
        let map = OutletMap::new(8, names);
        let snapshot = SystemSnapshot::build(
            info(),
            &map,
            &status(&["0", "0", "0", "0", "0", "0", "1", "0"]),
        )
        .unwrap();

        let amp = snapshot.outlet("G: Amp").unwrap();
        assert_eq!(amp.index.value(), 6);
        assert_eq!(amp.state, OutletState::On);
    }
}
