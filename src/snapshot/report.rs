// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat statistics and controls for monitoring consumers.
//!
//! Keys follow the `Group#Field` convention, e.g. `System#MacAddress` or
//! `Outlets#G: Amp`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::control::{ALL_OFF, ALL_ON};
use crate::error::ParseError;

use super::SystemSnapshot;

/// Group holding unit-wide statistics.
pub const SYSTEM_GROUP: &str = "System";

/// Group holding per-outlet statistics and controls.
pub const OUTLETS_GROUP: &str = "Outlets";

const BUTTON_GRACE_PERIOD_MS: u64 = 1000;

fn key(group: &str, field: &str) -> String {
    format!("{group}#{field}")
}

/// Widget type of a control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlKind {
    /// Two-position switch bound to one outlet.
    Switch {
        /// Label shown in the on position.
        label_on: &'static str,
        /// Label shown in the off position.
        label_off: &'static str,
    },
    /// Momentary button.
    Button {
        /// Label shown at rest.
        label: &'static str,
        /// Label shown while the command is in flight.
        label_pressed: &'static str,
        /// How long the pressed label stays up, in milliseconds.
        grace_period_ms: u64,
    },
}

/// A control exposed to the monitoring consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    /// Full `Group#Field` name; pass it back as the control target.
    pub name: String,
    /// Widget type.
    pub kind: ControlKind,
    /// Current value, `"1"` or `"0"`.
    pub value: String,
    /// When the value was read.
    pub timestamp: DateTime<Utc>,
}

/// Statistics and controls for one poll cycle.
///
/// # Examples
///
/// ```
/// use serverlink_pdu::outlet::OutletMap;
/// use serverlink_pdu::parse::{StatusBlock, SystemInfo};
/// use serverlink_pdu::snapshot::SystemSnapshot;
///
/// let status = StatusBlock::parse("<pot0>0,0,0.8,0,0,0,0,0,0,0,1,0</pot0>").unwrap();
/// let report = SystemSnapshot::build(SystemInfo::default(), &OutletMap::new(2, Default::default()), &status)
///     .unwrap()
///     .report();
///
/// assert_eq!(report.statistic("System#Ports"), Some("2"));
/// assert_eq!(report.statistic("System#CurrentDraw"), Some("0.8"));
/// assert_eq!(report.statistic("Outlets#A: Outlet 1"), Some("1"));
/// assert_eq!(report.statistic("Outlets#_All On"), Some("0"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// `Group#Field` to value.
    pub statistics: BTreeMap<String, String>,
    /// Global buttons first, then one switch per outlet.
    pub controls: Vec<Control>,
}

impl Report {
    pub(crate) fn from_snapshot(snapshot: &SystemSnapshot) -> Self {
        let mut statistics = BTreeMap::new();
        let mut controls = Vec::with_capacity(snapshot.outlets.len() + 2);

        statistics.insert(key(SYSTEM_GROUP, "Ports"), snapshot.outlet_count.to_string());
        statistics.insert(
            key(SYSTEM_GROUP, "FirmwareVersion"),
            snapshot.firmware_version.clone(),
        );
        statistics.insert(key(SYSTEM_GROUP, "MacAddress"), snapshot.mac_address.clone());
        statistics.insert(
            key(SYSTEM_GROUP, "CurrentDraw"),
            snapshot.current_draw.clone(),
        );

        for (field, label, label_pressed) in [
            (ALL_ON, "All On", "Turning On.."),
            (ALL_OFF, "All Off", "Turning Off.."),
        ] {
            let name = key(OUTLETS_GROUP, field);
            statistics.insert(name.clone(), "0".to_string());
            controls.push(Control {
                name,
                kind: ControlKind::Button {
                    label,
                    label_pressed,
                    grace_period_ms: BUTTON_GRACE_PERIOD_MS,
                },
                value: "0".to_string(),
                timestamp: snapshot.captured_at,
            });
        }

        for outlet in &snapshot.outlets {
            let name = key(OUTLETS_GROUP, &outlet.name);
            statistics.insert(name.clone(), outlet.code.to_string());
            controls.push(Control {
                name,
                kind: ControlKind::Switch {
                    label_on: "On",
                    label_off: "Off",
                },
                value: outlet.state.as_control_value().to_string(),
                timestamp: snapshot.captured_at,
            });
        }

        Self {
            statistics,
            controls,
        }
    }

    /// Returns a statistic by its `Group#Field` key.
    #[must_use]
    pub fn statistic(&self, key: &str) -> Option<&str> {
        self.statistics.get(key).map(String::as_str)
    }

    /// Returns a control by its `Group#Field` name.
    #[must_use]
    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.name == name)
    }

    /// Serializes the report to JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ParseError> {
        serde_json::to_string(self).map_err(ParseError::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outlet::{OutletMap, OutletNames, resolve_outlet_names};
    use crate::parse::{StatusBlock, SystemInfo};

    const NAMES_XML: &str = "<na0>uc flex,a,b</na0><na1>scaler,a,b</na1>\
<na2>am300,a,b</na2><na3>dsp,a,b</na3><na4>camera,a,b</na4>\
<na5>pir,a,b</na5><na6>amp,a,b</na6><na7>pc,a,b</na7>";

    fn report() -> Report {
        let map = OutletMap::new(8, resolve_outlet_names(NAMES_XML).into_value());
        let status =
            StatusBlock::parse("<pot0>0,0,1.25,0,0,0,0,0,0,0,1,1,1,1,1,1,2,0</pot0>").unwrap();
        let info = SystemInfo {
            firmware_version: "s4.82-091012-1cb08s".to_string(),
            mac_address: "00:06:18:75:C9:CA".to_string(),
        };
        SystemSnapshot::build(info, &map, &status).unwrap().report()
    }

    #[test]
    fn system_statistics() {
        let report = report();
        assert_eq!(report.statistic("System#Ports"), Some("8"));
        assert_eq!(report.statistic("System#CurrentDraw"), Some("1.25"));
        assert_eq!(
            report.statistic("System#FirmwareVersion"),
            Some("s4.82-091012-1cb08s")
        );
        assert_eq!(report.statistic("System#MacAddress"), Some("00:06:18:75:C9:CA"));
    }

    #[test]
    fn current_draw_keeps_device_text() {
        let map = OutletMap::new(1, OutletNames::defaults());
        for raw in ["1.30", "1.0", "0"] {
            let status =
                StatusBlock::parse(&format!("<pot0>0,0,{raw},0,0,0,0,0,0,0,1</pot0>")).unwrap();
            let report = SystemSnapshot::build(SystemInfo::default(), &map, &status)
                .unwrap()
                .report();
            assert_eq!(report.statistic("System#CurrentDraw"), Some(raw));
        }
    }

    #[test]
    fn outlet_statistics_keep_raw_codes() {
        let report = report();
        assert_eq!(report.statistic("Outlets#A: Uc Flex"), Some("1"));
        assert_eq!(report.statistic("Outlets#G: Amp"), Some("2"));
        assert_eq!(report.statistic("Outlets#H: Pc"), Some("0"));
        assert_eq!(report.statistics.len(), 4 + 2 + 8);
    }

    #[test]
    fn switch_values_are_collapsed() {
        let report = report();
        let amp = report.control("Outlets#G: Amp").unwrap();
        assert_eq!(amp.value, "1");
        assert!(matches!(amp.kind, ControlKind::Switch { .. }));
        assert_eq!(report.control("Outlets#H: Pc").unwrap().value, "0");
    }

    #[test]
    fn global_buttons_come_first() {
        let report = report();
        assert_eq!(report.controls.len(), 10);
        assert_eq!(report.controls[0].name, "Outlets#_All On");
        assert_eq!(report.controls[1].name, "Outlets#_All Off");
        assert_eq!(
            report.controls[1].kind,
            ControlKind::Button {
                label: "All Off",
                label_pressed: "Turning Off..",
                grace_period_ms: 1000,
            }
        );
    }

    #[test]
    fn json_shape() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["statistics"]["System#Ports"], "8");
        assert_eq!(value["controls"][0]["kind"]["type"], "button");
        assert_eq!(value["controls"][2]["kind"]["type"], "switch");
        assert_eq!(value["controls"][2]["name"], "Outlets#A: Uc Flex");
    }
}
