// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level handle for a Serverlink PDU.
//!
//! A poll cycle issues its requests strictly in order, because each step
//! depends on the previous one:
//!
//! 1. `GET /outlet.htm` for the outlet count
//! 2. `GET /system.htm` for firmware version and MAC address
//! 3. `POST /Getname.xml` for outlet names
//! 4. `POST /status.xml` for current draw and outlet codes
//!
//! The outlet layout from steps 1 and 3 is frozen into an [`OutletMap`] and
//! kept on the handle, so control requests between polls are encoded against
//! the names the caller last saw.
//!
//! ```no_run
//! use serverlink_pdu::Pdu;
//! use serverlink_pdu::control::ControlRequest;
//!
//! # async fn example() -> serverlink_pdu::Result<()> {
//! let pdu = Pdu::http("192.168.1.100")
//!     .with_credentials("snmp", "1234")
//!     .build()
//!     .await?;
//!
//! let report = pdu.poll().await?;
//! println!("{:?}", report.statistic("System#CurrentDraw"));
//!
//! pdu.apply_control(&ControlRequest::off("G: Amp")).await?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod http_builder;

#[cfg(feature = "http")]
pub use http_builder::HttpPduBuilder;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::control::{ALL_OFF, ALL_ON, ControlCommand, ControlRequest, strip_group};
use crate::error::Error;
use crate::outlet::{OutletMap, OutletNames, resolve_outlet_count, resolve_outlet_names};
use crate::parse::{StatusBlock, SystemInfo};
use crate::protocol::{Transport, paths};
use crate::resolution::Resolution;
use crate::snapshot::{Report, SystemSnapshot};
use crate::types::OutletState;

#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};

/// A PDU reachable through a [`Transport`].
///
/// Poll cycles and control requests on the same handle should not overlap;
/// the handle only guarantees that each request sees a complete outlet map.
#[derive(Debug)]
pub struct Pdu<T: Transport> {
    transport: T,
    outlets: RwLock<Option<Arc<OutletMap>>>,
}

#[cfg(feature = "http")]
impl Pdu<HttpClient> {
    /// Creates a builder for a PDU at `host`.
    #[must_use]
    pub fn http(host: impl Into<String>) -> HttpPduBuilder {
        HttpPduBuilder::new(HttpConfig::new(host))
    }

    /// Creates a builder from a full HTTP configuration.
    #[must_use]
    pub fn http_config(config: HttpConfig) -> HttpPduBuilder {
        HttpPduBuilder::new(config)
    }
}

impl<T: Transport> Pdu<T> {
    /// Creates a handle over an existing transport.
    ///
    /// No outlet map is known until the first poll or control request.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            outlets: RwLock::new(None),
        }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the most recently stored outlet map.
    #[must_use]
    pub fn outlet_map(&self) -> Option<Arc<OutletMap>> {
        self.outlets.read().clone()
    }

    fn store_map(&self, map: OutletMap) -> Arc<OutletMap> {
        let mut slot = self.outlets.write();
        let generation = slot.as_ref().map_or(1, |current| current.generation() + 1);
        let map = Arc::new(map.with_generation(generation));
        *slot = Some(Arc::clone(&map));
        map
    }

    // ========== Poll Steps ==========

    /// Reads the outlet count from the control page.
    ///
    /// # Errors
    ///
    /// Returns error if the page cannot be fetched. Unreadable page content
    /// is not an error and yields a defaulted count.
    pub async fn outlet_count(&self) -> Result<Resolution<usize>, Error> {
        let page = self.transport.fetch(paths::OUTLET_PAGE).await?;
        Ok(resolve_outlet_count(&page))
    }

    /// Reads firmware version and MAC address.
    ///
    /// # Errors
    ///
    /// Returns error if the page cannot be fetched.
    pub async fn system_info(&self) -> Result<SystemInfo, Error> {
        let page = self.transport.fetch(paths::SYSTEM_PAGE).await?;
        Ok(SystemInfo::parse(&page))
    }

    /// Reads the outlet names.
    ///
    /// # Errors
    ///
    /// Returns error if the document cannot be fetched. Rows that cannot be
    /// parsed fall back to default names.
    pub async fn outlet_names(&self) -> Result<Resolution<OutletNames>, Error> {
        let document = self.transport.submit(paths::NAMES_XML, "").await?;
        Ok(resolve_outlet_names(&document))
    }

    /// Reads the status block.
    ///
    /// # Errors
    ///
    /// Returns error if the document cannot be fetched or has no status block.
    pub async fn status(&self) -> Result<StatusBlock, Error> {
        let document = self.transport.submit(paths::STATUS_XML, "").await?;
        Ok(StatusBlock::parse(&document)?)
    }

    /// Re-reads outlet count and names and stores the new map.
    ///
    /// # Errors
    ///
    /// Returns error if either page cannot be fetched.
    pub async fn refresh_outlets(&self) -> Result<Resolution<Arc<OutletMap>>, Error> {
        let count = self.outlet_count().await?;
        let names = self.outlet_names().await?;
        Ok(self.freeze(count, names))
    }

    fn freeze(
        &self,
        count: Resolution<usize>,
        names: Resolution<OutletNames>,
    ) -> Resolution<Arc<OutletMap>> {
        let reasons: Vec<String> = [count.reason(), names.reason()]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        let map = self.store_map(OutletMap::new(count.into_value(), names.into_value()));

        tracing::debug!(
            outlets = map.outlet_count(),
            generation = map.generation(),
            "Stored outlet map"
        );

        if reasons.is_empty() {
            Resolution::Resolved(map)
        } else {
            Resolution::Defaulted {
                value: map,
                reason: reasons.join("; "),
            }
        }
    }

    // ========== Poll Cycle ==========

    /// Runs a full poll cycle and returns the snapshot.
    ///
    /// The snapshot is [`Resolution::Defaulted`] when the outlet count or
    /// some outlet names fell back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if any request fails or the status block cannot be
    /// mapped onto the outlets. No partial snapshot is returned.
    pub async fn snapshot(&self) -> Result<Resolution<SystemSnapshot>, Error> {
        let count = self.outlet_count().await?;
        let info = self.system_info().await?;
        let names = self.outlet_names().await?;
        let map = self.freeze(count, names);

        let status = self.status().await?;

        let result = map.map(|map| SystemSnapshot::build(info, &map, &status));
        let snapshot = match result {
            Resolution::Resolved(snapshot) => Resolution::Resolved(snapshot?),
            Resolution::Defaulted { value, reason } => {
                tracing::warn!(reason = %reason, "Poll cycle used defaults");
                Resolution::Defaulted {
                    value: value?,
                    reason,
                }
            }
        };

        tracing::debug!(
            outlets = snapshot.value().outlet_count,
            current_draw = snapshot.value().current_draw_amps,
            "Poll cycle complete"
        );

        Ok(snapshot)
    }

    /// Runs a full poll cycle and returns statistics and controls.
    ///
    /// # Errors
    ///
    /// Returns error if the cycle fails; see [`snapshot`](Self::snapshot).
    pub async fn poll(&self) -> Result<Report, Error> {
        Ok(self.snapshot().await?.value().report())
    }

    // ========== Control ==========

    async fn current_map(&self) -> Result<Arc<OutletMap>, Error> {
        let cached = self.outlet_map();
        match cached {
            Some(map) => Ok(map),
            None => Ok(self.refresh_outlets().await?.into_value()),
        }
    }

    /// Encodes and sends a control request.
    ///
    /// Uses the stored outlet map, reading it from the device first if no
    /// poll has run yet. Returns the command that was sent, or `None` if the
    /// target matched nothing and no request was made.
    ///
    /// # Errors
    ///
    /// Returns error if the outlet map cannot be read or the command fails.
    pub async fn apply_control(
        &self,
        request: &ControlRequest,
    ) -> Result<Option<ControlCommand>, Error> {
        let map = self.current_map().await?;

        let Some(command) = ControlCommand::encode(request, &map) else {
            tracing::debug!(
                label = request.target(),
                generation = map.generation(),
                "No outlet matches control target, nothing sent"
            );
            return Ok(None);
        };

        tracing::trace!(command = %command, label = request.target(), "Posting control command");
        self.transport.submit(&command.path(), "").await?;

        Ok(Some(command))
    }

    /// Applies a control by name with a raw value as reported by consumers.
    ///
    /// Accepted values are exactly `"1"`, `"0"`, `"true"` and `"false"`. The
    /// `_All On` / `_All Off` buttons ignore the value. Any other value is
    /// logged and nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn control_property(&self, property: &str, value: &str) -> Result<(), Error> {
        let desired = match strip_group(property) {
            ALL_ON => OutletState::On,
            ALL_OFF => OutletState::Off,
            _ => match value.parse::<OutletState>() {
                Ok(state) => state,
                Err(err) => {
                    tracing::debug!(property, error = %err, "Ignoring control value");
                    return Ok(());
                }
            },
        };

        self.apply_control(&ControlRequest::new(property, desired))
            .await
            .map(|_| ())
    }

    /// Applies several controls in order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error.
    pub async fn control_properties(&self, controls: &[(&str, &str)]) -> Result<(), Error> {
        for (property, value) in controls {
            self.control_property(property, value).await?;
        }
        Ok(())
    }
}
