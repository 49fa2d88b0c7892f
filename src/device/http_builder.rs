// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP PDU builder.

use std::time::Duration;

use crate::device::Pdu;
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};

/// Builder for PDUs reached over HTTP.
///
/// Created with `Pdu::http("host")` or
/// `Pdu::http_config(HttpConfig::new("host").with_port(8080))`.
///
/// # Examples
///
/// ```no_run
/// use serverlink_pdu::Pdu;
///
/// # async fn example() -> serverlink_pdu::Result<()> {
/// // Reads the outlet layout before returning
/// let pdu = Pdu::http("192.168.1.100")
///     .with_credentials("snmp", "1234")
///     .build()
///     .await?;
///
/// // No network access until the first poll or control
/// let pdu = Pdu::http("192.168.1.100").build_without_probe()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpPduBuilder {
    config: HttpConfig,
}

impl HttpPduBuilder {
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Sets HTTP basic authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.config = self.config.with_credentials(username, password);
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the PDU and reads its outlet layout.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The HTTP client cannot be created
    /// - The outlet page or name document cannot be fetched
    pub async fn build(self) -> Result<Pdu<HttpClient>, Error> {
        let pdu = self.build_without_probe()?;
        let map = pdu.refresh_outlets().await?;
        tracing::info!(
            host = pdu.transport().base_url(),
            outlets = map.value().outlet_count(),
            "Connected to PDU"
        );
        Ok(pdu)
    }

    /// Builds the PDU without contacting it.
    ///
    /// The outlet layout is read on the first poll or control request.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build_without_probe(self) -> Result<Pdu<HttpClient>, Error> {
        let client = self.config.into_client()?;
        Ok(Pdu::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_carries_settings() {
        let builder = HttpPduBuilder::new(HttpConfig::new("192.168.1.100"))
            .with_credentials("snmp", "1234")
            .with_port(8080)
            .with_timeout(Duration::from_secs(3));

        let config = builder.config();
        assert_eq!(config.host(), "192.168.1.100");
        assert_eq!(config.port(), 8080);
        assert_eq!(config.credentials(), Some(("snmp", "1234")));
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn build_without_probe_has_no_map() {
        let pdu = HttpPduBuilder::new(HttpConfig::new("192.168.1.100"))
            .build_without_probe()
            .unwrap();
        assert!(pdu.outlet_map().is_none());
        assert_eq!(pdu.transport().base_url(), "http://192.168.1.100");
    }

    #[test]
    fn empty_host_is_rejected() {
        let result = HttpPduBuilder::new(HttpConfig::new("")).build_without_probe();
        assert!(result.is_err());
    }

    #[test]
    fn from_pdu_constructors() {
        let builder = Pdu::http("10.0.0.5");
        assert_eq!(builder.config().host(), "10.0.0.5");

        let builder = Pdu::http_config(HttpConfig::new("10.0.0.5").with_port(81));
        assert_eq!(builder.config().port(), 81);
    }
}
