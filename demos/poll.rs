// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polls a PDU once and prints its statistics.
//!
//! ```sh
//! PDU_HOST=192.168.1.100 PDU_USER=snmp PDU_PASSWORD=1234 \
//!     RUST_LOG=serverlink_pdu=debug cargo run --example poll
//! ```
//!
//! Pass `NAME=VALUE` arguments to switch controls after the poll, e.g.
//! `"Outlets#G: Amp=0"`.

use serverlink_pdu::Pdu;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> serverlink_pdu::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let host = std::env::var("PDU_HOST").unwrap_or_else(|_| "192.168.1.100".to_string());
    let mut builder = Pdu::http(host);
    if let (Ok(user), Ok(password)) = (std::env::var("PDU_USER"), std::env::var("PDU_PASSWORD")) {
        builder = builder.with_credentials(user, password);
    }
    let pdu = builder.build_without_probe()?;

    let snapshot = pdu.snapshot().await?;
    if let Some(reason) = snapshot.reason() {
        println!("# defaults used: {reason}");
    }

    for (key, value) in &snapshot.value().report().statistics {
        println!("{key} = {value}");
    }

    let controls: Vec<(String, String)> = std::env::args()
        .skip(1)
        .filter_map(|arg| {
            arg.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
        })
        .collect();
    let controls: Vec<(&str, &str)> = controls
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    pdu.control_properties(&controls).await?;

    Ok(())
}
