// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `serverlink_pdu` library.
//!
//! Failures are split by where they happen: value validation, transport
//! communication with the PDU, and parsing of the device's HTML/XML pages.
//! A poll cycle either completes or fails with a single [`Error`];
//! recoverable conditions never surface here and are reported through
//! [`Resolution::Defaulted`](crate::Resolution::Defaulted) instead.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the PDU.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a device page.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: usize,
        /// Maximum allowed value.
        max: usize,
        /// The actual value that was provided.
        actual: usize,
    },

    /// A control value is not one of the accepted on/off spellings.
    #[error("invalid control value: {0}")]
    InvalidControlValue(String),
}

/// Errors related to HTTP communication with the PDU.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors related to parsing PDU responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON serialization of a report failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 1,
            max: 24,
            actual: 30,
        };
        assert_eq!(err.to_string(), "value 30 is out of range [1, 24]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidControlValue("maybe".to_string());
        let err: Error = value_err.into();
        assert!(matches!(
            err,
            Error::Value(ValueError::InvalidControlValue(ref v)) if v == "maybe"
        ));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("pot0".to_string());
        assert_eq!(err.to_string(), "missing field in response: pot0");
    }

    #[test]
    fn parse_error_invalid_value_display() {
        let err = ParseError::InvalidValue {
            field: "outlet code 3".to_string(),
            message: "not an integer: x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse outlet code 3: not an integer: x"
        );
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::ConnectionFailed("HTTP 500 - Internal Server Error".to_string());
        assert_eq!(
            err.to_string(),
            "connection failed: HTTP 500 - Internal Server Error"
        );
    }
}
