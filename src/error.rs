//! Error types and handling for the charger client
//!
//! This module defines the error type shared by the mapper, the client and
//! the configuration layer. Conditions the client recovers from locally
//! (unreachable device, stale data) are not errors; see
//! [`crate::client::Sentinel`].

use thiserror::Error;

/// Result type alias for charger operations
pub type Result<T> = std::result::Result<T, ChargerError>;

/// Main error type for the charger client
#[derive(Debug, Error)]
pub enum ChargerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Caller input outside the accepted set
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Transport errors other than connect/timeout failures
    #[error("Network error: {message}")]
    Network { message: String },

    /// Connection refused or timed out
    #[error("Unreachable: {message}")]
    Unreachable { message: String },

    /// The device answered with an unsuccessful payload
    #[error("Request failed with: {payload}")]
    Device { payload: String },

    /// A written parameter did not read back with the requested value
    #[error("Couldn't verify {parameter}, expected value={expected}, received value={actual}")]
    Verification {
        parameter: String,
        expected: String,
        actual: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Generic errors with context
    #[error("Error: {message}")]
    Generic { message: String },
}

impl ChargerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        ChargerError::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ChargerError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        ChargerError::Network {
            message: message.into(),
        }
    }

    /// Create a new unreachable error
    pub fn unreachable<S: Into<String>>(message: S) -> Self {
        ChargerError::Unreachable {
            message: message.into(),
        }
    }

    /// Create a new device failure carrying the raw payload
    pub fn device<S: Into<String>>(payload: S) -> Self {
        ChargerError::Device {
            payload: payload.into(),
        }
    }

    /// Create a new verification error
    pub fn verification<S: Into<String>>(parameter: S, expected: S, actual: S) -> Self {
        ChargerError::Verification {
            parameter: parameter.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        ChargerError::Io {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        ChargerError::Generic {
            message: message.into(),
        }
    }

    /// Whether the error is a connect/timeout failure
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ChargerError::Unreachable { .. })
    }
}

impl From<std::io::Error> for ChargerError {
    fn from(err: std::io::Error) -> Self {
        ChargerError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for ChargerError {
    fn from(err: serde_yaml::Error) -> Self {
        ChargerError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ChargerError {
    fn from(err: serde_json::Error) -> Self {
        ChargerError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ChargerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ChargerError::unreachable(err.to_string())
        } else {
            ChargerError::network(err.to_string())
        }
    }
}
