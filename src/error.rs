//! Error types for the Binary Sensor command class
//!
//! Provides a unified error type for all operations, plus the two narrower
//! error kinds that cross module seams on their own:
//! - `DecodeError`: a single inbound frame could not be parsed
//! - `TransportFailure`: a round trip produced no response (soft-fail)

use thiserror::Error;

use crate::protocol::{CommandType, ProtocolVersion};

/// Result type alias using CcError
pub type Result<T> = std::result::Result<T, CcError>;

/// Unified error type for command class operations
#[derive(Debug, Error)]
pub enum CcError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Wire Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Unknown command class: 0x{0:02x}")]
    UnknownCommandClass(u8),

    // -------------------------------------------------------------------------
    // Contract Errors (caller bugs, raised before any network activity)
    // -------------------------------------------------------------------------
    #[error("{command:?} is not supported at version {version}")]
    Capability {
        command: CommandType,
        version: ProtocolVersion,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported property: {0}")]
    UnsupportedProperty(String),

    // -------------------------------------------------------------------------
    // Value Store Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Value store corruption detected: {0}")]
    StoreCorruption(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bincode::Error> for CcError {
    fn from(e: bincode::Error) -> Self {
        CcError::Serialization(e.to_string())
    }
}

/// Hard failure to parse one inbound frame
///
/// Bounded to the offending frame: the session carries on with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{command:?} payload too short: expected at least {expected} bytes, got {actual}")]
    TooShort {
        command: CommandType,
        expected: usize,
        actual: usize,
    },

    #[error("empty frame")]
    Empty,

    #[error("unknown command: 0x{0:02x}")]
    UnknownCommand(u8),
}

/// Outcome of a round trip that did not yield a response
///
/// The facade maps every variant to an absent value; callers never see
/// these as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    #[error("timed out waiting for response")]
    Timeout,

    #[error("transport disconnected")]
    Disconnected,

    /// The request never went out, e.g. no command class could frame it
    #[error("request rejected: {0}")]
    Rejected(String),
}
