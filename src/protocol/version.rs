//! Negotiated protocol version

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CcError, Result};

/// Highest version of the command class this crate implements
pub const IMPLEMENTED_VERSION: u8 = 2;

/// Version of the command class agreed with one endpoint
///
/// Always >= 1. Version 2 adds sensor types to Get/Report and the
/// SupportedGet/SupportedReport pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ProtocolVersion(u8);

impl ProtocolVersion {
    pub const V1: ProtocolVersion = ProtocolVersion(1);
    pub const V2: ProtocolVersion = ProtocolVersion(2);

    /// Wrap a raw version number (0 is rejected)
    pub fn new(version: u8) -> Result<Self> {
        if version == 0 {
            return Err(CcError::Config(
                "protocol version must be at least 1".to_string(),
            ));
        }
        Ok(Self(version))
    }

    /// Agree on a version with a device that advertises `device_version`
    pub fn negotiate(device_version: u8) -> Result<Self> {
        Self::new(device_version.min(IMPLEMENTED_VERSION))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether per-type readings and the supported-types query are available
    pub fn supports_sensor_types(self) -> bool {
        self.0 >= 2
    }
}

impl TryFrom<u8> for ProtocolVersion {
    type Error = CcError;

    fn try_from(version: u8) -> Result<Self> {
        Self::new(version)
    }
}

impl From<ProtocolVersion> for u8 {
    fn from(version: ProtocolVersion) -> Self {
        version.0
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
