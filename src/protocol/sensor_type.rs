//! Sensor type definitions
//!
//! Identifies which physical phenomenon a boolean reading describes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical phenomenon reported by a binary sensor
///
/// Wire values outside the known catalogue decode to `Unrecognized` instead
/// of failing, since devices in the field report types from newer revisions
/// (and occasionally garbage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum SensorType {
    /// Wildcard / default type
    Any,
    GeneralPurpose,
    Smoke,
    Co,
    Co2,
    Heat,
    Water,
    Freeze,
    Tamper,
    Aux,
    DoorWindow,
    Tilt,
    Motion,
    GlassBreak,
    /// A wire value with no known meaning
    Unrecognized(u8),
}

impl SensorType {
    /// Every recognized member, in wire order
    pub const ALL: [SensorType; 14] = [
        SensorType::Any,
        SensorType::GeneralPurpose,
        SensorType::Smoke,
        SensorType::Co,
        SensorType::Co2,
        SensorType::Heat,
        SensorType::Water,
        SensorType::Freeze,
        SensorType::Tamper,
        SensorType::Aux,
        SensorType::DoorWindow,
        SensorType::Tilt,
        SensorType::Motion,
        SensorType::GlassBreak,
    ];

    /// Wire tag of this type
    pub fn to_u8(self) -> u8 {
        match self {
            SensorType::Any => 0x00,
            SensorType::GeneralPurpose => 0x01,
            SensorType::Smoke => 0x02,
            SensorType::Co => 0x03,
            SensorType::Co2 => 0x04,
            SensorType::Heat => 0x05,
            SensorType::Water => 0x06,
            SensorType::Freeze => 0x07,
            SensorType::Tamper => 0x08,
            SensorType::Aux => 0x09,
            SensorType::DoorWindow => 0x0A,
            SensorType::Tilt => 0x0B,
            SensorType::Motion => 0x0C,
            SensorType::GlassBreak => 0x0D,
            SensorType::Unrecognized(raw) => raw,
        }
    }

    /// Whether this is a member of the known catalogue
    pub fn is_recognized(self) -> bool {
        !matches!(self, SensorType::Unrecognized(_))
    }

    /// Human readable name, also used as the value property name
    pub fn name(self) -> String {
        match self.known_name() {
            Some(name) => name.to_string(),
            None => format!("Unknown (0x{:02x})", self.to_u8()),
        }
    }

    fn known_name(self) -> Option<&'static str> {
        let name = match self {
            SensorType::Any => "Any",
            SensorType::GeneralPurpose => "General Purpose",
            SensorType::Smoke => "Smoke",
            SensorType::Co => "CO",
            SensorType::Co2 => "CO2",
            SensorType::Heat => "Heat",
            SensorType::Water => "Water",
            SensorType::Freeze => "Freeze",
            SensorType::Tamper => "Tamper",
            SensorType::Aux => "Aux",
            SensorType::DoorWindow => "Door/Window",
            SensorType::Tilt => "Tilt",
            SensorType::Motion => "Motion",
            SensorType::GlassBreak => "Glass Break",
            SensorType::Unrecognized(_) => return None,
        };
        Some(name)
    }
}

impl From<u8> for SensorType {
    fn from(raw: u8) -> Self {
        match raw {
            0x00 => SensorType::Any,
            0x01 => SensorType::GeneralPurpose,
            0x02 => SensorType::Smoke,
            0x03 => SensorType::Co,
            0x04 => SensorType::Co2,
            0x05 => SensorType::Heat,
            0x06 => SensorType::Water,
            0x07 => SensorType::Freeze,
            0x08 => SensorType::Tamper,
            0x09 => SensorType::Aux,
            0x0A => SensorType::DoorWindow,
            0x0B => SensorType::Tilt,
            0x0C => SensorType::Motion,
            0x0D => SensorType::GlassBreak,
            other => SensorType::Unrecognized(other),
        }
    }
}

impl From<SensorType> for u8 {
    fn from(sensor_type: SensorType) -> Self {
        sensor_type.to_u8()
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Map a value property name back to its sensor type
///
/// Only recognized members have property names, so an unknown name or the
/// rendering of an unrecognized type yields `None`.
///
/// "Door/Window" → Some(DoorWindow)
pub fn parse_property_name(property: &str) -> Option<SensorType> {
    SensorType::ALL
        .iter()
        .copied()
        .find(|t| t.known_name() == Some(property))
}
