//! Protocol Module
//!
//! Defines the Binary Sensor wire protocol (command class 0x30).
//!
//! ## Commands
//! - 0x01: SUPPORTED_GET    - Payload: empty (v2+)
//! - 0x02: GET              - Payload: [sensor_type] (v2+)
//! - 0x03: REPORT           - Payload: value + [sensor_type] (v2+)
//! - 0x04: SUPPORTED_REPORT - Payload: bitmask (v2+)
//!
//! ## Versions
//! - V1: a single untyped state
//! - V2: one state per sensor type, plus the supported-types query
//!
//! ## Correlation
//! GET is answered by REPORT, SUPPORTED_GET by SUPPORTED_REPORT. See
//! [`matches`] for the exact rule.

mod bitmask;
mod codec;
mod command;
mod correlation;
mod sensor_type;
mod version;

pub use bitmask::{decode_bitmask, encode_bitmask};
pub use codec::{decode, encode, VALUE_OFF, VALUE_ON};
pub use command::{Command, CommandType, COMMAND_CLASS_ID};
pub use correlation::matches;
pub use sensor_type::{parse_property_name, SensorType};
pub use version::{ProtocolVersion, IMPLEMENTED_VERSION};
