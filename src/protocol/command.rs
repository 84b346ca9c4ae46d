//! Command definitions
//!
//! The four Binary Sensor commands as one closed tagged union.

use std::fmt;

use super::SensorType;

/// Command class identifier of Binary Sensor
pub const COMMAND_CLASS_ID: u8 = 0x30;

/// Command types (wire tags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandType {
    SupportedGet = 0x01,
    Get = 0x02,
    Report = 0x03,
    SupportedReport = 0x04,
}

impl CommandType {
    /// Parse a wire tag
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(CommandType::SupportedGet),
            0x02 => Some(CommandType::Get),
            0x03 => Some(CommandType::Report),
            0x04 => Some(CommandType::SupportedReport),
            _ => None,
        }
    }

    /// The response a request of this type expects, if any
    pub fn expected_response(self) -> Option<CommandType> {
        match self {
            CommandType::Get => Some(CommandType::Report),
            CommandType::SupportedGet => Some(CommandType::SupportedReport),
            CommandType::Report | CommandType::SupportedReport => None,
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Request the current state, optionally for one sensor type
    Get { sensor_type: Option<SensorType> },

    /// Current state of one sensor type
    Report { sensor_type: SensorType, value: bool },

    /// Request the set of supported sensor types (v2+)
    SupportedGet,

    /// Supported sensor types, in the order the device listed them
    SupportedReport { sensor_types: Vec<SensorType> },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Get { .. } => CommandType::Get,
            Command::Report { .. } => CommandType::Report,
            Command::SupportedGet => CommandType::SupportedGet,
            Command::SupportedReport { .. } => CommandType::SupportedReport,
        }
    }
}

/// Log line rendering
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Get { sensor_type } => {
                write!(f, "Get {{ type: {} }}", sensor_type.unwrap_or(SensorType::Any))
            }
            Command::Report { sensor_type, value } => {
                write!(f, "Report {{ type: {}, value: {} }}", sensor_type, value)
            }
            Command::SupportedGet => write!(f, "SupportedGet"),
            Command::SupportedReport { sensor_types } => {
                let names: Vec<String> = sensor_types.iter().map(|t| t.name()).collect();
                write!(f, "SupportedReport {{ supported types: {} }}", names.join(", "))
            }
        }
    }
}
