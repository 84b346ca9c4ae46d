//! Protocol codec
//!
//! Encoding and decoding functions for Binary Sensor commands.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Cmd (1)  │         Payload             │
//! └──────────┴─────────────────────────────┘
//! ```
//!
//! ### Payload by Command Type
//! - SUPPORTED_GET:    empty
//! - GET:              v1: empty; v2: sensor_type (1, omitted when no type requested)
//! - REPORT:           value (1, 0xFF = on) + v2: sensor_type (1, optional)
//! - SUPPORTED_REPORT: bitmask of sensor types, bit 0 reserved
//!
//! The command class byte that precedes the command byte on the air is
//! added and stripped by the registry.

use crate::error::DecodeError;

use super::bitmask::{decode_bitmask, encode_bitmask};
use super::{Command, CommandType, ProtocolVersion, SensorType};

/// Wire value of an "on" state
pub const VALUE_ON: u8 = 0xFF;

/// Wire value of an "off" state
pub const VALUE_OFF: u8 = 0x00;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a command to bytes
///
/// Format: cmd_type (1) + payload
pub fn encode(command: &Command, version: ProtocolVersion) -> Vec<u8> {
    let mut message = vec![command.command_type() as u8];

    match command {
        Command::Get { sensor_type } => {
            if let (Some(sensor_type), true) = (sensor_type, version.supports_sensor_types()) {
                message.push(sensor_type.to_u8());
            }
        }
        Command::Report { sensor_type, value } => {
            message.push(if *value { VALUE_ON } else { VALUE_OFF });
            if version.supports_sensor_types() {
                message.push(sensor_type.to_u8());
            }
        }
        Command::SupportedGet => {}
        Command::SupportedReport { sensor_types } => {
            // Index 0 is the reserved bit; the mask always carries at least one byte
            let indices: Vec<usize> = sensor_types
                .iter()
                .map(|t| t.to_u8() as usize)
                .filter(|&i| i != 0)
                .collect();
            let mask = encode_bitmask(&indices, 0);
            if mask.is_empty() {
                message.push(0);
            } else {
                message.extend_from_slice(&mask);
            }
        }
    }

    message
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a command from bytes
///
/// `bytes` starts with the command byte. A payload shorter than the
/// command's minimum is rejected; the caller must not act on it.
pub fn decode(bytes: &[u8], version: ProtocolVersion) -> Result<Command, DecodeError> {
    let (&tag, payload) = bytes.split_first().ok_or(DecodeError::Empty)?;
    let command_type = CommandType::from_u8(tag).ok_or(DecodeError::UnknownCommand(tag))?;

    match command_type {
        CommandType::Get => Ok(decode_get(payload, version)),
        CommandType::Report => decode_report(payload, version),
        CommandType::SupportedGet => Ok(Command::SupportedGet),
        CommandType::SupportedReport => decode_supported_report(payload),
    }
}

/// Decode GET payload
fn decode_get(payload: &[u8], version: ProtocolVersion) -> Command {
    let sensor_type = match payload.first() {
        Some(&raw) if version.supports_sensor_types() => Some(SensorType::from(raw)),
        _ => None,
    };
    Command::Get { sensor_type }
}

/// Decode REPORT payload
fn decode_report(payload: &[u8], version: ProtocolVersion) -> Result<Command, DecodeError> {
    require_len(CommandType::Report, payload, 1)?;

    // Only 0xFF is "on"; 0x01..=0xFE are read as off
    let value = payload[0] == VALUE_ON;
    let sensor_type = match payload.get(1) {
        Some(&raw) if version.supports_sensor_types() => SensorType::from(raw),
        _ => SensorType::Any,
    };

    Ok(Command::Report { sensor_type, value })
}

/// Decode SUPPORTED_REPORT payload
fn decode_supported_report(payload: &[u8]) -> Result<Command, DecodeError> {
    require_len(CommandType::SupportedReport, payload, 1)?;

    // The enumeration starts at 1 but the reserved bit 0 is part of the mask
    let sensor_types = decode_bitmask(payload, 0)
        .into_iter()
        .filter(|&index| index != 0)
        .filter_map(|index| u8::try_from(index).ok())
        .map(SensorType::from)
        .collect();

    Ok(Command::SupportedReport { sensor_types })
}

fn require_len(command: CommandType, payload: &[u8], expected: usize) -> Result<(), DecodeError> {
    if payload.len() < expected {
        return Err(DecodeError::TooShort {
            command,
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}
