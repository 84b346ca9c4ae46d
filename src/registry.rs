//! Command class registry
//!
//! Explicit registration table used by the dispatch layer to route frames.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │  CC (1)  │ Cmd (1)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```

use std::fmt;
use std::sync::OnceLock;

use bytes::{BufMut, BytesMut};

use crate::api;
use crate::error::{CcError, DecodeError, Result};
use crate::protocol::{self, Command, CommandType, ProtocolVersion, SensorType};
use crate::values::{BinarySensorValues, ValueId};

/// Everything the dispatch layer needs to know about one command class
#[derive(Clone)]
pub struct CommandClassEntry {
    pub id: u8,
    pub name: &'static str,
    pub implemented_version: u8,
    pub encode: fn(&Command, ProtocolVersion) -> Vec<u8>,
    pub decode: fn(&[u8], ProtocolVersion) -> std::result::Result<Command, DecodeError>,
    pub supports_command: fn(CommandType, ProtocolVersion) -> bool,
    /// Value id of one state reading on an endpoint
    pub state_value: fn(u8, SensorType) -> ValueId,
    /// Value ids that exist independently of readings
    pub static_values: fn(u8) -> Vec<ValueId>,
}

impl fmt::Debug for CommandClassEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandClassEntry")
            .field("id", &format_args!("0x{:02x}", self.id))
            .field("name", &self.name)
            .field("implemented_version", &self.implemented_version)
            .finish_non_exhaustive()
    }
}

/// Table of registered command classes
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<CommandClassEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every command class this crate implements
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(binary_sensor_entry());
        registry
    }

    /// Process-wide default registry
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::with_defaults)
    }

    /// Add an entry, replacing one with the same id
    pub fn register(&mut self, entry: CommandClassEntry) {
        self.entries.retain(|e| e.id != entry.id);
        self.entries.push(entry);
    }

    pub fn lookup(&self, id: u8) -> Option<&CommandClassEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode a command with its command class header
    pub fn encode_frame(&self, cc_id: u8, command: &Command, version: ProtocolVersion) -> Result<Vec<u8>> {
        let entry = self.lookup(cc_id).ok_or(CcError::UnknownCommandClass(cc_id))?;
        let body = (entry.encode)(command, version);

        let mut frame = BytesMut::with_capacity(1 + body.len());
        frame.put_u8(entry.id);
        frame.put_slice(&body);
        Ok(frame.to_vec())
    }

    /// Route a frame to its command class and decode it
    pub fn decode_frame(&self, frame: &[u8], version: ProtocolVersion) -> Result<Command> {
        let (&cc_id, body) = frame.split_first().ok_or(DecodeError::Empty)?;
        let entry = self.lookup(cc_id).ok_or(CcError::UnknownCommandClass(cc_id))?;
        Ok((entry.decode)(body, version)?)
    }
}

/// Registration of Binary Sensor
pub fn binary_sensor_entry() -> CommandClassEntry {
    CommandClassEntry {
        id: protocol::COMMAND_CLASS_ID,
        name: "Binary Sensor",
        implemented_version: protocol::IMPLEMENTED_VERSION,
        encode: protocol::encode,
        decode: protocol::decode,
        supports_command: api::supports_command,
        state_value: BinarySensorValues::state,
        static_values: |endpoint| {
            vec![
                BinarySensorValues::supported_sensor_types(endpoint),
                BinarySensorValues::interview_complete(endpoint),
            ]
        },
    }
}

/// Encode a Binary Sensor command with its header through the global registry
pub fn encode_frame(command: &Command, version: ProtocolVersion) -> Result<Vec<u8>> {
    Registry::global().encode_frame(protocol::COMMAND_CLASS_ID, command, version)
}

/// Decode a frame through the global registry
pub fn decode_frame(frame: &[u8], version: ProtocolVersion) -> Result<Command> {
    Registry::global().decode_frame(frame, version)
}
