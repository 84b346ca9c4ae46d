//! Values Module
//!
//! Typed access to the externally owned value cache.
//!
//! ## Responsibilities
//! - Define value identities and their metadata
//! - Encode typed values onto a byte-level key-value store
//! - Never assume exclusive access: other command classes share the store
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ ValueDb  (typed: ValueId → CachedValue) │
//! └────────────────────┬────────────────────┘
//!                      │ bincode keys/values
//! ┌────────────────────▼────────────────────┐
//! │ ValueStore (bytes → bytes)              │
//! │   MemoryStore | FileStore | external    │
//! └─────────────────────────────────────────┘
//! ```

mod db;
mod file_store;
mod store;

pub use db::ValueDb;
pub use file_store::FileStore;
pub use store::{MemoryStore, ValueStore};

use serde::{Deserialize, Serialize};

use crate::protocol::{parse_property_name, SensorType, COMMAND_CLASS_ID};

/// Identity of one cacheable value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueId {
    pub command_class: u8,
    pub endpoint: u8,
    pub property: String,
    pub property_key: Option<String>,
}

/// A cached payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CachedValue {
    Bool(bool),
    /// Ordered as reported by the device
    SensorTypes(Vec<SensorType>),
}

impl CachedValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CachedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sensor_types(&self) -> Option<&[SensorType]> {
        match self {
            CachedValue::SensorTypes(types) => Some(types),
            _ => None,
        }
    }
}

/// Kind of payload a value holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Boolean,
    Any,
}

/// Metadata describing a value to consumers of the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueMetadata {
    pub value_type: ValueType,
    pub label: String,
    pub readable: bool,
    pub writeable: bool,
    /// Hidden from user-facing value listings
    pub internal: bool,
    /// Sensor type this state value belongs to
    pub sensor_type: Option<SensorType>,
}

/// Value identities owned by the Binary Sensor command class
pub struct BinarySensorValues;

impl BinarySensorValues {
    pub const SUPPORTED_SENSOR_TYPES: &'static str = "supportedSensorTypes";
    pub const INTERVIEW_COMPLETE: &'static str = "interviewComplete";

    /// State of one sensor type on an endpoint
    pub fn state(endpoint: u8, sensor_type: SensorType) -> ValueId {
        Self::value_id(endpoint, sensor_type.name())
    }

    /// Metadata written alongside a state value
    pub fn state_metadata(sensor_type: SensorType) -> ValueMetadata {
        ValueMetadata {
            value_type: ValueType::Boolean,
            label: format!("Sensor state ({})", sensor_type.name()),
            readable: true,
            writeable: false,
            internal: false,
            sensor_type: Some(sensor_type),
        }
    }

    /// Supported sensor types reported during the interview
    pub fn supported_sensor_types(endpoint: u8) -> ValueId {
        Self::value_id(endpoint, Self::SUPPORTED_SENSOR_TYPES)
    }

    pub fn supported_sensor_types_metadata() -> ValueMetadata {
        ValueMetadata {
            value_type: ValueType::Any,
            label: "Supported sensor types".to_string(),
            readable: true,
            writeable: false,
            internal: true,
            sensor_type: None,
        }
    }

    /// Interview completion flag
    pub fn interview_complete(endpoint: u8) -> ValueId {
        Self::value_id(endpoint, Self::INTERVIEW_COMPLETE)
    }

    /// Sensor type addressed by a state value id, if it is one
    pub fn sensor_type_of(value_id: &ValueId) -> Option<SensorType> {
        if value_id.command_class != COMMAND_CLASS_ID || value_id.property_key.is_some() {
            return None;
        }
        parse_property_name(&value_id.property)
    }

    fn value_id(endpoint: u8, property: impl Into<String>) -> ValueId {
        ValueId {
            command_class: COMMAND_CLASS_ID,
            endpoint,
            property: property.into(),
            property_key: None,
        }
    }
}
