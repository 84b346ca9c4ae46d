//! Typed value database
//!
//! Adapter that maps value identities of one node onto a `ValueStore`.

use serde::Serialize;

use crate::error::Result;
use crate::protocol::SensorType;

use super::{BinarySensorValues, CachedValue, ValueId, ValueMetadata, ValueStore};

/// Which half of a value an entry holds
#[derive(Debug, Clone, Copy, Serialize)]
enum Slot {
    Value,
    Metadata,
}

/// Values and metadata of one node
pub struct ValueDb<S: ValueStore> {
    store: S,
    node_id: u16,
}

impl<S: ValueStore> ValueDb<S> {
    pub fn new(store: S, node_id: u16) -> Self {
        Self { store, node_id }
    }

    pub fn node_id(&self) -> u16 {
        self.node_id
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    // =========================================================================
    // Raw Access
    // =========================================================================

    pub fn get_value(&self, value_id: &ValueId) -> Result<Option<CachedValue>> {
        self.read(Slot::Value, value_id)
    }

    pub fn set_value(&self, value_id: &ValueId, value: CachedValue) -> Result<()> {
        self.write(Slot::Value, value_id, &value)
    }

    pub fn remove_value(&self, value_id: &ValueId) -> Result<bool> {
        self.store.remove(&self.key(Slot::Value, value_id)?)
    }

    pub fn get_metadata(&self, value_id: &ValueId) -> Result<Option<ValueMetadata>> {
        self.read(Slot::Metadata, value_id)
    }

    pub fn set_metadata(&self, value_id: &ValueId, metadata: ValueMetadata) -> Result<()> {
        self.write(Slot::Metadata, value_id, &metadata)
    }

    // =========================================================================
    // Binary Sensor Values
    // =========================================================================

    /// Record a sensor state, writing its metadata first
    pub fn record_state(&self, endpoint: u8, sensor_type: SensorType, value: bool) -> Result<()> {
        let value_id = BinarySensorValues::state(endpoint, sensor_type);
        self.set_metadata(&value_id, BinarySensorValues::state_metadata(sensor_type))?;
        self.set_value(&value_id, CachedValue::Bool(value))
    }

    /// Cached state of a sensor type
    pub fn state(&self, endpoint: u8, sensor_type: SensorType) -> Result<Option<bool>> {
        let value = self.get_value(&BinarySensorValues::state(endpoint, sensor_type))?;
        Ok(value.and_then(|v| v.as_bool()))
    }

    /// Record the supported sensor types, preserving their order
    pub fn record_supported_sensor_types(
        &self,
        endpoint: u8,
        sensor_types: Vec<SensorType>,
    ) -> Result<()> {
        let value_id = BinarySensorValues::supported_sensor_types(endpoint);
        self.set_metadata(&value_id, BinarySensorValues::supported_sensor_types_metadata())?;
        self.set_value(&value_id, CachedValue::SensorTypes(sensor_types))
    }

    /// Cached supported sensor types (`None` before they were queried)
    pub fn supported_sensor_types(&self, endpoint: u8) -> Result<Option<Vec<SensorType>>> {
        let value = self.get_value(&BinarySensorValues::supported_sensor_types(endpoint))?;
        Ok(value.and_then(|v| v.as_sensor_types().map(<[SensorType]>::to_vec)))
    }

    pub fn set_interview_complete(&self, endpoint: u8, complete: bool) -> Result<()> {
        self.set_value(
            &BinarySensorValues::interview_complete(endpoint),
            CachedValue::Bool(complete),
        )
    }

    pub fn is_interview_complete(&self, endpoint: u8) -> Result<bool> {
        let value = self.get_value(&BinarySensorValues::interview_complete(endpoint))?;
        Ok(value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Store key: bincode of (node, slot, value id)
    fn key(&self, slot: Slot, value_id: &ValueId) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&(self.node_id, slot, value_id))?)
    }

    fn read<T: serde::de::DeserializeOwned>(
        &self,
        slot: Slot,
        value_id: &ValueId,
    ) -> Result<Option<T>> {
        match self.store.get(&self.key(slot, value_id)?)? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&self, slot: Slot, value_id: &ValueId, item: &T) -> Result<()> {
        let key = self.key(slot, value_id)?;
        self.store.set(key, bincode::serialize(item)?)
    }
}
