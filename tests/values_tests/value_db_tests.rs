//! ValueDb Tests
//!
//! Tests for the typed value cache adapter.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use binsensor_cc::protocol::SensorType;
use binsensor_cc::values::{
    BinarySensorValues, CachedValue, MemoryStore, ValueDb, ValueStore, ValueType,
};

use common::memory_db;

#[test]
fn test_record_state_writes_metadata_and_value() {
    let db = memory_db(3);
    db.record_state(0, SensorType::Smoke, true).unwrap();

    let value_id = BinarySensorValues::state(0, SensorType::Smoke);
    assert_eq!(db.get_value(&value_id).unwrap(), Some(CachedValue::Bool(true)));

    let metadata = db.get_metadata(&value_id).unwrap().unwrap();
    assert_eq!(metadata.label, "Sensor state (Smoke)");
    assert_eq!(metadata.value_type, ValueType::Boolean);
    assert!(metadata.readable);
    assert!(!metadata.writeable);
    assert_eq!(metadata.sensor_type, Some(SensorType::Smoke));
}

#[test]
fn test_state_identity_per_endpoint_and_type() {
    let db = memory_db(3);
    db.record_state(0, SensorType::Water, true).unwrap();
    db.record_state(1, SensorType::Water, false).unwrap();
    db.record_state(0, SensorType::Heat, false).unwrap();

    assert_eq!(db.state(0, SensorType::Water).unwrap(), Some(true));
    assert_eq!(db.state(1, SensorType::Water).unwrap(), Some(false));
    assert_eq!(db.state(0, SensorType::Heat).unwrap(), Some(false));
    assert_eq!(db.state(1, SensorType::Heat).unwrap(), None);
}

#[test]
fn test_supported_types_keep_insertion_order() {
    let db = memory_db(3);
    let types = vec![SensorType::Motion, SensorType::GeneralPurpose, SensorType::Co];
    db.record_supported_sensor_types(0, types.clone()).unwrap();

    assert_eq!(db.supported_sensor_types(0).unwrap(), Some(types));

    let metadata = db
        .get_metadata(&BinarySensorValues::supported_sensor_types(0))
        .unwrap()
        .unwrap();
    assert!(metadata.internal);
}

#[test]
fn test_absent_supported_types() {
    let db = memory_db(3);
    assert_eq!(db.supported_sensor_types(0).unwrap(), None);
}

#[test]
fn test_nodes_share_a_store_without_conflicts() {
    let store = Arc::new(MemoryStore::new());
    let node_a = ValueDb::new(Arc::clone(&store), 1);
    let node_b = ValueDb::new(Arc::clone(&store), 2);

    node_a.record_state(0, SensorType::Any, true).unwrap();
    node_b.record_state(0, SensorType::Any, false).unwrap();

    assert_eq!(node_a.state(0, SensorType::Any).unwrap(), Some(true));
    assert_eq!(node_b.state(0, SensorType::Any).unwrap(), Some(false));
    // value + metadata per node
    assert_eq!(store.entry_count(), 4);
}

#[test]
fn test_interview_flag() {
    let db = memory_db(3);
    assert!(!db.is_interview_complete(0).unwrap());

    db.set_interview_complete(0, true).unwrap();
    assert!(db.is_interview_complete(0).unwrap());
    assert!(!db.is_interview_complete(1).unwrap());
}

#[test]
fn test_remove_value() {
    let db = memory_db(3);
    let value_id = BinarySensorValues::state(0, SensorType::Tilt);
    db.set_value(&value_id, CachedValue::Bool(true)).unwrap();

    assert!(db.remove_value(&value_id).unwrap());
    assert_eq!(db.get_value(&value_id).unwrap(), None);
}

#[test]
fn test_sensor_type_of_value_id() {
    let state = BinarySensorValues::state(2, SensorType::DoorWindow);
    assert_eq!(state.property, "Door/Window");
    assert_eq!(state.property_key, None);
    assert_eq!(BinarySensorValues::sensor_type_of(&state), Some(SensorType::DoorWindow));

    let supported = BinarySensorValues::supported_sensor_types(2);
    assert_eq!(BinarySensorValues::sensor_type_of(&supported), None);
}
