//! Interview / Refresh Orchestrator
//!
//! Commissioning and refresh workflow of one Binary Sensor endpoint.
//!
//! ## Interview
//! ```text
//! NotStarted ──(v1)──────────────────────────┐
//!     │                                      ▼
//!     └─(v2)─► QueryingSupportedTypes ──► QueryingValues ──► Complete
//!                     │
//!                     └─(no response)──► Aborted
//! ```
//!
//! Requests go out strictly one at a time; each waits for its response or
//! timeout before the next is sent. Only the completion flag is persisted,
//! everything else is re-derived from cached values.

use crate::api::BinarySensorApi;
use crate::config::Config;
use crate::error::Result;
use crate::protocol::{Command, ProtocolVersion, SensorType};
use crate::transport::{Priority, Transport};
use crate::values::{ValueDb, ValueStore};

/// Progress of an endpoint's interview
///
/// A running interview passes through every state (see `interview`); the
/// cache only remembers enough for `derive` to recover `NotStarted`,
/// `QueryingValues` and `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewState {
    NotStarted,
    QueryingSupportedTypes,
    QueryingValues,
    Complete,
    Aborted,
}

impl InterviewState {
    /// Recover the state of a previous interview from the value cache
    ///
    /// An aborted interview leaves nothing behind, so it reads as
    /// `NotStarted`; an interrupted one that got as far as storing the
    /// supported types reads as `QueryingValues`.
    pub fn derive<S: ValueStore>(
        values: &ValueDb<S>,
        endpoint: u8,
        version: ProtocolVersion,
    ) -> Result<Self> {
        if values.is_interview_complete(endpoint)? {
            return Ok(InterviewState::Complete);
        }
        if version.supports_sensor_types() && values.supported_sensor_types(endpoint)?.is_some() {
            return Ok(InterviewState::QueryingValues);
        }
        Ok(InterviewState::NotStarted)
    }
}

/// How an interview ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewOutcome {
    Complete,
    /// The device didn't tell us what it supports; sibling command classes
    /// carry on regardless
    Aborted,
}

/// Binary Sensor command class bound to one endpoint
#[derive(Debug, Clone)]
pub struct BinarySensorCc {
    endpoint: u8,
    version: ProtocolVersion,
    priority: Priority,
}

impl BinarySensorCc {
    pub fn new(endpoint: u8, version: ProtocolVersion) -> Self {
        Self {
            endpoint,
            version,
            priority: Priority::NodeQuery,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            endpoint: config.endpoint_index,
            version: config.protocol_version()?,
            priority: config.priority,
        })
    }

    pub fn endpoint(&self) -> u8 {
        self.endpoint
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Facade for this endpoint, using the commissioning priority
    pub fn api<'a, T: Transport, S: ValueStore>(
        &self,
        transport: &'a T,
        values: &'a ValueDb<S>,
    ) -> BinarySensorApi<'a, T, S> {
        BinarySensorApi::new(transport, values, self.endpoint, self.version)
            .with_priority(self.priority)
    }

    /// First-time interview: discover supported types, read every value,
    /// then mark the interview complete
    pub fn interview<T: Transport, S: ValueStore>(
        &self,
        transport: &T,
        values: &ValueDb<S>,
    ) -> Result<InterviewOutcome> {
        let node_id = values.node_id();
        let api = self.api(transport, values);

        tracing::info!(
            node_id,
            endpoint = self.endpoint,
            direction = "none",
            "Interviewing Binary Sensor..."
        );

        if self.version.supports_sensor_types() {
            self.enter(node_id, InterviewState::QueryingSupportedTypes);
            tracing::info!(
                node_id,
                endpoint = self.endpoint,
                direction = "outbound",
                "querying supported sensor types..."
            );

            match api.get_supported_sensor_types()? {
                Some(sensor_types) => {
                    let listing: String = sensor_types
                        .iter()
                        .map(|t| format!("\n· {}", t))
                        .collect();
                    tracing::info!(
                        node_id,
                        endpoint = self.endpoint,
                        direction = "inbound",
                        "received supported sensor types:{}",
                        listing
                    );
                    values.record_supported_sensor_types(self.endpoint, sensor_types)?;
                }
                None => {
                    tracing::warn!(
                        node_id,
                        endpoint = self.endpoint,
                        "Querying supported sensor types timed out, skipping interview..."
                    );
                    self.enter(node_id, InterviewState::Aborted);
                    return Ok(InterviewOutcome::Aborted);
                }
            }
        }

        self.enter(node_id, InterviewState::QueryingValues);
        self.refresh_values(transport, values)?;

        values.set_interview_complete(self.endpoint, true)?;
        self.enter(node_id, InterviewState::Complete);
        Ok(InterviewOutcome::Complete)
    }

    fn enter(&self, node_id: u16, state: InterviewState) {
        tracing::debug!(node_id, endpoint = self.endpoint, "interview state: {:?}", state);
    }

    /// Re-query the current value of every known sensor type
    ///
    /// Each received report persists itself; a missing response only costs
    /// that one value.
    pub fn refresh_values<T: Transport, S: ValueStore>(
        &self,
        transport: &T,
        values: &ValueDb<S>,
    ) -> Result<()> {
        let node_id = values.node_id();
        let api = self.api(transport, values);

        if !self.version.supports_sensor_types() {
            tracing::info!(
                node_id,
                endpoint = self.endpoint,
                direction = "outbound",
                "querying current value..."
            );
            match api.get(None)? {
                Some(value) => tracing::info!(
                    node_id,
                    endpoint = self.endpoint,
                    direction = "inbound",
                    "received current value: {}",
                    value
                ),
                None => tracing::warn!(
                    node_id,
                    endpoint = self.endpoint,
                    "querying current value timed out"
                ),
            }
            return Ok(());
        }

        let supported = values.supported_sensor_types(self.endpoint)?.unwrap_or_default();
        for sensor_type in supported {
            // Devices have been seen reporting types outside the catalogue
            if !sensor_type.is_recognized() {
                tracing::debug!(
                    node_id,
                    endpoint = self.endpoint,
                    "skipping unrecognized sensor type {}",
                    sensor_type
                );
                continue;
            }

            tracing::info!(
                node_id,
                endpoint = self.endpoint,
                direction = "outbound",
                "querying current value for {}...",
                sensor_type
            );
            match api.get(Some(sensor_type))? {
                Some(value) => tracing::info!(
                    node_id,
                    endpoint = self.endpoint,
                    direction = "inbound",
                    "received current value for {}: {}",
                    sensor_type,
                    value
                ),
                None => tracing::warn!(
                    node_id,
                    endpoint = self.endpoint,
                    "querying current value for {} timed out",
                    sensor_type
                ),
            }
        }

        Ok(())
    }

    /// Reinterpret a Basic command class value as the "Any" state
    ///
    /// Purely local; nothing is sent to the device.
    pub fn set_mapped_basic_value<S: ValueStore>(&self, values: &ValueDb<S>, value: u8) -> Result<bool> {
        values.record_state(self.endpoint, SensorType::Any, value > 0)?;
        Ok(true)
    }

    /// Persist an inbound command, solicited or not
    pub fn handle_inbound<S: ValueStore>(&self, values: &ValueDb<S>, command: &Command) -> Result<()> {
        match command {
            Command::Report { sensor_type, value } => {
                tracing::debug!(
                    node_id = values.node_id(),
                    endpoint = self.endpoint,
                    direction = "inbound",
                    "{}",
                    command
                );
                values.record_state(self.endpoint, *sensor_type, *value)
            }
            Command::SupportedReport { sensor_types } => {
                values.record_supported_sensor_types(self.endpoint, sensor_types.clone())
            }
            Command::Get { .. } | Command::SupportedGet => Ok(()),
        }
    }

    /// Which sensor types are supported, from the cache
    ///
    /// Only meaningful after the interview; `None` before.
    pub fn supported_sensor_types_cached<S: ValueStore>(
        values: &ValueDb<S>,
        endpoint: u8,
    ) -> Result<Option<Vec<SensorType>>> {
        values.supported_sensor_types(endpoint)
    }

    /// Progress of this endpoint's interview, as far as the cache tells
    pub fn interview_state<S: ValueStore>(&self, values: &ValueDb<S>) -> Result<InterviewState> {
        InterviewState::derive(values, self.endpoint, self.version)
    }
}
