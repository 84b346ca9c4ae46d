//! Command Facade
//!
//! Request/response operations for one Binary Sensor endpoint.
//!
//! ## Failure modes
//! - Contract violations (`Capability`, `InvalidArgument`) are returned
//!   before anything is sent
//! - A timeout or transport failure yields `Ok(None)`: the value is unknown
//! - Every received Report is written to the value cache before it is
//!   handed back to the caller, including reports that arrive while the
//!   request is pending but don't answer it

use crate::error::{CcError, Result};
use crate::protocol::{self, parse_property_name, Command, CommandType, ProtocolVersion, SensorType};
use crate::transport::{Priority, Request, Transport};
use crate::values::{ValueDb, ValueStore};

/// Whether `command` may be sent to a device at `version`
pub fn supports_command(command: CommandType, version: ProtocolVersion) -> bool {
    match command {
        // Mandatory since version 1
        CommandType::Get => true,
        CommandType::SupportedGet => version.supports_sensor_types(),
        // Responses are never sent by the controller
        CommandType::Report | CommandType::SupportedReport => false,
    }
}

/// Binary Sensor operations on one endpoint
pub struct BinarySensorApi<'a, T: Transport, S: ValueStore> {
    transport: &'a T,
    values: &'a ValueDb<S>,
    endpoint: u8,
    version: ProtocolVersion,
    priority: Priority,
}

impl<'a, T: Transport, S: ValueStore> BinarySensorApi<'a, T, S> {
    pub fn new(
        transport: &'a T,
        values: &'a ValueDb<S>,
        endpoint: u8,
        version: ProtocolVersion,
    ) -> Self {
        Self {
            transport,
            values,
            endpoint,
            version,
            priority: Priority::Normal,
        }
    }

    /// Use `priority` for every request sent through this API
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn supports_command(&self, command: CommandType) -> bool {
        supports_command(command, self.version)
    }

    /// Retrieve the current value of a sensor
    ///
    /// `sensor_type` selects one type on v2 devices and is ignored on v1.
    /// The echoed type of the report is dropped; the caller knows what it
    /// asked for.
    pub fn get(&self, sensor_type: Option<SensorType>) -> Result<Option<bool>> {
        self.assert_supports_command(CommandType::Get)?;
        if let Some(t @ SensorType::Unrecognized(_)) = sensor_type {
            return Err(CcError::InvalidArgument(format!(
                "{} is not a valid sensor type",
                t
            )));
        }

        let request = Command::Get { sensor_type };
        match self.round_trip(&request)? {
            Some(Command::Report { value, .. }) => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    /// Query which sensor types the device supports (v2+)
    pub fn get_supported_sensor_types(&self) -> Result<Option<Vec<SensorType>>> {
        self.assert_supports_command(CommandType::SupportedGet)?;

        match self.round_trip(&Command::SupportedGet)? {
            Some(Command::SupportedReport { sensor_types }) => Ok(Some(sensor_types)),
            _ => Ok(None),
        }
    }

    /// Re-query the value behind a state property name
    pub fn poll_value(&self, property: &str) -> Result<Option<bool>> {
        match parse_property_name(property) {
            Some(sensor_type) => self.get(Some(sensor_type)),
            None => Err(CcError::UnsupportedProperty(property.to_string())),
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn assert_supports_command(&self, command: CommandType) -> Result<()> {
        if !self.supports_command(command) {
            return Err(CcError::Capability {
                command,
                version: self.version,
            });
        }
        Ok(())
    }

    /// Submit a request; `None` when no response arrived
    fn round_trip(&self, command: &Command) -> Result<Option<Command>> {
        let on_unsolicited = |inbound: &Command| {
            // Out-of-band reports still carry fresh state
            if let Err(e) = self.persist_report(inbound) {
                tracing::warn!(
                    node_id = self.values.node_id(),
                    endpoint = self.endpoint,
                    "failed to persist {}: {}",
                    inbound,
                    e
                );
            }
        };
        let request = Request {
            node_id: self.values.node_id(),
            endpoint: self.endpoint,
            command,
            version: self.version,
            priority: self.priority,
            expects: protocol::matches,
            on_unsolicited: &on_unsolicited,
        };

        let response = match self.transport.submit(&request) {
            Ok(response) => response,
            Err(failure) => {
                tracing::debug!(
                    node_id = self.values.node_id(),
                    endpoint = self.endpoint,
                    "{} got no response: {}",
                    command,
                    failure
                );
                return Ok(None);
            }
        };

        self.persist_report(&response)?;
        Ok(Some(response))
    }

    fn persist_report(&self, command: &Command) -> Result<()> {
        if let Command::Report { sensor_type, value } = command {
            self.values.record_state(self.endpoint, *sensor_type, *value)?;
        }
        Ok(())
    }
}
