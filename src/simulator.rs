//! Simulated device
//!
//! A scripted Binary Sensor that answers frames over channels, standing in
//! for a real node in the demo binary and in tests.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender};

use crate::protocol::{Command, CommandType, ProtocolVersion, SensorType};
use crate::registry;
use crate::transport::ChannelTransport;

/// Scripted device behaviour
#[derive(Debug, Clone)]
pub struct SimulatedDevice {
    /// Version the device implements
    version: ProtocolVersion,

    /// Supported sensor types and their current state, in report order
    sensors: Vec<(SensorType, bool)>,

    /// Commands the device never answers
    unresponsive: Vec<CommandType>,

    /// Raw frames sent once, before the first response
    preamble: Vec<Vec<u8>>,
}

impl SimulatedDevice {
    pub fn new(version: ProtocolVersion) -> Self {
        Self {
            version,
            sensors: Vec::new(),
            unresponsive: Vec::new(),
            preamble: Vec::new(),
        }
    }

    /// Add a supported sensor with its current state
    pub fn with_sensor(mut self, sensor_type: SensorType, state: bool) -> Self {
        match self.sensors.iter_mut().find(|(t, _)| *t == sensor_type) {
            Some(entry) => entry.1 = state,
            None => self.sensors.push((sensor_type, state)),
        }
        self
    }

    /// Never answer `command`, so the controller times out
    pub fn unresponsive_to(mut self, command: CommandType) -> Self {
        self.unresponsive.push(command);
        self
    }

    /// Send `frame` ahead of the first response
    pub fn with_preamble(mut self, frame: Vec<u8>) -> Self {
        self.preamble.push(frame);
        self
    }

    /// Compute the response to `command`, if the device sends one
    pub fn respond(&self, command: &Command) -> Option<Command> {
        if self.unresponsive.contains(&command.command_type()) {
            return None;
        }

        match command {
            Command::Get { sensor_type } => {
                let (sensor_type, value) = self.lookup(*sensor_type);
                Some(Command::Report { sensor_type, value })
            }
            Command::SupportedGet if self.version.supports_sensor_types() => {
                Some(Command::SupportedReport {
                    sensor_types: self.sensors.iter().map(|(t, _)| *t).collect(),
                })
            }
            _ => None,
        }
    }

    /// Spawn the device on its own thread and return a transport to it
    ///
    /// The device stops once the transport is dropped. The handle yields
    /// the number of frames it answered.
    pub fn connect(self, timeout: Duration) -> (ChannelTransport, JoinHandle<usize>) {
        let (to_device, device_rx) = channel::unbounded();
        let (device_tx, from_device) = channel::unbounded();

        let handle = thread::spawn(move || self.run(device_rx, device_tx));
        (ChannelTransport::new(to_device, from_device, timeout), handle)
    }

    /// Serve frames until the controller side disconnects
    pub fn run(self, inbound: Receiver<Vec<u8>>, outbound: Sender<Vec<u8>>) -> usize {
        let mut answered = 0;
        let mut preamble = self.preamble.clone();

        for frame in inbound.iter() {
            let command = match registry::decode_frame(&frame, self.version) {
                Ok(command) => command,
                Err(e) => {
                    tracing::warn!("Device ignoring malformed frame {:02x?}: {}", frame, e);
                    continue;
                }
            };

            let Some(response) = self.respond(&command) else {
                tracing::trace!("Device not answering {}", command);
                continue;
            };

            for extra in preamble.drain(..) {
                if outbound.send(extra).is_err() {
                    return answered;
                }
            }
            let frame = match registry::encode_frame(&response, self.version) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("Device cannot frame {}: {}", response, e);
                    continue;
                }
            };
            if outbound.send(frame).is_err() {
                return answered;
            }
            answered += 1;
        }

        answered
    }

    /// State reported for a request, with the type the device echoes
    ///
    /// Like real devices, an unsupported or absent type falls back to the
    /// first supported sensor.
    fn lookup(&self, requested: Option<SensorType>) -> (SensorType, bool) {
        let requested = requested.filter(|_| self.version.supports_sensor_types());
        if let Some(requested) = requested {
            if let Some(&found) = self.sensors.iter().find(|(t, _)| *t == requested) {
                return found;
            }
        }
        self.sensors
            .first()
            .copied()
            .unwrap_or((SensorType::Any, false))
    }
}
