//! Channel transport
//!
//! Exchanges command class frames with a device over crossbeam channels.

use std::time::{Duration, Instant};

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;

use crate::error::TransportFailure;
use crate::protocol::Command;
use crate::registry;

use super::{Outcome, Request, Transport};

/// Point-to-point link carrying encoded frames
///
/// ## Concurrency:
/// - One exchange in flight at a time (`exchange` mutex); a second caller
///   waits until the first has its response or gave up
/// - Frames that don't answer the pending request go to the request's
///   hook, then to the unsolicited channel if one is attached
pub struct ChannelTransport {
    /// Frames to the device
    outbound: Sender<Vec<u8>>,

    /// Frames from the device
    inbound: Receiver<Vec<u8>>,

    /// Decoded frames that matched no pending request
    unsolicited: Option<Sender<Command>>,

    /// How long to wait for a response
    timeout: Duration,

    /// Serializes request/response exchanges
    exchange: Mutex<()>,
}

impl ChannelTransport {
    pub fn new(outbound: Sender<Vec<u8>>, inbound: Receiver<Vec<u8>>, timeout: Duration) -> Self {
        Self {
            outbound,
            inbound,
            unsolicited: None,
            timeout,
            exchange: Mutex::new(()),
        }
    }

    /// Forward unsolicited commands to `sink`
    pub fn with_unsolicited(mut self, sink: Sender<Command>) -> Self {
        self.unsolicited = Some(sink);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn forward_unsolicited(&self, request: &Request<'_>, command: Command) {
        tracing::debug!(node_id = request.node_id, "Unsolicited {}", command);
        (request.on_unsolicited)(&command);
        if let Some(sink) = &self.unsolicited {
            // Nobody listening is fine, the report is simply dropped
            let _ = sink.send(command);
        }
    }
}

impl Transport for ChannelTransport {
    fn submit(&self, request: &Request<'_>) -> Outcome {
        let _exchange = self.exchange.lock();

        tracing::trace!(
            node_id = request.node_id,
            endpoint = request.endpoint,
            priority = ?request.priority,
            "» {}",
            request.command
        );

        let frame = registry::encode_frame(request.command, request.version)
            .map_err(|e| TransportFailure::Rejected(e.to_string()))?;
        self.outbound
            .send(frame)
            .map_err(|_| TransportFailure::Disconnected)?;

        let deadline = Instant::now() + self.timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let frame = match self.inbound.recv_timeout(remaining) {
                Ok(frame) => frame,
                Err(RecvTimeoutError::Timeout) => return Err(TransportFailure::Timeout),
                Err(RecvTimeoutError::Disconnected) => return Err(TransportFailure::Disconnected),
            };

            match registry::decode_frame(&frame, request.version) {
                Ok(command) if (request.expects)(request.command, &command) => {
                    tracing::trace!(node_id = request.node_id, "« {}", command);
                    return Ok(command);
                }
                Ok(command) => self.forward_unsolicited(request, command),
                Err(e) => {
                    tracing::warn!(
                        node_id = request.node_id,
                        "Dropping malformed frame {:02x?}: {}",
                        frame,
                        e
                    );
                }
            }
        }
    }
}
