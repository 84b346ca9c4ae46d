//! Shared test helpers
//!
//! A scripted in-process transport that records every request, and a
//! tracing layer that records every event.

#![allow(dead_code)]

use std::fmt;
use std::sync::Arc;

use binsensor_cc::error::TransportFailure;
use binsensor_cc::protocol::{Command, ProtocolVersion, SensorType};
use binsensor_cc::transport::{Outcome, Priority, Request, Transport};
use binsensor_cc::values::{MemoryStore, ValueDb};
use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

type Responder = Box<dyn Fn(&Command) -> Option<Command> + Send + Sync>;

/// Answers requests from a closure; `None` means the device stays silent
pub struct MockTransport {
    responder: Responder,
    sent: Mutex<Vec<(Command, Priority)>>,
}

impl MockTransport {
    pub fn new(responder: impl Fn(&Command) -> Option<Command> + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Device that never answers
    pub fn silent() -> Self {
        Self::new(|_| None)
    }

    /// Every command submitted so far, in order
    pub fn sent(&self) -> Vec<Command> {
        self.sent.lock().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn priorities(&self) -> Vec<Priority> {
        self.sent.lock().iter().map(|(_, p)| *p).collect()
    }
}

impl Transport for MockTransport {
    fn submit(&self, request: &Request<'_>) -> Outcome {
        self.sent
            .lock()
            .push((request.command.clone(), request.priority));

        match (self.responder)(request.command) {
            Some(response) if (request.expects)(request.command, &response) => Ok(response),
            // A response that doesn't correlate is unsolicited and leaves the
            // request pending
            Some(other) => {
                (request.on_unsolicited)(&other);
                Err(TransportFailure::Timeout)
            }
            None => Err(TransportFailure::Timeout),
        }
    }
}

/// Device answering Gets from `sensors` and SupportedGet with their types
pub fn sensor_device(sensors: Vec<(SensorType, bool)>) -> MockTransport {
    MockTransport::new(move |command| match command {
        Command::Get { sensor_type } => {
            let requested = sensor_type.unwrap_or(SensorType::Any);
            sensors
                .iter()
                .find(|(t, _)| requested == SensorType::Any || *t == requested)
                .map(|&(sensor_type, value)| Command::Report { sensor_type, value })
        }
        Command::SupportedGet => Some(Command::SupportedReport {
            sensor_types: sensors.iter().map(|(t, _)| *t).collect(),
        }),
        _ => None,
    })
}

pub fn memory_db(node_id: u16) -> ValueDb<Arc<MemoryStore>> {
    ValueDb::new(Arc::new(MemoryStore::new()), node_id)
}

pub const V1: ProtocolVersion = ProtocolVersion::V1;
pub const V2: ProtocolVersion = ProtocolVersion::V2;

// =============================================================================
// Log Capture
// =============================================================================

/// Tracing layer keeping (level, message) of every event
#[derive(Clone, Default)]
pub struct CapturedEvents {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CapturedEvents {
    /// Run `f` with this layer as the thread's subscriber
    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    /// Messages logged at `level`, in order
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = MessageVisitor(String::new());
        event.record(&mut message);
        self.events.lock().push((*event.metadata().level(), message.0));
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}
