//! Transport Module
//!
//! The round-trip seam between the command class and the radio.
//!
//! ## Contract
//! - `submit` sends one request and blocks until the correlated response
//!   arrives or the exchange fails
//! - Correlation is a plain predicate carried by the request
//! - Every decoded command that doesn't answer the request is handed to
//!   the request's `on_unsolicited` hook before anything else sees it
//! - Failures are soft: `TransportFailure`, never a `CcError`
//!
//! Framing, checksums, retransmission and queueing live below this seam.

mod channel;

pub use channel::ChannelTransport;

use std::sync::Arc;

use crate::error::TransportFailure;
use crate::protocol::{Command, ProtocolVersion};

/// Queue priority hint for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Immediate,
    Normal,
    /// Commissioning and refresh traffic
    NodeQuery,
    Poll,
}

/// Predicate deciding whether an inbound command answers a request
pub type ResponsePredicate = fn(&Command, &Command) -> bool;

/// Hook receiving inbound commands that answer nothing
pub type UnsolicitedHook<'a> = &'a dyn Fn(&Command);

/// A request ready to be submitted
#[derive(Clone)]
pub struct Request<'a> {
    pub node_id: u16,
    pub endpoint: u8,
    pub command: &'a Command,
    pub version: ProtocolVersion,
    pub priority: Priority,
    pub expects: ResponsePredicate,
    pub on_unsolicited: UnsolicitedHook<'a>,
}

/// Result of a round trip
pub type Outcome = std::result::Result<Command, TransportFailure>;

/// Sends requests and awaits their responses
pub trait Transport {
    fn submit(&self, request: &Request<'_>) -> Outcome;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn submit(&self, request: &Request<'_>) -> Outcome {
        (**self).submit(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn submit(&self, request: &Request<'_>) -> Outcome {
        (**self).submit(request)
    }
}
