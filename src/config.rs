//! Configuration for a Binary Sensor endpoint
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::Result;
use crate::protocol::ProtocolVersion;
use crate::transport::Priority;

/// Configuration of one command class instance (node + endpoint)
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Addressing
    // -------------------------------------------------------------------------
    /// Node the endpoint belongs to
    pub node_id: u16,

    /// Endpoint index (0 = root device)
    pub endpoint_index: u8,

    /// Command class version advertised by the device
    pub device_version: u8,

    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// How long to wait for a response before giving up (milliseconds)
    pub response_timeout_ms: u64,

    /// Queue priority for interview/refresh traffic
    pub priority: Priority,

    // -------------------------------------------------------------------------
    // Value Store Configuration
    // -------------------------------------------------------------------------
    /// Snapshot file for the file-backed value store
    pub store_path: PathBuf,

    /// When the file-backed store writes its snapshot
    pub flush_strategy: FlushStrategy,
}

/// Snapshot flush strategy of the file-backed store
#[derive(Debug, Clone, Copy)]
pub enum FlushStrategy {
    /// Write after every change (safest, slowest)
    EveryWrite,

    /// Write after N changes
    EveryNWrites { count: usize },

    /// Only on explicit flush/close
    Manual,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_id: 1,
            endpoint_index: 0,
            device_version: 2,
            response_timeout_ms: 1600,
            priority: Priority::NodeQuery,
            store_path: PathBuf::from("./binsensor_data/values.bin"),
            flush_strategy: FlushStrategy::EveryNWrites { count: 16 },
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Version negotiated with the device
    pub fn protocol_version(&self) -> Result<ProtocolVersion> {
        ProtocolVersion::negotiate(self.device_version)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn node_id(mut self, node_id: u16) -> Self {
        self.config.node_id = node_id;
        self
    }

    pub fn endpoint_index(mut self, index: u8) -> Self {
        self.config.endpoint_index = index;
        self
    }

    /// Set the command class version the device advertises
    pub fn device_version(mut self, version: u8) -> Self {
        self.config.device_version = version;
        self
    }

    /// Set the response timeout (in milliseconds)
    pub fn response_timeout_ms(mut self, ms: u64) -> Self {
        self.config.response_timeout_ms = ms;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.config.priority = priority;
        self
    }

    /// Set the snapshot file of the value store
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    pub fn flush_strategy(mut self, strategy: FlushStrategy) -> Self {
        self.config.flush_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
