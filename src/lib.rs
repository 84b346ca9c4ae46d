//! # binsensor-cc
//!
//! The Binary Sensor command class for low-bandwidth mesh devices:
//! - Versioned wire codec (v1 single state, v2 per sensor type)
//! - Request/response correlation
//! - Interview and refresh workflow over a shared value cache
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Interview / Refresh Orchestrator                │
//! │                    (BinarySensorCc)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Command Facade                             │
//! │           (get, get_supported_sensor_types)                  │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │    Transport    │                │    ValueDb      │
//!   │ (one in flight) │                │ (typed cache)   │
//!   └────────┬────────┘                └────────┬────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │ Registry/Codec  │                │   ValueStore    │
//!   │ + Correlator    │                │ (shared, bytes) │
//!   └─────────────────┘                └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod values;
pub mod transport;
pub mod registry;
pub mod api;
pub mod interview;
pub mod simulator;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CcError, DecodeError, Result, TransportFailure};
pub use config::Config;
pub use api::BinarySensorApi;
pub use interview::{BinarySensorCc, InterviewOutcome, InterviewState};

// =============================================================================
// Version Info
// =============================================================================

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
