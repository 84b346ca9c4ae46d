//! Response correlation
//!
//! Decides whether an inbound command answers a pending request. Frames
//! that answer nothing are unsolicited and handled as plain reports.

use super::{Command, SensorType};

/// Whether `received` is the response to `sent`
///
/// - Get ↔ Report: matches when no type (or Any) was requested, or the
///   reported type equals the requested one
/// - SupportedGet ↔ SupportedReport: always
/// - everything else: never
pub fn matches(sent: &Command, received: &Command) -> bool {
    match (sent, received) {
        (Command::Get { sensor_type: requested }, Command::Report { sensor_type, .. }) => {
            matches_get(*requested, *sensor_type)
        }
        (Command::SupportedGet, Command::SupportedReport { .. }) => true,
        _ => false,
    }
}

fn matches_get(requested: Option<SensorType>, reported: SensorType) -> bool {
    match requested {
        None | Some(SensorType::Any) => true,
        Some(requested) => requested == reported,
    }
}
