//! # Remote Commands
//!
//! Builders for the console commands sent to a game process. JSON embedded in
//! a command is always escaped so it survives inside a string literal.

use crate::constants::remote;
use crate::error::{TrainsError, TrainsResult};
use crate::zone::{Zone, ZoneConfig};

/// Escape a string for embedding inside a double or single quoted literal
pub fn escape_string(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\'' => escaped.push_str("\\'"),
            '\0' => escaped.push_str("\\0"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// `/c clusterio_trains.sync_zone("<name>", "<zone json>")`
pub fn upsert_zone_command(zone: &Zone) -> TrainsResult<String> {
    let data = serde_json::to_string(zone)
        .map_err(|source| TrainsError::Serialize { what: "zone", source })?;
    Ok(format!(
        "/c {}(\"{}\", \"{}\")",
        remote::SYNC_ZONE,
        escape_string(&zone.name),
        escape_string(&data)
    ))
}

/// `/c clusterio_trains.sync_zone("<name>")`
pub fn remove_zone_command(name: &str) -> String {
    format!("/c {}(\"{}\")", remote::SYNC_ZONE, escape_string(name))
}

/// `/c clusterio_trains.sync_zones("<mapping json>")`
pub fn upload_zones_command(zones: &ZoneConfig) -> TrainsResult<String> {
    let data = serde_json::to_string(zones)
        .map_err(|source| TrainsError::Serialize { what: "zone mapping", source })?;
    Ok(format!("/c {}(\"{}\")", remote::SYNC_ZONES, escape_string(&data)))
}

/// `/c clusterio_trains.receive_train("<payload json>")`
pub fn receive_train_command(payload: &serde_json::Value) -> TrainsResult<String> {
    let data = serde_json::to_string(payload)
        .map_err(|source| TrainsError::Serialize { what: "train payload", source })?;
    Ok(format!("/c {}(\"{}\")", remote::RECEIVE_TRAIN, escape_string(&data)))
}
