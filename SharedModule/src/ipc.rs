//! # IPC Payloads
//!
//! Events raised by the local game process towards its instance. Each
//! channel carries one JSON payload; none of them expects a response.

use serde::{Serialize, Deserialize};

use crate::constants::ipc as channel;
use crate::error::{TrainsError, TrainsResult};
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAddIpc {
    pub name: String,
    pub surface: String,
    pub x1: Coord,
    pub y1: Coord,
    pub x2: Coord,
    pub y2: Coord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDeleteIpc {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneLinkIpc {
    pub name: String,
    pub instance: String,
    pub target_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStatusIpc {
    pub name: String,
    pub enabled: bool,
}

/// A decoded zone edit from the game process
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneIpcEvent {
    Add(ZoneAddIpc),
    Delete(ZoneDeleteIpc),
    Link(ZoneLinkIpc),
    Status(ZoneStatusIpc),
}

impl ZoneIpcEvent {
    /// Decode the payload of a named IPC channel
    pub fn decode(channel_name: &str, payload: serde_json::Value) -> TrainsResult<Self> {
        let payload_error = |source| TrainsError::Payload {
            channel: channel_name.to_string(),
            source,
        };

        let decoded = match channel_name {
            channel::ZONE_ADD => serde_json::from_value(payload).map(Self::Add),
            channel::ZONE_DELETE => serde_json::from_value(payload).map(Self::Delete),
            channel::ZONE_LINK => serde_json::from_value(payload).map(Self::Link),
            channel::ZONE_STATUS => serde_json::from_value(payload).map(Self::Status),
            other => return Err(TrainsError::UnknownChannel(other.to_string())),
        };
        decoded.map_err(payload_error)
    }

    /// Name of the zone the event refers to
    pub fn zone_name(&self) -> &str {
        match self {
            Self::Add(event) => &event.name,
            Self::Delete(event) => &event.name,
            Self::Link(event) => &event.name,
            Self::Status(event) => &event.name,
        }
    }
}
