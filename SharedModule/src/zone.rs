//! # Zone Types
//!
//! Rectangular zones defined on one instance's surfaces, and the named link
//! that turns a zone into a teleport portal towards another instance.

use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

use crate::types::Coord;

/// Mapping from zone name to zone, scoped to one instance
pub type ZoneConfig = BTreeMap<String, Zone>;

/// Named reference to a zone on another instance.
///
/// Never resolved to a live object; the target is looked up by name at
/// request time on the other side of the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTarget {
    /// Instance the target zone lives on
    pub instance: String,

    /// Name of the target zone on that instance
    pub name: String,
}

/// A named rectangle on a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Name of the zone, unique within one instance
    pub name: String,

    /// Linking target
    pub link: Option<ZoneTarget>,

    /// Whether enabled
    pub enabled: bool,

    /// Surface on this host
    pub surface: String,

    pub x1: Coord,
    pub y1: Coord,
    pub x2: Coord,
    pub y2: Coord,
}

impl Zone {
    /// Create an unlinked, disabled zone.
    ///
    /// A zone cannot be enabled while it has no link, so every new zone
    /// starts out disabled.
    pub fn new(
        name: impl Into<String>,
        surface: impl Into<String>,
        x1: Coord,
        y1: Coord,
        x2: Coord,
        y2: Coord,
    ) -> Self {
        Self {
            name: name.into(),
            link: None,
            enabled: false,
            surface: surface.into(),
            x1,
            y1,
            x2,
            y2,
        }
    }
}

/// Zone entry as listed in an instance's details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub name: String,
    pub surface: String,
    pub enabled: bool,
    pub link: Option<ZoneTarget>,
}
