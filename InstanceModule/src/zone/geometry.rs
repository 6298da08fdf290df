//! # Zone Geometry
//!
//! Pure checks deciding whether a candidate zone may join an instance's
//! zone mapping. Nothing here touches state or performs I/O.

use thiserror::Error as ThisError;
use trains_shared::zone::{Zone, ZoneConfig};

/// Reason a candidate zone was refused
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ZoneRejection {
    /// `x1 > x2` or `y1 > y2` (or a bound is not a number)
    #[error("inverted bounds")]
    InvertedBounds,

    /// Zone name is empty
    #[error("empty name")]
    EmptyName,

    /// A zone with this name already exists
    #[error("duplicate name")]
    DuplicateName,

    /// Rectangle overlaps an existing zone on the same surface
    #[error("overlaps zone {existing}")]
    Overlap { existing: String },
}

/// Whether two rectangles share any point, edges included.
///
/// Symmetric in its arguments. Surfaces are not compared here.
pub fn overlaps(a: &Zone, b: &Zone) -> bool {
    !(a.x1 > b.x2 || a.x2 < b.x1 || a.y1 > b.y2 || a.y2 < b.y1)
}

/// Check a candidate against the zones already present.
///
/// Returns the first violated constraint, in order: bounds, name, uniqueness,
/// overlap with a zone on the same surface.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn validate_new_zone(existing: &ZoneConfig, candidate: &Zone) -> Result<(), ZoneRejection> {
    // Written as negations so NaN bounds are refused too
    if !(candidate.x1 <= candidate.x2) || !(candidate.y1 <= candidate.y2) {
        return Err(ZoneRejection::InvertedBounds);
    }
    if candidate.name.is_empty() {
        return Err(ZoneRejection::EmptyName);
    }
    if existing.contains_key(&candidate.name) {
        return Err(ZoneRejection::DuplicateName);
    }

    let conflict = existing
        .values()
        .filter(|zone| zone.surface == candidate.surface)
        .find(|zone| overlaps(zone, candidate));

    match conflict {
        Some(zone) => Err(ZoneRejection::Overlap { existing: zone.name.clone() }),
        None => Ok(()),
    }
}
