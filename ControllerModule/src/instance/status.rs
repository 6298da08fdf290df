//! # Status Projection
//!
//! Turns detailed instance status transitions and name changes into
//! directory patches. Only changes of the coarse status produce a patch.

use trains_shared::lifecycle::{InstanceStatus, SimpleInstanceStatus};
use trains_shared::messages::InstanceDetailsPatch;
use trains_shared::types::InstanceId;

/// Patch for a detailed status transition, if the coarse value changed.
///
/// A missing previous status counts as `unavailable`.
pub fn status_patch(
    id: InstanceId,
    prev: Option<InstanceStatus>,
    curr: InstanceStatus,
) -> Option<InstanceDetailsPatch> {
    let old_status = prev.map_or(SimpleInstanceStatus::Unavailable, InstanceStatus::reduced);
    let new_status = curr.reduced();

    (old_status != new_status).then(|| InstanceDetailsPatch::status(id, new_status))
}

/// Patch for a display name change
pub fn name_patch(id: InstanceId, name: impl Into<String>) -> InstanceDetailsPatch {
    InstanceDetailsPatch::name(id, name)
}
